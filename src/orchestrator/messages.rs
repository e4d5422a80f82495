//! Message types for the orchestrator actor.

use crate::session::options::{CompileMode, OptionKey};

/// Commands the host sends to the orchestrator.
#[derive(Debug)]
pub enum PlaygroundMsg {
    /// The editor text changed (every keystroke; debouncing happens here).
    EditorChanged(String),
    /// The compile button was pressed with the given mode.
    CompileClicked(CompileMode),
    /// The compile-mode selector changed.
    ModeChanged(CompileMode),
    /// A settings switch was toggled.
    OptionChanged { key: OptionKey, value: bool },
    /// The backend finished loading and is ready to compile.
    BackendReady,
    /// A notification was dismissed by key.
    DismissNotification(u64),
    /// Stop the actor.
    Shutdown,
}

/// Events the orchestrator emits back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A pipeline entered its announce stage.
    CompileStarted,
    /// A pipeline finished teardown (any outcome).
    CompileFinished,
}
