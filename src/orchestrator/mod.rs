//! Compile Orchestrator Actor
//!
//! A single tokio task owning the whole session. Commands arrive on a
//! channel; a pure debounce scheduler turns editor churn into compile
//! triggers; the staged pipeline runs inline, so no two pipelines of a
//! session ever interleave and outcomes apply strictly in trigger order.
//!
//! Architecture:
//! ```text
//! Host commands → Debounce (pure timing) → Pipeline (staged) → Snapshot publish
//! ```

use tokio::sync::mpsc;

use crate::backend::registry::BackendRegistry;
use crate::config::PlaygroundConfig;
use crate::session::Session;
use crate::session::options::{CompileMode, OptionKey};

// Channel wiring and the public command API.
pub mod handle;
// Command and event types.
pub mod messages;

// Pure timing and edit deduplication.
mod debounce;
// Staged compile pipeline.
mod pipeline;

#[cfg(test)]
mod tests;

use debounce::Debounce;
use messages::{PlaygroundMsg, UiEvent};

/// Compile orchestrator - owns the session and drives the pipeline
pub(crate) struct Orchestrator {
    /// Command channel from the host
    rx: mpsc::Receiver<PlaygroundMsg>,
    /// Lifecycle events back to the host
    ui_tx: mpsc::Sender<UiEvent>,
    /// Available backends; exactly one is active
    registry: BackendRegistry,
    /// Id of the active backend
    backend_id: String,
    config: PlaygroundConfig,
    session: Session,
    debounce: Debounce,
    /// Current editor text (full recompilation input)
    source: String,
}

impl Orchestrator {
    fn new(
        rx: mpsc::Receiver<PlaygroundMsg>,
        ui_tx: mpsc::Sender<UiEvent>,
        registry: BackendRegistry,
        backend_id: String,
        config: PlaygroundConfig,
    ) -> Self {
        let session = Session::new(&config);
        let debounce = Debounce::new(config.auto_compile_delay_ms, &config.sample_source);
        let source = config.sample_source.clone();

        Self {
            rx,
            ui_tx,
            registry,
            backend_id,
            config,
            session,
            debounce,
            source,
        }
    }

    /// Run the actor event loop
    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                msg = self.rx.recv() => {
                    let Some(msg) = msg else { break };
                    if self.dispatch(msg).await {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.debounce.sleep_duration()) => {
                    if self.debounce.take_if_ready() {
                        crate::debug!("debounce"; "deadline elapsed, compiling");
                        self.run_pipeline().await;
                    }
                }
            }
        }
    }

    /// Handle one command. Returns true on shutdown.
    async fn dispatch(&mut self, msg: PlaygroundMsg) -> bool {
        match msg {
            PlaygroundMsg::EditorChanged(text) => self.on_editor_changed(text),
            PlaygroundMsg::CompileClicked(mode) => self.on_compile_clicked(mode).await,
            PlaygroundMsg::ModeChanged(mode) => self.on_mode_changed(mode),
            PlaygroundMsg::OptionChanged { key, value } => {
                self.on_option_changed(key, value).await;
            }
            PlaygroundMsg::BackendReady => self.on_backend_ready().await,
            PlaygroundMsg::DismissNotification(key) => {
                self.session.notifications.dismiss(key);
                self.session.publish();
            }
            PlaygroundMsg::Shutdown => return true,
        }
        false
    }

    /// Editor text changed. The text is always stored; the debounce deadline
    /// is armed only for meaningful edits in Auto mode.
    fn on_editor_changed(&mut self, text: String) {
        let meaningful = self.debounce.note_edit(&text);
        self.source = text;

        if meaningful && self.session.mode == CompileMode::Auto {
            self.debounce.schedule();
        }
    }

    /// Explicit compile request. Decompile is declared but unsupported.
    async fn on_compile_clicked(&mut self, mode: CompileMode) {
        self.debounce.cancel();

        match mode {
            CompileMode::Auto | CompileMode::Manual => self.run_pipeline().await,
            CompileMode::Decompile => {}
        }
    }

    /// Mode switch. Any pending deadline belongs to the old mode and dies
    /// with it; Auto re-arms so the current text still gets compiled.
    fn on_mode_changed(&mut self, mode: CompileMode) {
        self.debounce.cancel();
        self.session.mode = mode;
        self.session
            .notifications
            .set_suppressed(mode == CompileMode::Auto);

        if mode == CompileMode::Auto {
            self.debounce.schedule();
        }
        self.session.publish();
    }

    /// Settings switch toggled. Ignored until the backend is up; afterwards
    /// every change recompiles immediately.
    async fn on_option_changed(&mut self, key: OptionKey, value: bool) {
        if !self.session.backend_ready {
            return;
        }

        self.session.options.set(key, value);
        self.debounce.cancel();
        self.run_pipeline().await;
    }

    /// Backend finished loading: record its version and compile the sample
    /// source so the playground opens with output.
    async fn on_backend_ready(&mut self) {
        self.session.backend_ready = true;
        self.session.version = self
            .registry
            .version_of(&self.backend_id)
            .unwrap_or_default();
        self.session.publish();

        crate::log!("compile"; "backend {} ready ({})", self.backend_id, self.session.version);
        self.run_pipeline().await;
    }
}
