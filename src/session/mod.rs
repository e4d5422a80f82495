//! Session state and snapshot publication.
//!
//! The orchestrator task owns a `Session`; everyone else reads the immutable
//! `SessionSnapshot` it publishes through `arc-swap` after every observable
//! transition. Readers are lock-free and never see a half-applied update.

pub mod options;
pub mod outcome;
pub mod status;

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::artifact::OutputBundle;
use crate::config::PlaygroundConfig;
use crate::diagnostics::Annotation;
use crate::notify::{Notification, NotificationQueue};

use options::{CompileMode, CompileOptions};
use status::BusyState;

/// Immutable, whole-session view published after every transition.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Backend loaded and initialized.
    pub backend_ready: bool,
    /// Backend version string, empty until ready.
    pub version: String,
    pub mode: CompileMode,
    /// Session-default options (never probe-upgraded).
    pub options: CompileOptions,
    /// A pipeline is in flight.
    pub compiling: bool,
    pub compile_success: bool,
    pub compile_failure: bool,
    /// Diagnostic count of the last completed cycle.
    pub error_count: usize,
    pub annotations: Vec<Annotation>,
    pub notifications: Vec<Notification>,
    pub output: OutputBundle,
}

impl SessionSnapshot {
    /// Busy/success/failure projection; never stored.
    pub fn busy_state(&self) -> BusyState {
        status::busy_state(self.backend_ready, self.compile_success, self.compile_failure)
    }

    /// Status-bar message for the footer.
    pub fn status_message(&self) -> String {
        status::status_message(self.busy_state(), self.error_count)
    }

    /// Binary download is offered only after a successful compile produced
    /// actual bytes.
    pub fn can_download(&self) -> bool {
        self.backend_ready && self.compile_success && !self.output.binary.is_empty()
    }
}

/// Mutable session state, owned by the orchestrator task.
pub struct Session {
    pub backend_ready: bool,
    pub version: String,
    pub mode: CompileMode,
    pub options: CompileOptions,
    pub compiling: bool,
    pub compile_success: bool,
    pub compile_failure: bool,
    pub error_count: usize,
    pub annotations: Vec<Annotation>,
    pub notifications: NotificationQueue,
    pub output: OutputBundle,

    shared: Arc<ArcSwap<SessionSnapshot>>,
}

impl Session {
    pub fn new(config: &PlaygroundConfig) -> Self {
        let mut notifications = NotificationQueue::new(config.notification_dismiss_ms);
        // default mode is Auto, which suppresses notifications
        notifications.set_suppressed(true);

        let mut session = Self {
            backend_ready: false,
            version: String::new(),
            mode: CompileMode::Auto,
            options: CompileOptions::default(),
            compiling: false,
            compile_success: false,
            compile_failure: false,
            error_count: 0,
            annotations: Vec::new(),
            notifications,
            output: OutputBundle::default(),
            shared: Arc::new(ArcSwap::from_pointee(SessionSnapshot {
                backend_ready: false,
                version: String::new(),
                mode: CompileMode::Auto,
                options: CompileOptions::default(),
                compiling: false,
                compile_success: false,
                compile_failure: false,
                error_count: 0,
                annotations: Vec::new(),
                notifications: Vec::new(),
                output: OutputBundle::default(),
            })),
        };
        session.publish();
        session
    }

    /// Handle for lock-free snapshot reads outside the orchestrator task.
    pub fn shared(&self) -> Arc<ArcSwap<SessionSnapshot>> {
        Arc::clone(&self.shared)
    }

    /// Publish the current state as a fresh immutable snapshot.
    pub fn publish(&mut self) {
        self.shared.store(Arc::new(SessionSnapshot {
            backend_ready: self.backend_ready,
            version: self.version.clone(),
            mode: self.mode,
            options: self.options,
            compiling: self.compiling,
            compile_success: self.compile_success,
            compile_failure: self.compile_failure,
            error_count: self.error_count,
            annotations: self.annotations.clone(),
            notifications: self.notifications.items().to_vec(),
            output: self.output.clone(),
        }));
    }
}
