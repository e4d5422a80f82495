//! Wiring and the public command API.
//!
//! `Playground::spawn` builds the channels, starts the orchestrator task,
//! and hands back a `PlaygroundHandle` the host drives plus the receiver
//! for compile lifecycle events.

use std::sync::Arc;

use anyhow::{Result, bail};
use arc_swap::ArcSwap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::artifact::export_filename;
use crate::backend::registry::BackendRegistry;
use crate::config::PlaygroundConfig;
use crate::session::SessionSnapshot;
use crate::session::options::{CompileMode, OptionKey};

use super::Orchestrator;
use super::messages::{PlaygroundMsg, UiEvent};

/// Channel buffer size for commands and lifecycle events
const CHANNEL_BUFFER: usize = 32;

/// Entry point for embedding the orchestrator.
pub struct Playground;

impl Playground {
    /// Spawn the orchestrator task for one session.
    ///
    /// Fails when `active_backend` is not in the registry; everything after
    /// this point is infallible from the host's perspective.
    pub fn spawn(
        config: PlaygroundConfig,
        registry: BackendRegistry,
        active_backend: &str,
    ) -> Result<(PlaygroundHandle, mpsc::Receiver<UiEvent>)> {
        if !registry.contains(active_backend) {
            bail!("unknown compiler backend: {active_backend}");
        }

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let (ui_tx, ui_rx) = mpsc::channel(CHANNEL_BUFFER);

        let orchestrator =
            Orchestrator::new(rx, ui_tx, registry, active_backend.to_string(), config);
        let shared = orchestrator.session.shared();
        let backend_id = orchestrator.backend_id.clone();

        let task = tokio::spawn(orchestrator.run());

        let handle = PlaygroundHandle {
            tx,
            shared,
            backend_id,
            task,
        };
        Ok((handle, ui_rx))
    }
}

/// Host-side handle to a running session.
pub struct PlaygroundHandle {
    tx: mpsc::Sender<PlaygroundMsg>,
    shared: Arc<ArcSwap<SessionSnapshot>>,
    backend_id: String,
    task: JoinHandle<()>,
}

impl PlaygroundHandle {
    /// Forward an editor change (call on every edit; debouncing happens in
    /// the orchestrator).
    pub async fn editor_changed(&self, text: impl Into<String>) -> Result<()> {
        self.send(PlaygroundMsg::EditorChanged(text.into())).await
    }

    /// Press the compile button.
    pub async fn compile(&self, mode: CompileMode) -> Result<()> {
        self.send(PlaygroundMsg::CompileClicked(mode)).await
    }

    /// Switch the compile mode.
    pub async fn set_mode(&self, mode: CompileMode) -> Result<()> {
        self.send(PlaygroundMsg::ModeChanged(mode)).await
    }

    /// Toggle a settings switch.
    pub async fn set_option(&self, key: OptionKey, value: bool) -> Result<()> {
        self.send(PlaygroundMsg::OptionChanged { key, value }).await
    }

    /// Signal that the backend finished loading.
    pub async fn backend_ready(&self) -> Result<()> {
        self.send(PlaygroundMsg::BackendReady).await
    }

    /// Dismiss a notification by key.
    pub async fn dismiss_notification(&self, key: u64) -> Result<()> {
        self.send(PlaygroundMsg::DismissNotification(key)).await
    }

    /// Current immutable session view; lock-free.
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.shared.load_full()
    }

    /// Export the last binary, if the session allows downloads.
    pub fn download(&self) -> Option<(String, Vec<u8>)> {
        let snapshot = self.snapshot();
        if !snapshot.can_download() {
            return None;
        }
        Some((
            export_filename(&self.backend_id),
            snapshot.output.binary.clone(),
        ))
    }

    /// Stop the orchestrator and wait for it to finish.
    pub async fn stop(self) -> Result<()> {
        self.send(PlaygroundMsg::Shutdown).await?;
        self.task.await?;
        Ok(())
    }

    async fn send(&self, msg: PlaygroundMsg) -> Result<()> {
        if self.tx.send(msg).await.is_err() {
            bail!("orchestrator task is gone");
        }
        Ok(())
    }
}
