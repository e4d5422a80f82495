use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use super::handle::{Playground, PlaygroundHandle};
use super::messages::UiEvent;
use crate::backend::registry::BackendRegistry;
use crate::backend::{BackendError, CompileReply, CompiledModule, CompilerBackend, ValidateError};
use crate::config::PlaygroundConfig;
use crate::diagnostics::Diagnostic;
use crate::session::options::{CompileMode, CompileOptions, OptionKey};
use crate::session::status::BusyState;

const MODULE_TEXT: &str = "(module)";
const MODULE_BINARY: &[u8] = &[0x00, 0x61, 0x73, 0x6d];

/// Recorded (source, effective options) per compile invocation.
type Calls = Arc<Mutex<Vec<(String, CompileOptions)>>>;

/// What the scripted backend does on one invocation.
#[derive(Clone)]
enum Step {
    Succeed,
    Reject(Vec<Diagnostic>),
    Crash(&'static str),
    FailValidation(Vec<Diagnostic>),
}

/// Backend test double: replays a script, recording every invocation.
/// The last step repeats once the script is exhausted.
struct ScriptedBackend {
    script: Vec<Step>,
    next: usize,
    calls: Calls,
}

impl CompilerBackend for ScriptedBackend {
    fn id(&self) -> &str {
        "AssemblyScript"
    }

    fn version(&self) -> String {
        "0.6.0".to_string()
    }

    fn compile(
        &mut self,
        source: &str,
        options: &CompileOptions,
    ) -> Result<CompileReply, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((source.to_string(), *options));

        let step = if self.next < self.script.len() {
            let step = self.script[self.next].clone();
            self.next += 1;
            step
        } else {
            self.script.last().cloned().unwrap_or(Step::Succeed)
        };

        match step {
            Step::Succeed => Ok(CompileReply::Module(Box::new(ScriptedModule {
                validate_rejection: None,
            }))),
            Step::Reject(diagnostics) => Ok(CompileReply::Rejected(diagnostics)),
            Step::Crash(message) => Err(BackendError::Crash(message.to_string())),
            Step::FailValidation(diagnostics) => Ok(CompileReply::Module(Box::new(
                ScriptedModule {
                    validate_rejection: Some(diagnostics),
                },
            ))),
        }
    }
}

struct ScriptedModule {
    validate_rejection: Option<Vec<Diagnostic>>,
}

impl CompiledModule for ScriptedModule {
    fn validate(&mut self) -> Result<(), ValidateError> {
        match self.validate_rejection.take() {
            Some(diagnostics) => Err(ValidateError::Rejected(diagnostics)),
            None => Ok(()),
        }
    }

    fn optimize(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn emit_text(&mut self) -> String {
        MODULE_TEXT.to_string()
    }

    fn emit_binary(&mut self) -> Vec<u8> {
        MODULE_BINARY.to_vec()
    }
}

fn spawn_scripted(script: Vec<Step>) -> (PlaygroundHandle, mpsc::Receiver<UiEvent>, Calls) {
    let calls: Calls = Arc::default();
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(ScriptedBackend {
        script,
        next: 0,
        calls: Arc::clone(&calls),
    }));

    let (handle, ui_rx) =
        Playground::spawn(PlaygroundConfig::default(), registry, "AssemblyScript").unwrap();
    (handle, ui_rx, calls)
}

/// Wait for one full pipeline (started + finished). Under paused time this
/// also advances the clock past any pending debounce deadline.
async fn await_cycle(ui_rx: &mut mpsc::Receiver<UiEvent>) {
    assert_eq!(ui_rx.recv().await, Some(UiEvent::CompileStarted));
    assert_eq!(ui_rx.recv().await, Some(UiEvent::CompileFinished));
}

fn located_diags(count: usize) -> Vec<Diagnostic> {
    (1..=count)
        .map(|i| Diagnostic::new(format!("ERROR TS1005: ';' expected. ({i},1)")))
        .collect()
}

#[tokio::test]
async fn test_spawn_rejects_unknown_backend() {
    let registry = BackendRegistry::new();
    assert!(Playground::spawn(PlaygroundConfig::default(), registry, "Nope").is_err());
}

#[tokio::test(start_paused = true)]
async fn test_backend_ready_compiles_sample_source() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);

    // before ready: busy, nothing downloadable
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.busy_state(), BusyState::Busy);
    assert!(handle.download().is_none());

    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert!(snapshot.backend_ready);
    assert_eq!(snapshot.version, "0.6.0");
    assert_eq!(snapshot.busy_state(), BusyState::Success);
    assert_eq!(snapshot.status_message(), "Compiled successfully");
    assert_eq!(snapshot.output.text, MODULE_TEXT);
    assert_eq!(snapshot.output.binary, MODULE_BINARY);

    let (filename, bytes) = handle.download().unwrap();
    assert_eq!(filename, "assemblyscript.module.wasm");
    assert_eq!(bytes, MODULE_BINARY);

    // the initial compile ran over the sample source
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("fib"));
}

#[tokio::test(start_paused = true)]
async fn test_auto_edits_coalesce_into_one_compile() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.editor_changed("let a = 1;").await.unwrap();
    handle.editor_changed("let a = 12;").await.unwrap();
    handle.editor_changed("let a = 123;").await.unwrap();
    await_cycle(&mut ui_rx).await;

    // three edits within the window, one compile, last text wins
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "let a = 123;");
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_only_edit_does_not_compile() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    let padded = format!("  {}\n\n", PlaygroundConfig::default().sample_source);
    handle.editor_changed(padded).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert!(ui_rx.try_recv().is_err());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_reject_caps_reporting_at_eight() {
    let (handle, mut ui_rx, _calls) =
        spawn_scripted(vec![Step::Succeed, Step::Reject(located_diags(10))]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.set_mode(CompileMode::Manual).await.unwrap();
    handle.compile(CompileMode::Manual).await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.busy_state(), BusyState::Failure);
    assert_eq!(snapshot.error_count, 10);
    assert_eq!(snapshot.status_message(), "(10) Errors");

    // 8 surfaced diagnostics + 1 summary
    assert_eq!(snapshot.annotations.len(), 8);
    assert_eq!(snapshot.notifications.len(), 9);
    assert_eq!(
        snapshot.notifications.last().unwrap().message,
        "Too many errors (10)"
    );
    // compiler order preserved, rows zero-based
    assert_eq!(snapshot.annotations[0].row, 0);
    assert_eq!(snapshot.annotations[7].row, 7);

    assert!(handle.download().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_auto_mode_suppresses_notifications() {
    let (handle, mut ui_rx, _calls) = spawn_scripted(vec![Step::Reject(located_diags(3))]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.busy_state(), BusyState::Failure);
    assert_eq!(snapshot.error_count, 3);
    // annotations still update; notifications stay silent in Auto
    assert_eq!(snapshot.annotations.len(), 3);
    assert!(snapshot.notifications.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_internal_error_is_one_notification_no_annotations() {
    let (handle, mut ui_rx, _calls) = spawn_scripted(vec![Step::Crash("backend exploded")]);
    handle.set_mode(CompileMode::Manual).await.unwrap();
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.busy_state(), BusyState::Failure);
    assert_eq!(snapshot.error_count, 1);
    assert_eq!(snapshot.status_message(), "(1) Error");
    assert!(snapshot.annotations.is_empty());
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(
        snapshot.notifications[0].message,
        "<AssemblyScript> internal error:\nbackend exploded"
    );
}

#[tokio::test(start_paused = true)]
async fn test_stdlib_probe_upgrades_single_request_only() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle
        .editor_changed("export function f(): f64 { return Math.random(); }")
        .await
        .unwrap();
    await_cycle(&mut ui_rx).await;

    let calls = calls.lock().unwrap();
    // sample source needs no stdlib; the Math-using edit gets the upgrade
    assert!(!calls[0].1.stdlib);
    assert!(calls[1].1.stdlib);
    // the stored session default is untouched
    assert!(!handle.snapshot().options.stdlib);
}

#[tokio::test(start_paused = true)]
async fn test_option_change_recompiles_immediately() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.set_option(OptionKey::Optimize, false).await.unwrap();
    await_cycle(&mut ui_rx).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(!calls[1].1.optimize);
    assert!(!handle.snapshot().options.optimize);
}

#[tokio::test(start_paused = true)]
async fn test_option_change_before_ready_is_ignored() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);

    handle.set_option(OptionKey::Stdlib, true).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(ui_rx.try_recv().is_err());
    assert!(calls.lock().unwrap().is_empty());
    assert!(!handle.snapshot().options.stdlib);
}

#[tokio::test(start_paused = true)]
async fn test_validation_rejection_reports_like_compile_failure() {
    let (handle, mut ui_rx, _calls) =
        spawn_scripted(vec![Step::Succeed, Step::FailValidation(located_diags(2))]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.set_mode(CompileMode::Manual).await.unwrap();
    handle.compile(CompileMode::Manual).await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.busy_state(), BusyState::Failure);
    assert_eq!(snapshot.error_count, 2);
    assert_eq!(snapshot.annotations.len(), 2);
    assert_eq!(snapshot.notifications.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_decompile_trigger_is_a_no_op() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.compile(CompileMode::Decompile).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert!(ui_rx.try_recv().is_err());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_compile_cancels_pending_auto() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.editor_changed("let pending = true;").await.unwrap();
    handle.compile(CompileMode::Manual).await.unwrap();
    await_cycle(&mut ui_rx).await;

    // the armed auto deadline must not fire a second compile
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert!(ui_rx.try_recv().is_err());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "let pending = true;");
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_targets_key_not_message_text() {
    let diags = vec![
        Diagnostic::new("duplicate message (1,1)"),
        Diagnostic::new("duplicate message (1,1)"),
    ];
    let (handle, mut ui_rx, _calls) = spawn_scripted(vec![Step::Succeed, Step::Reject(diags)]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.set_mode(CompileMode::Manual).await.unwrap();
    handle.compile(CompileMode::Manual).await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.notifications.len(), 2);
    let first_key = snapshot.notifications[0].key;
    let second_key = snapshot.notifications[1].key;

    handle.dismiss_notification(first_key).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].key, second_key);
}

#[tokio::test(start_paused = true)]
async fn test_annotations_replaced_on_next_cycle() {
    let (handle, mut ui_rx, _calls) =
        spawn_scripted(vec![Step::Reject(located_diags(1)), Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;
    assert_eq!(handle.snapshot().annotations.len(), 1);

    handle.editor_changed("let fixed = true;").await.unwrap();
    await_cycle(&mut ui_rx).await;

    let snapshot = handle.snapshot();
    assert!(snapshot.annotations.is_empty());
    assert_eq!(snapshot.busy_state(), BusyState::Success);
}

#[tokio::test(start_paused = true)]
async fn test_switching_back_to_auto_rearms_debounce() {
    let (handle, mut ui_rx, calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.set_mode(CompileMode::Manual).await.unwrap();
    handle.editor_changed("let later = 1;").await.unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;
    // Manual mode: the edit alone compiles nothing
    assert_eq!(calls.lock().unwrap().len(), 1);

    handle.set_mode(CompileMode::Auto).await.unwrap();
    await_cycle(&mut ui_rx).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "let later = 1;");
}

#[tokio::test(start_paused = true)]
async fn test_stop_joins_the_task() {
    let (handle, mut ui_rx, _calls) = spawn_scripted(vec![Step::Succeed]);
    handle.backend_ready().await.unwrap();
    await_cycle(&mut ui_rx).await;

    handle.stop().await.unwrap();
}
