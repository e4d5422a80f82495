//! Staged compile pipeline.
//!
//! Four stages, each yielding before the next so the actor stays
//! cooperative: announce → probe + invoke → branch → teardown. Teardown runs
//! on every branch; a pipeline that started always finishes.

use tokio::task::yield_now;

use crate::backend::{BackendError, CompileReply, CompiledModule, ValidateError};
use crate::backend::probe;
use crate::diagnostics::limit_diagnostics;
use crate::artifact::OutputBundle;
use crate::session::options::CompileOptions;
use crate::session::outcome::CompileOutcome;
use crate::utils::plural::plural_s;

use super::Orchestrator;
use super::messages::UiEvent;

impl Orchestrator {
    /// Run one complete compile cycle over the current source.
    pub(super) async fn run_pipeline(&mut self) {
        if !self.session.backend_ready || self.session.compiling {
            return;
        }

        // Stage 1: announce
        self.session.error_count = 0;
        self.session.compile_success = false;
        self.session.compile_failure = false;
        self.session.annotations.clear();
        self.session.notifications.clear();
        self.session.compiling = true;
        self.session.publish();
        self.ui_tx.send(UiEvent::CompileStarted).await.ok();

        yield_now().await;

        // Stage 2: probe + invoke. The upgrade applies to this request only;
        // the session default stays untouched.
        let mut options = self.session.options;
        if !options.stdlib && probe::requires_stdlib(&self.source) {
            crate::debug!("compile"; "stdlib use detected, linking for this request");
            options.stdlib = true;
        }

        let result = match self.registry.get_mut(&self.backend_id) {
            Some(backend) => backend.compile(&self.source, &options),
            None => Err(BackendError::Crash(format!(
                "backend {} not registered",
                self.backend_id
            ))),
        };

        yield_now().await;

        // Stage 3: branch
        let outcome = match result {
            Ok(CompileReply::Module(module)) => finish_module(module, &options),
            Ok(CompileReply::Rejected(diagnostics)) => CompileOutcome::Failure { diagnostics },
            Err(error) => CompileOutcome::InternalError {
                message: error.to_string(),
            },
        };
        self.apply_outcome(outcome);

        yield_now().await;

        // Stage 4: teardown, on every branch
        self.session.compiling = false;
        self.session.publish();
        self.ui_tx.send(UiEvent::CompileFinished).await.ok();
    }

    /// Fold the pipeline result into session state.
    fn apply_outcome(&mut self, outcome: CompileOutcome) {
        match outcome {
            CompileOutcome::Success { text, binary } => {
                self.session.error_count = 0;
                self.session.compile_success = true;
                self.session.compile_failure = false;
                self.session.output = OutputBundle { text, binary };
                crate::log!("compile"; "compiled successfully ({} bytes)",
                    self.session.output.binary.len());
            }
            CompileOutcome::Failure { diagnostics } => {
                self.session.compile_success = false;
                self.session.compile_failure = true;
                self.session.error_count = diagnostics.len();

                let report =
                    limit_diagnostics(&diagnostics, self.config.max_reported_diagnostics);
                for message in &report.messages {
                    self.session.notifications.push(message.clone());
                }
                self.session.annotations = report.annotations.into_vec();
                if let Some(summary) = report.summary {
                    self.session.notifications.push(summary);
                }

                crate::log!("compile"; "{} error{}", report.total, plural_s(report.total));
            }
            CompileOutcome::InternalError { message } => {
                self.session.compile_success = false;
                self.session.compile_failure = true;
                self.session.error_count = 1;

                let notice = format!("<{}> internal error:\n{}", self.backend_id, message);
                self.session.notifications.push(notice);

                crate::log!("error"; "<{}> internal error: {}", self.backend_id, message);
            }
        }
    }
}

/// Post-compile steps on a built module: validate, optimize, emit.
///
/// A validation rejection is a source problem and takes the Failure branch;
/// crashes anywhere are internal errors. The module is dropped as soon as
/// both renderings are extracted.
fn finish_module(
    mut module: Box<dyn CompiledModule>,
    options: &CompileOptions,
) -> CompileOutcome {
    if options.validate {
        match module.validate() {
            Ok(()) => {}
            Err(ValidateError::Rejected(diagnostics)) => {
                return CompileOutcome::Failure { diagnostics };
            }
            Err(ValidateError::Crashed(message)) => {
                return CompileOutcome::InternalError { message };
            }
        }
    }

    if options.optimize
        && let Err(error) = module.optimize()
    {
        return CompileOutcome::InternalError {
            message: error.to_string(),
        };
    }

    let text = module.emit_text();
    let binary = module.emit_binary();
    drop(module);

    CompileOutcome::Success { text, binary }
}
