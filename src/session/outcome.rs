//! Compile outcome classification.

use crate::diagnostics::Diagnostic;

/// The single terminal result of one pipeline run.
#[derive(Debug)]
pub enum CompileOutcome {
    /// Module built and emitted.
    Success {
        text: String,
        binary: Vec<u8>,
    },
    /// Source rejected with diagnostics (compile or validation).
    Failure {
        diagnostics: Vec<Diagnostic>,
    },
    /// The backend itself failed; not a source problem.
    InternalError {
        message: String,
    },
}
