//! Compiler backend contract.
//!
//! The orchestrator drives compilers through two traits: `CompilerBackend`
//! turns source text into a `CompileReply`, and `CompiledModule` carries the
//! post-compile steps (validate, optimize, emit). Backends live outside this
//! crate; the playground only ever sees these seams.

pub mod probe;
pub mod registry;

use crate::diagnostics::Diagnostic;
use crate::session::options::CompileOptions;
use thiserror::Error;

/// Backend-internal failure. Anything that is not a source-level diagnostic.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend itself crashed or misbehaved.
    #[error("{0}")]
    Crash(String),
}

/// Validation result of a compiled module.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The module is invalid; treated like a compile failure.
    #[error("module validation rejected {} diagnostic(s)", .0.len())]
    Rejected(Vec<Diagnostic>),

    /// The validator itself crashed; treated like a backend crash.
    #[error("{0}")]
    Crashed(String),
}

/// What a backend returns for one compile request.
pub enum CompileReply {
    /// Source compiled into a module, ready for validate/optimize/emit.
    Module(Box<dyn CompiledModule>),
    /// Source was rejected; the diagnostics explain why.
    Rejected(Vec<Diagnostic>),
}

/// A pluggable compiler engine.
///
/// `compile` takes `&mut self` so backends may keep caches or arena state
/// between requests; the orchestrator serializes all calls.
pub trait CompilerBackend: Send {
    /// Stable identifier, e.g. `"AssemblyScript"`. Also the registry key.
    fn id(&self) -> &str;

    /// Human-readable backend version, surfaced in the session snapshot.
    fn version(&self) -> String;

    /// Full recompilation of `source` under `options`.
    fn compile(
        &mut self,
        source: &str,
        options: &CompileOptions,
    ) -> Result<CompileReply, BackendError>;
}

/// A successfully compiled module.
///
/// Release of backend-held resources happens on `Drop`; the pipeline drops
/// the module as soon as text and binary are extracted.
pub trait CompiledModule: Send {
    fn validate(&mut self) -> Result<(), ValidateError>;

    fn optimize(&mut self) -> Result<(), BackendError>;

    /// Textual rendering of the module (e.g. wat).
    fn emit_text(&mut self) -> String;

    /// Binary encoding of the module.
    fn emit_binary(&mut self) -> Vec<u8>;
}
