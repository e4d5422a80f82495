//! Kiln - an incremental compile orchestrator for source playgrounds.
//!
//! Kiln decides *when* to compile (debounced edits, explicit requests,
//! settings changes), runs a staged pipeline against a pluggable compiler
//! backend, bounds diagnostics into editor annotations, and publishes an
//! immutable session snapshot the host renders from.
//!
//! ```ignore
//! let mut registry = BackendRegistry::new();
//! registry.register(Box::new(my_backend));
//!
//! let (playground, mut events) =
//!     Playground::spawn(PlaygroundConfig::default(), registry, "AssemblyScript")?;
//! playground.backend_ready().await?;
//! ```

pub mod artifact;
pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod logger;
pub mod notify;
pub mod orchestrator;
pub mod session;
pub mod utils;

pub use artifact::{OutputBundle, export_filename, format_size};
pub use backend::registry::BackendRegistry;
pub use backend::{BackendError, CompileReply, CompiledModule, CompilerBackend, ValidateError};
pub use config::PlaygroundConfig;
pub use diagnostics::{Annotation, AnnotationKind, Diagnostic};
pub use notify::Notification;
pub use orchestrator::handle::{Playground, PlaygroundHandle};
pub use orchestrator::messages::UiEvent;
pub use session::SessionSnapshot;
pub use session::options::{CompileMode, CompileOptions, OptionKey};
pub use session::outcome::CompileOutcome;
pub use session::status::BusyState;
