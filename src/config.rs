//! Playground configuration.
//!
//! Contains the tunables of the compile orchestrator. The embedding host
//! passes overrides as a JSON object; missing fields keep their defaults.
//!
//! # Example
//!
//! ```json
//! {
//!     "auto_compile_delay_ms": 400,
//!     "max_reported_diagnostics": 8,
//!     "notification_dismiss_ms": 5000
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Default sample source loaded into a fresh session.
pub const SAMPLE_SOURCE: &str = "export function fib(num: int32): int32 {
    if (num <= 1) return 1;
    return fib(num - 1) + fib(num - 2);
}";

/// Orchestrator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Delay between the last edit and the auto-triggered compile.
    pub auto_compile_delay_ms: u64,

    /// Upper bound on diagnostics surfaced per compile cycle.
    pub max_reported_diagnostics: usize,

    /// How long a notification stays up before auto-dismissal.
    pub notification_dismiss_ms: u64,

    /// Source text a fresh session starts with.
    pub sample_source: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            auto_compile_delay_ms: 800,
            max_reported_diagnostics: 8,
            notification_dismiss_ms: 5000,
            sample_source: SAMPLE_SOURCE.to_string(),
        }
    }
}

impl PlaygroundConfig {
    /// Parse host-provided overrides from a JSON object.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
