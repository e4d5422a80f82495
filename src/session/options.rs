//! Compile options and modes.

use serde::{Deserialize, Serialize};

/// Per-request compiler switches.
///
/// These are session defaults; the stdlib probe may upgrade `stdlib` for a
/// single request without touching the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Link the standard library.
    pub stdlib: bool,
    /// Validate the compiled module before emit.
    pub validate: bool,
    /// Run the optimizer before emit.
    pub optimize: bool,
    /// 64-bit address space instead of 32-bit.
    pub wide_address_mode: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            stdlib: false,
            validate: true,
            optimize: true,
            wide_address_mode: false,
        }
    }
}

/// Which option a settings change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Stdlib,
    Validate,
    Optimize,
    WideAddressMode,
}

impl CompileOptions {
    pub fn set(&mut self, key: OptionKey, value: bool) {
        match key {
            OptionKey::Stdlib => self.stdlib = value,
            OptionKey::Validate => self.validate = value,
            OptionKey::Optimize => self.optimize = value,
            OptionKey::WideAddressMode => self.wide_address_mode = value,
        }
    }
}

/// How compiles get triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompileMode {
    /// Debounced compile after every meaningful edit; notifications
    /// suppressed.
    #[default]
    Auto,
    /// Compile only on explicit request.
    Manual,
    /// Declared but not supported; triggering it does nothing.
    Decompile,
}
