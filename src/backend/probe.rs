//! Standard-library requirement probe.
//!
//! Cheap textual scan deciding whether a source snippet references runtime
//! library facilities. When it fires and the session's `stdlib` option is
//! off, the option is upgraded for that single request only.

use regex::Regex;
use std::sync::LazyLock;

/// Library namespaces whose member access or call implies stdlib linkage.
static STDLIB_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Math|Array|String|Set|Map|Memory|console)\s*[.(]").unwrap()
});

/// True when `source` appears to use the standard library.
pub fn requires_stdlib(source: &str) -> bool {
    STDLIB_USE.is_match(source)
}
