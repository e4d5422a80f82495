//! Diagnostic bounding and editor annotations.
//!
//! Backends report diagnostics as opaque message strings. The only structured
//! fact extracted here is the first parenthesized `(line,column)` locator,
//! which maps onto a zero-based editor row. `limit_diagnostics` bounds the
//! per-cycle volume so one bad edit cannot flood the notification queue.

use serde::Serialize;
use smallvec::SmallVec;
use std::sync::LazyLock;

use regex::Regex;

/// First parenthesized group of a diagnostic message, e.g. `(3,14)`.
static LOCATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

/// An opaque diagnostic message produced by a compiler backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic(pub String);

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Severity of an editor annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Error,
    Warning,
    Info,
}

/// A gutter marker the editor renders next to a source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Zero-based editor row.
    pub row: u32,
    pub kind: AnnotationKind,
    pub text: String,
}

/// Extract an error annotation from a diagnostic message.
///
/// The row comes from the first number of the first parenthesized locator,
/// converted from one-based to zero-based. Messages without a usable locator
/// (missing, non-numeric, or line zero) carry no annotation; the diagnostic
/// itself is still reported through the notification queue.
pub fn annotation_for(message: &str) -> Option<Annotation> {
    let captures = LOCATOR.captures(message)?;
    let locator = captures.get(1)?.as_str();
    let line: u32 = locator.split(',').next()?.trim().parse().ok()?;
    let row = line.checked_sub(1)?;

    Some(Annotation {
        row,
        kind: AnnotationKind::Error,
        text: message.to_string(),
    })
}

/// A bounded view over one compile cycle's diagnostics.
#[derive(Debug, Default)]
pub struct LimitedReport {
    /// Messages to surface, in compiler order, at most `max`.
    pub messages: Vec<String>,
    /// Annotations for the surfaced messages that carried a locator.
    pub annotations: SmallVec<[Annotation; 8]>,
    /// Summary line, present only when diagnostics were dropped.
    pub summary: Option<String>,
    /// True diagnostic count before capping.
    pub total: usize,
}

/// Bound a diagnostic list to `max` surfaced entries.
///
/// Order is preserved. When the list is longer than `max`, the overflow is
/// collapsed into a single `Too many errors (N)` summary carrying the true
/// total; diagnostics beyond the cap produce neither messages nor
/// annotations.
pub fn limit_diagnostics(diagnostics: &[Diagnostic], max: usize) -> LimitedReport {
    let total = diagnostics.len();
    let mut report = LimitedReport {
        total,
        ..LimitedReport::default()
    };

    for diagnostic in diagnostics.iter().take(max) {
        if let Some(annotation) = annotation_for(diagnostic.message()) {
            report.annotations.push(annotation);
        }
        report.messages.push(diagnostic.message().to_string());
    }

    if total > max {
        report.summary = Some(format!("Too many errors ({total})"));
    }

    report
}
