use std::time::Duration;

use tokio::time::Instant;

/// Pure debounce scheduler: only handles timing and the trimmed-text
/// short-circuit. No session state access.
pub(super) struct Debounce {
    delay: Duration,
    /// Single pending deadline; re-scheduling replaces it (coalescing).
    deadline: Option<Instant>,
    /// Trimmed text of the last edit that armed the deadline.
    last_trigger_text: String,
}

impl Debounce {
    pub(super) fn new(delay_ms: u64, initial_text: &str) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            deadline: None,
            last_trigger_text: initial_text.trim().to_string(),
        }
    }

    /// Record an edit. Returns false when the trimmed text matches the last
    /// triggering edit, so whitespace-only churn never arms the deadline.
    pub(super) fn note_edit(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if self.last_trigger_text == trimmed {
            return false;
        }
        self.last_trigger_text = trimmed.to_string();
        true
    }

    /// Arm (or re-arm) the single deadline at `now + delay`.
    pub(super) fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Drop any pending deadline. Idempotent.
    pub(super) fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Consume the deadline if it has elapsed.
    pub(super) fn take_if_ready(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Precise sleep duration until the deadline can fire.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(deadline) = self.deadline else {
            return Duration::from_secs(86400);
        };

        deadline
            .saturating_duration_since(Instant::now())
            .max(Duration::from_millis(1))
    }
}
