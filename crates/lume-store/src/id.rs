//! Time-ordered ids for saved edits.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Issues millisecond-timestamp ids that strictly increase within a process.
///
/// Two commits inside the same millisecond (or after the clock steps back)
/// get `last + 1` instead of a duplicate.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for an edit created at `now`.
    ///
    /// Returns `None` once the id space is exhausted, e.g. after observing
    /// `i64::MAX` from a hand-edited store.
    pub fn next(&self, now: DateTime<Utc>) -> Option<String> {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                last.checked_add(1).map(|bumped| candidate.max(bumped))
            })
            .ok()?;
        Some(candidate.max(previous.saturating_add(1)).to_string())
    }

    /// Make sure future ids sort after `id` (e.g. ids loaded from storage).
    pub fn observe(&self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last.fetch_max(value, Ordering::AcqRel);
        }
    }
}
