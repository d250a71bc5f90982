//! Task id allocation.
//!
//! Ids derived from a timestamp alone collide when two tasks are created
//! within the same millisecond. `MonotonicIdGenerator` keeps the timestamp
//! shape of legacy ids but bumps past the last issued value.

use crate::model::task::TaskId;
use chrono::{DateTime, Utc};

/// Allocates unique task ids.
pub trait IdGenerator {
    /// Returns an id strictly greater than every id previously returned or
    /// passed to `observe`, or `None` once the id space is exhausted.
    fn next_id(&mut self, now: DateTime<Utc>) -> Option<TaskId>;

    /// Informs the generator about an id that already exists, such as one
    /// loaded from storage.
    fn observe(&mut self, existing: TaskId);
}

/// Timestamp-seeded generator: `max(now_millis, last + 1)`.
#[derive(Debug, Clone, Default)]
pub struct MonotonicIdGenerator {
    last: Option<u64>,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&mut self, now: DateTime<Utc>) -> Option<TaskId> {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next = match self.last {
            Some(last) => millis.max(last.checked_add(1)?),
            None => millis,
        };
        self.last = Some(next);
        Some(TaskId::new(next))
    }

    fn observe(&mut self, existing: TaskId) {
        let value = existing.get();
        if self.last.map_or(true, |last| value > last) {
            self.last = Some(value);
        }
    }
}

/// Counter starting at 1, ignoring the clock. Used by tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    last: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, _now: DateTime<Utc>) -> Option<TaskId> {
        self.last = self.last.checked_add(1)?;
        Some(TaskId::new(self.last))
    }

    fn observe(&mut self, existing: TaskId) {
        self.last = self.last.max(existing.get());
    }
}
