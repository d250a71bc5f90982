//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its priority levels.
//! - Normalize titles and priorities at every construction boundary.
//!
//! # Invariants
//! - `title` is trimmed and never empty.
//! - `priority` always decodes to a valid level; unknown or missing values
//!   fall back to `Priority::Medium`.
//! - `created_at` is fixed at creation and never rewritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Stable lookup key for a task.
///
/// Serialized as a bare integer to stay compatible with timestamp-derived
/// ids written by earlier versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Importance level attached to a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parses a stored or user-supplied priority string.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Parses a priority, falling back to `Medium` when absent or invalid.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// Legacy payloads may carry no priority, `null`, a number, or an unknown
// label. All of them decode to the default level instead of failing.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Priority::parse_or_default(raw.as_str()))
    }
}

/// Canonical to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Creates a pending task.
    ///
    /// Returns `None` when `title` is blank after trimming.
    pub fn new(
        id: TaskId,
        title: &str,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let title = normalize_title(title)?;
        Some(Self {
            id,
            title,
            done: false,
            created_at,
            priority,
        })
    }

    pub fn is_pending(&self) -> bool {
        !self.done
    }

    /// Case-insensitive substring match against the title.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn title_contains_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

/// Trims a title, returning `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, Priority, Task, TaskId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn normalize_title_trims_and_rejects_blank() {
        assert_eq!(normalize_title("  ship it \n").as_deref(), Some("ship it"));
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title(" \t "), None);
    }

    #[test]
    fn priority_parse_is_lenient_on_case_and_whitespace() {
        assert_eq!(Priority::parse(" HIGH "), Some(Priority::High));
        assert_eq!(Priority::parse("low"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(Priority::parse_or_default(None), Priority::Medium);
        assert_eq!(Priority::parse_or_default(Some("urgent")), Priority::Medium);
    }

    #[test]
    fn new_task_rejects_blank_title() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert!(Task::new(TaskId::new(1), "   ", Priority::High, now).is_none());

        let task = Task::new(TaskId::new(1), "  Write spec ", Priority::High, now).unwrap();
        assert_eq!(task.title, "Write spec");
        assert!(task.is_pending());
        assert_eq!(task.created_at, now);
    }

    #[test]
    fn title_match_ignores_case() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let task = Task::new(TaskId::new(7), "Buy Milk", Priority::Low, now).unwrap();
        assert!(task.title_contains_lowercase("milk"));
        assert!(!task.title_contains_lowercase("bread"));
    }
}
