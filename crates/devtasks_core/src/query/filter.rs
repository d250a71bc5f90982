//! Filter/search predicate and summary counters.

use crate::model::task::Task;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Completion-status selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Done,
}

impl TaskFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }

    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.done,
            Self::Done => task.done,
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            other => Err(format!(
                "unsupported filter `{other}`; expected all|pending|done"
            )),
        }
    }
}

/// Applies `filter` and a case-insensitive title search.
///
/// The term is trimmed before matching, so a whitespace-only term matches
/// every task and `"write "` matches the title `"write"`.
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter, search_term: &str) -> Vec<Task> {
    let needle = search_term.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.accepts(task))
        .filter(|task| needle.is_empty() || task.title_contains_lowercase(&needle))
        .cloned()
        .collect()
}

/// Total and pending counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub pending: usize,
}

impl TaskSummary {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            pending: tasks.iter().filter(|task| task.is_pending()).count(),
        }
    }

    pub fn done(&self) -> usize {
        self.total - self.pending
    }

    /// Human-readable counter line.
    pub fn label(&self) -> String {
        if self.total == 0 {
            "No tasks".to_string()
        } else if self.pending == 0 {
            format!("{} task(s), all done", self.total)
        } else {
            format!("{} pending of {} task(s)", self.pending, self.total)
        }
    }
}
