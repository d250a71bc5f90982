//! Task use-case service.
//!
//! # Invariants
//! - Prompts are consulted only when the operation could have an effect.
//! - Declined or cancelled prompts leave the store untouched.

use crate::model::task::{Task, TaskId};
use crate::ports::{Clock, ConfirmationPort, IdGenerator, TextInputPort};
use crate::query::{TaskFilter, TaskSummary};
use crate::storage::KeyValueStore;
use crate::store::task_store::TaskStore;

pub const CLEAR_COMPLETED_PROMPT: &str = "Remove all completed tasks?";
pub const EDIT_TITLE_PROMPT: &str = "Edit task title:";

/// Result of a confirmation-guarded clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    NothingToClear,
    Declined,
    Cleared(usize),
}

/// Result of a prompt-driven title edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    NotFound,
    Cancelled,
    Rejected,
    Applied,
}

/// Store wrapper carrying the current list view.
pub struct TaskService<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    store: TaskStore<S, C, G>,
    filter: TaskFilter,
    search: String,
}

impl<S, C, G> TaskService<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    pub fn new(store: TaskStore<S, C, G>) -> Self {
        Self {
            store,
            filter: TaskFilter::All,
            search: String::new(),
        }
    }

    pub fn store(&self) -> &TaskStore<S, C, G> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S, C, G> {
        &mut self.store
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Tasks matching the current filter and search term.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.store.query(self.filter, &self.search)
    }

    pub fn summary(&self) -> TaskSummary {
        self.store.summary()
    }

    /// Clears completed tasks after the user confirms.
    pub fn clear_completed_with(&mut self, confirm: &mut dyn ConfirmationPort) -> ClearOutcome {
        if !self.store.has_completed() {
            return ClearOutcome::NothingToClear;
        }
        if !confirm.confirm(CLEAR_COMPLETED_PROMPT) {
            return ClearOutcome::Declined;
        }
        ClearOutcome::Cleared(self.store.clear_completed())
    }

    /// Asks for a new title, pre-filled with the current one, and applies it.
    pub fn edit_title_with(&mut self, id: TaskId, input: &mut dyn TextInputPort) -> EditOutcome {
        let Some(current) = self.store.get(id).map(|task| task.title.clone()) else {
            return EditOutcome::NotFound;
        };
        let Some(answer) = input.prompt(EDIT_TITLE_PROMPT, &current) else {
            return EditOutcome::Cancelled;
        };
        if self.store.edit_title(id, &answer) {
            EditOutcome::Applied
        } else {
            EditOutcome::Rejected
        }
    }
}
