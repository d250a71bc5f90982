//! Task store: the state reducer over the task list.

use crate::model::task::{normalize_title, Priority, Task, TaskId};
use crate::persistence::gateway::{PersistError, PersistenceGateway};
use crate::ports::{Clock, IdGenerator};
use crate::query::{filter_tasks, TaskFilter, TaskSummary};
use crate::storage::KeyValueStore;
use log::{debug, info, warn};

/// What a state-changing mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added(TaskId),
    Toggled(TaskId),
    Deleted(TaskId),
    Edited(TaskId),
    ClearedCompleted(usize),
}

/// Notification delivered to listeners after each effective mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    /// `false` when the write to storage failed; memory still holds the change.
    pub persisted: bool,
}

type Listener = Box<dyn FnMut(&StoreChange, &[Task])>;

/// Owned task list plus the collaborators needed to mutate it.
pub struct TaskStore<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    tasks: Vec<Task>,
    gateway: PersistenceGateway<S>,
    clock: C,
    ids: G,
    listeners: Vec<Listener>,
    last_persist_error: Option<PersistError>,
}

impl<S, C, G> TaskStore<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    /// Loads the persisted list once and seeds the id generator with it.
    pub fn open(gateway: PersistenceGateway<S>, clock: C, mut ids: G) -> Self {
        let tasks = gateway.load();
        for task in &tasks {
            ids.observe(task.id);
        }
        info!(
            "event=store_open module=store status=ok count={}",
            tasks.len()
        );
        Self {
            tasks,
            gateway,
            clock,
            ids,
            listeners: Vec::new(),
            last_persist_error: None,
        }
    }

    /// Registers a listener invoked after every effective mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreChange, &[Task]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut PersistenceGateway<S> {
        &mut self.gateway
    }

    /// Most recent write failure, cleared by the next successful write.
    pub fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    /// Adds a task at the head of the list.
    ///
    /// Returns `None` without touching state when `title` is blank or no
    /// unused id is left. A missing priority defaults to `Priority::Medium`.
    pub fn add(&mut self, title: &str, priority: Option<Priority>) -> Option<Task> {
        let Some(title) = normalize_title(title) else {
            debug!("event=task_add module=store status=skipped reason=blank_title");
            return None;
        };

        let now = self.clock.now();
        let Some(id) = self.ids.next_id(now) else {
            warn!(
                "event=task_add module=store status=error error_code=ids_exhausted count={}",
                self.tasks.len()
            );
            return None;
        };
        let task = Task {
            id,
            title,
            done: false,
            created_at: now,
            priority: priority.unwrap_or_default(),
        };
        self.tasks.insert(0, task.clone());
        info!(
            "event=task_add module=store status=ok id={} priority={}",
            id, task.priority
        );
        self.commit(ChangeKind::Added(id));
        Some(task)
    }

    /// Like `add`, parsing a raw priority label; invalid labels mean medium.
    pub fn add_with_raw_priority(
        &mut self,
        title: &str,
        raw_priority: Option<&str>,
    ) -> Option<Task> {
        self.add(title, Some(Priority::parse_or_default(raw_priority)))
    }

    /// Flips `done` on the matching task. Returns whether it was found.
    pub fn toggle_done(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=miss id={id}");
            return false;
        };
        task.done = !task.done;
        info!(
            "event=task_toggle module=store status=ok id={} done={}",
            id, task.done
        );
        self.commit(ChangeKind::Toggled(id));
        true
    }

    /// Removes the matching task. Returns whether it was found.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_delete module=store status=miss id={id}");
            return false;
        };
        self.tasks.remove(index);
        info!("event=task_delete module=store status=ok id={id}");
        self.commit(ChangeKind::Deleted(id));
        true
    }

    /// Replaces the title of the matching task.
    ///
    /// Returns `false` when the task is missing or `new_title` is blank.
    pub fn edit_title(&mut self, id: TaskId, new_title: &str) -> bool {
        let Some(title) = normalize_title(new_title) else {
            debug!("event=task_edit module=store status=skipped reason=blank_title id={id}");
            return false;
        };
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_edit module=store status=miss id={id}");
            return false;
        };
        task.title = title;
        info!("event=task_edit module=store status=ok id={id}");
        self.commit(ChangeKind::Edited(id));
        true
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.done)
    }

    /// Removes every completed task and returns how many were removed.
    ///
    /// Runs unconditionally; asking the user first is the caller's job.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_pending);
        let removed = before - self.tasks.len();
        if removed == 0 {
            debug!("event=tasks_clear_completed module=store status=skipped removed=0");
            return 0;
        }
        info!("event=tasks_clear_completed module=store status=ok removed={removed}");
        self.commit(ChangeKind::ClearedCompleted(removed));
        removed
    }

    /// Filtered, searched copy of the list in head-first order.
    ///
    /// `search_term` is trimmed first: a whitespace-only term matches every
    /// task, and `"write "` matches the title `"write"`.
    pub fn query(&self, filter: TaskFilter, search_term: &str) -> Vec<Task> {
        filter_tasks(&self.tasks, filter, search_term)
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::of(&self.tasks)
    }

    fn commit(&mut self, kind: ChangeKind) {
        let persisted = match self.gateway.save(&self.tasks) {
            Ok(()) => {
                self.last_persist_error = None;
                true
            }
            Err(err) => {
                warn!(
                    "event=tasks_save module=store status=error error_code=persist_failed count={} error={}",
                    self.tasks.len(),
                    err
                );
                self.last_persist_error = Some(err);
                false
            }
        };

        let change = StoreChange { kind, persisted };
        for listener in &mut self.listeners {
            listener(&change, &self.tasks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeKind, StoreChange, TaskStore};
    use crate::model::task::{Priority, TaskId};
    use crate::persistence::gateway::PersistenceGateway;
    use crate::ports::{FixedClock, SequentialIdGenerator};
    use crate::query::TaskFilter;
    use crate::storage::MemoryKvStore;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestStore = TaskStore<MemoryKvStore, FixedClock, SequentialIdGenerator>;

    fn empty_store() -> TestStore {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap());
        TaskStore::open(
            PersistenceGateway::new(MemoryKvStore::new()),
            clock,
            SequentialIdGenerator::new(),
        )
    }

    #[test]
    fn add_inserts_at_head_with_defaults() {
        let mut store = empty_store();
        let first = store.add("first", None).unwrap();
        let second = store.add("  second  ", Some(Priority::Low)).unwrap();

        let all = store.query(TaskFilter::All, "");
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(first.priority, Priority::Medium);
        assert_eq!(second.title, "second");
        assert!(!second.done);
    }

    #[test]
    fn raw_priority_falls_back_to_medium() {
        let mut store = empty_store();
        let high = store.add_with_raw_priority("a", Some("high")).unwrap();
        let bogus = store.add_with_raw_priority("b", Some("whenever")).unwrap();
        let missing = store.add_with_raw_priority("c", None).unwrap();

        assert_eq!(high.priority, Priority::High);
        assert_eq!(bogus.priority, Priority::Medium);
        assert_eq!(missing.priority, Priority::Medium);
    }

    #[test]
    fn no_op_mutations_do_not_notify() {
        let mut store = empty_store();
        let seen: Rc<RefCell<Vec<StoreChange>>> = Rc::default();
        let sink = Rc::clone(&seen);
        store.subscribe(move |change, _| sink.borrow_mut().push(*change));

        assert!(store.add(" ", None).is_none());
        assert!(!store.toggle_done(TaskId::new(99)));
        assert!(!store.delete(TaskId::new(99)));
        assert!(!store.edit_title(TaskId::new(99), "x"));
        assert_eq!(store.clear_completed(), 0);
        assert!(seen.borrow().is_empty());

        let task = store.add("real", None).unwrap();
        store.toggle_done(task.id);
        assert_eq!(store.clear_completed(), 1);

        let kinds: Vec<_> = seen.borrow().iter().map(|change| change.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Added(task.id),
                ChangeKind::Toggled(task.id),
                ChangeKind::ClearedCompleted(1)
            ]
        );
        assert!(seen.borrow().iter().all(|change| change.persisted));
    }

    #[test]
    fn listener_sees_post_mutation_list() {
        let mut store = empty_store();
        let lengths: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&lengths);
        store.subscribe(move |_, tasks| sink.borrow_mut().push(tasks.len()));

        let a = store.add("a", None).unwrap();
        store.add("b", None).unwrap();
        store.delete(a.id);

        assert_eq!(*lengths.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn edit_rejects_blank_and_keeps_other_fields() {
        let mut store = empty_store();
        let task = store.add("draft", Some(Priority::High)).unwrap();
        store.toggle_done(task.id);

        assert!(!store.edit_title(task.id, "   "));
        assert_eq!(store.get(task.id).unwrap().title, "draft");

        assert!(store.edit_title(task.id, "  final "));
        let edited = store.get(task.id).unwrap();
        assert_eq!(edited.title, "final");
        assert!(edited.done);
        assert_eq!(edited.priority, Priority::High);
        assert_eq!(edited.created_at, task.created_at);
    }
}
