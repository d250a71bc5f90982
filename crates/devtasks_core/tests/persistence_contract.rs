use chrono::{TimeZone, Utc};
use devtasks_core::{
    decode_tasks, encode_tasks, open_task_store, ChangeKind, FixedClock, KeyValueStore,
    MemoryKvStore, PersistError, PersistenceGateway, Priority, SequentialIdGenerator,
    SqliteKvStore, StorageError, Task, TaskFilter, TaskId, TaskStore, Theme, TASKS_KEY,
    THEME_KEY,
};
use std::cell::Cell;
use std::rc::Rc;

fn sample_tasks() -> Vec<Task> {
    let at = Utc.with_ymd_and_hms(2026, 7, 4, 18, 30, 0).unwrap();
    let mut done = Task::new(TaskId::new(3), "Done thing", Priority::Low, at).unwrap();
    done.done = true;
    vec![
        done,
        Task::new(TaskId::new(2), "Pending thing", Priority::High, at).unwrap(),
        Task::new(TaskId::new(1), "Old thing", Priority::Medium, at).unwrap(),
    ]
}

#[test]
fn save_then_load_returns_same_list() {
    let tasks = sample_tasks();
    let mut gateway = PersistenceGateway::new(MemoryKvStore::new());

    gateway.save(&tasks).unwrap();
    assert_eq!(gateway.load(), tasks);
}

#[test]
fn load_normalizes_legacy_records_without_priority() {
    let legacy = r#"[
        {"id":1718000000000,"title":"from the old app","done":true,"createdAt":"2024-06-10T06:13:20.000Z"}
    ]"#;
    let gateway = PersistenceGateway::new(MemoryKvStore::seeded([(TASKS_KEY, legacy)]));

    let tasks = gateway.load();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, TaskId::new(1_718_000_000_000));
    assert_eq!(tasks[0].priority, Priority::Medium);
    assert!(tasks[0].done);
}

#[test]
fn malformed_payloads_load_as_empty() {
    for payload in ["", "null", "{}", "[1,2,3]", "[{\"title\":\"no id\"}]", "\u{0}garbage"] {
        let gateway = PersistenceGateway::new(MemoryKvStore::seeded([(TASKS_KEY, payload)]));
        assert!(gateway.load().is_empty(), "payload {payload:?} should load empty");
    }
}

#[test]
fn missing_key_loads_as_empty() {
    let gateway = PersistenceGateway::new(MemoryKvStore::new());
    assert!(gateway.load().is_empty());
    assert_eq!(gateway.load_theme_preference(), Theme::Dark);
}

#[test]
fn save_overwrites_previous_value_wholesale() {
    let mut gateway = PersistenceGateway::new(MemoryKvStore::new());
    gateway.save(&sample_tasks()).unwrap();
    gateway.save(&sample_tasks()[..1]).unwrap();

    let stored = gateway.store().get(TASKS_KEY).unwrap().unwrap();
    assert_eq!(decode_tasks(&stored).unwrap().len(), 1);
    assert_eq!(stored, encode_tasks(&sample_tasks()[..1]).unwrap());
}

#[test]
fn quota_failure_keeps_memory_authoritative() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 7, 4, 18, 30, 0).unwrap());
    let mut store = TaskStore::open(
        PersistenceGateway::new(MemoryKvStore::with_quota(160)),
        clock,
        SequentialIdGenerator::new(),
    );
    let unsaved = Rc::new(Cell::new(0));
    let counter = Rc::clone(&unsaved);
    store.subscribe(move |change, _| {
        if !change.persisted {
            counter.set(counter.get() + 1);
        }
    });

    let first = store.add("fits", None).unwrap();
    assert!(store.last_persist_error().is_none());
    let stored_before = store.gateway().store().get(TASKS_KEY).unwrap();

    let second = store.add(&"x".repeat(200), None).unwrap();
    assert!(matches!(
        store.last_persist_error(),
        Some(PersistError::Storage(StorageError::QuotaExceeded { .. }))
    ));
    assert_eq!(unsaved.get(), 1);

    let visible: Vec<_> = store
        .query(TaskFilter::All, "")
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(visible, vec![second.id, first.id]);
    assert_eq!(store.gateway().store().get(TASKS_KEY).unwrap(), stored_before);

    assert!(store.delete(second.id));
    assert!(store.last_persist_error().is_none());
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devtasks.db");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap());

    let saved = {
        let mut store = TaskStore::open(
            PersistenceGateway::new(SqliteKvStore::open(&path).unwrap()),
            clock,
            SequentialIdGenerator::new(),
        );
        store.add("persisted", Some(Priority::High)).unwrap();
        let done = store.add("finished", None).unwrap();
        store.toggle_done(done.id);
        store
            .gateway_mut()
            .save_theme_preference(Theme::Light)
            .unwrap();
        store.tasks().to_vec()
    };

    let mut reopened = TaskStore::open(
        PersistenceGateway::new(SqliteKvStore::open(&path).unwrap()),
        clock,
        SequentialIdGenerator::new(),
    );
    assert_eq!(reopened.tasks(), saved.as_slice());
    assert_eq!(reopened.gateway().load_theme_preference(), Theme::Light);

    let next = reopened.add("after reopen", None).unwrap();
    assert!(saved.iter().all(|task| task.id < next.id));
}

#[test]
fn sqlite_quota_is_reported_as_storage_error() {
    let kv = SqliteKvStore::open_in_memory()
        .unwrap()
        .with_max_value_bytes(16);
    let mut gateway = PersistenceGateway::new(kv);

    let err = gateway.save(&sample_tasks()).unwrap_err();
    assert!(matches!(
        err,
        PersistError::Storage(StorageError::QuotaExceeded { limit_bytes: 16, .. })
    ));
    assert!(gateway.store().get(TASKS_KEY).unwrap().is_none());

    gateway.save_theme_preference(Theme::Light).unwrap();
    assert_eq!(
        gateway.store().get(THEME_KEY).unwrap().as_deref(),
        Some("light")
    );
}

#[test]
fn change_kinds_report_counts() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 7, 4, 18, 30, 0).unwrap());
    let mut store = TaskStore::open(
        PersistenceGateway::new(MemoryKvStore::new()),
        clock,
        SequentialIdGenerator::new(),
    );
    let last = Rc::new(Cell::new(None));
    let sink = Rc::clone(&last);
    store.subscribe(move |change, _| sink.set(Some(change.kind)));

    for title in ["a", "b", "c"] {
        let task = store.add(title, None).unwrap();
        store.toggle_done(task.id);
    }
    store.clear_completed();
    assert_eq!(last.get(), Some(ChangeKind::ClearedCompleted(3)));
}

#[test]
fn add_is_refused_when_loaded_id_sits_at_the_ceiling() {
    let payload = format!(
        r#"[{{"id":{},"title":"last slot","done":false,"createdAt":"2026-07-04T18:30:00Z"}}]"#,
        u64::MAX
    );
    let kv = MemoryKvStore::seeded([(TASKS_KEY, payload.as_str())]);
    let mut store = open_task_store(kv);
    assert_eq!(store.tasks()[0].id, TaskId::new(u64::MAX));
    let stored_before = store.gateway().store().get(TASKS_KEY).unwrap();

    assert!(store.add("new", None).is_none());

    let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![TaskId::new(u64::MAX)]);
    assert_eq!(store.gateway().store().get(TASKS_KEY).unwrap(), stored_before);
    assert!(store.last_persist_error().is_none());
}
