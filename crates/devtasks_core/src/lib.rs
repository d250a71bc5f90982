//! Core domain logic for DevTasks.
//! This crate is the single source of truth for task list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod ports;
pub mod query;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Priority, Task, TaskId};
pub use model::theme::Theme;
pub use persistence::gateway::{
    decode_tasks, encode_tasks, DecodeError, PersistError, PersistenceGateway, TASKS_KEY,
    THEME_KEY,
};
pub use ports::{
    Clock, ConfirmationPort, FixedClock, IdGenerator, MonotonicIdGenerator, ScriptedConfirmation,
    ScriptedTextInput, SequentialIdGenerator, SystemClock, TextInputPort,
};
pub use query::{TaskFilter, TaskSummary};
pub use service::task_service::{ClearOutcome, EditOutcome, TaskService};
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use store::task_store::{ChangeKind, StoreChange, TaskStore};

/// Store wired with production collaborators.
pub type DefaultTaskStore<S> = TaskStore<S, SystemClock, MonotonicIdGenerator>;

/// Opens a task store over `store` using the system clock and monotonic ids.
pub fn open_task_store<S: KeyValueStore>(store: S) -> DefaultTaskStore<S> {
    TaskStore::open(
        PersistenceGateway::new(store),
        SystemClock,
        MonotonicIdGenerator::new(),
    )
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
