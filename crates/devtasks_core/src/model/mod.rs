//! Domain model for tasks and user preferences.
//!
//! # Responsibility
//! - Define canonical data structures used by the task store.
//! - Own normalization rules applied to titles and priorities.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` unique within its list.
//! - A constructed `Task` never carries a blank title.

pub mod task;
pub mod theme;
