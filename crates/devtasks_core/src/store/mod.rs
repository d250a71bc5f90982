//! In-memory task state and its mutations.
//!
//! # Responsibility
//! - Own the ordered task list for the process lifetime.
//! - Apply add/toggle/delete/edit/clear transitions and persist after each.
//! - Notify subscribers when state changes.
//!
//! # Invariants
//! - Effective mutations are persisted before the mutator returns.
//! - Persistence failure never rolls back the in-memory change.
//! - No-op calls neither persist nor notify.

pub mod task_store;
