//! Read-side projections over a task list.
//!
//! # Responsibility
//! - Select tasks by completion status and title search.
//! - Compute counters shown next to the list.
//!
//! # Invariants
//! - Projections never mutate the input list.
//! - Result order matches input order.

pub mod filter;

pub use filter::{filter_tasks, TaskFilter, TaskSummary};
