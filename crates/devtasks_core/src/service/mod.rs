//! UI-facing use-case services.
//!
//! # Responsibility
//! - Hold view state (filter, search) on behalf of front-ends.
//! - Run prompt-guarded flows through injectable ports.

pub mod task_service;
