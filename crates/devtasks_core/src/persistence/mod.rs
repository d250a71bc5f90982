//! Persistence contract between the task store and a key-value backend.
//!
//! # Responsibility
//! - Encode and decode the task list under a fixed key.
//! - Read and write the theme preference under its own key.
//!
//! # Invariants
//! - Reads never fail: missing or corrupt data degrades to defaults.
//! - Writes replace the whole stored value.

pub mod gateway;
