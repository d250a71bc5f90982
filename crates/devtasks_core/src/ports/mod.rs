//! Injectable collaborator interfaces.
//!
//! # Responsibility
//! - Abstract time, id allocation and blocking user prompts behind traits.
//! - Ship production implementations next to deterministic test doubles.
//!
//! # Invariants
//! - Id generators never hand out the same id twice.

mod clock;
mod id_generator;
mod prompt;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id_generator::{IdGenerator, MonotonicIdGenerator, SequentialIdGenerator};
pub use prompt::{ConfirmationPort, ScriptedConfirmation, ScriptedTextInput, TextInputPort};
