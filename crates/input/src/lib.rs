//! Input: device-level events mapped to discrete actions on the engine.
//!
//! # Invariants
//! - The engine consumes actions, never raw device events.
//! - Coordinates are produced here but validated by the engine; an imprecise
//!   projection yields a refused paint, not a crash.

pub mod action;
pub mod mapper;

pub use action::{Action, ActionSink, dispatch};
pub use mapper::{Button, InputEvent, InputMapper, Key, cell_at};

pub fn crate_info() -> &'static str {
    "lifegrid-input v0.1.0"
}
