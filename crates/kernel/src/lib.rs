//! Life Kernel: authoritative grid state, the transition rule, gated ticking.
//!
//! # Invariants
//! - A tick reads only the current generation and publishes the next one in a
//!   single buffer swap.
//! - Paints and ticks never interleave: each is applied whole.
//! - All state changes are recorded in the engine's event log, or the log
//!   is collapsed into a single `Resync` once it reaches its capacity.

pub mod engine;
pub mod grid;
pub mod patterns;
pub mod rule;
pub mod shared;

pub use engine::{ChangeCause, LifeEngine, LifeEvent, MIN_EVENT_CAPACITY, TickOutcome};
pub use grid::GridStore;
pub use patterns::{PATTERNS, Pattern};
pub use shared::SharedEngine;

pub fn crate_info() -> &'static str {
    "lifegrid-kernel v0.1.0"
}
