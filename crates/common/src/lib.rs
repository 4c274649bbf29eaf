//! Shared types for the lifegrid workspace.
//!
//! # Invariants
//! - Coordinates are signed at every public surface so that off-grid requests
//!   stay representable and can be rejected explicitly.
//! - A `LifeConfig` that passed `validate()` always builds a usable grid.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigError, LifeConfig};
pub use error::LifeError;
pub use types::CellCoord;

pub fn crate_info() -> &'static str {
    "lifegrid-common v0.1.0"
}
