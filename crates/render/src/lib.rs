//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read engine state; they never mutate it.
//! - Drawable handles live on the rendering side, indexed by the same
//!   coordinates as the grid. The kernel never sees them.

mod handles;
mod text;

pub use handles::{CellHandles, CellMaterial};
pub use text::{Renderer, TextRenderer};

pub fn crate_info() -> &'static str {
    "lifegrid-render v0.1.0"
}
