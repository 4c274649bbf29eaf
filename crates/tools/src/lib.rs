//! Developer Tooling: read-only grid inspection.
//!
//! # Invariants
//! - Tools never mutate engine state.

mod inspector;

pub use inspector::{CellInfo, GridInspector, GridSummary};

pub fn crate_info() -> &'static str {
    "lifegrid-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
