/// Errors raised by the grid and engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifeError {
    /// A coordinate outside `[0, size)` on either axis.
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },
    /// Construction parameters that cannot produce a usable grid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl LifeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_cell_and_size() {
        let e = LifeError::OutOfBounds { x: -1, y: 3, size: 10 };
        let msg = e.to_string();
        assert!(msg.contains("(-1, 3)"));
        assert!(msg.contains("10x10"));
    }

    #[test]
    fn invalid_helper() {
        assert_eq!(
            LifeError::invalid("gridSize must be positive"),
            LifeError::InvalidConfiguration("gridSize must be positive".into())
        );
    }
}
