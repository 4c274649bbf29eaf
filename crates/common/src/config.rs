//! Simulation configuration.
//!
//! Field names on disk are camelCase (`gridSize`, `tickIntervalSeconds`,
//! `initialAliveProbability`, `seed`). Every field has a default, so an empty
//! JSON object is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::LifeError;

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] LifeError),
}

/// Construction and scheduling parameters for a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LifeConfig {
    /// Side length N of the N×N grid. Signed so that a negative value in a
    /// file is reported as invalid configuration rather than a parse error.
    pub grid_size: i64,
    /// Wall-clock period between scheduled ticks.
    pub tick_interval_seconds: f64,
    /// Probability that each cell starts alive.
    pub initial_alive_probability: f64,
    /// Seed for the initial state. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            tick_interval_seconds: 0.5,
            initial_alive_probability: 0.5,
            seed: None,
        }
    }
}

impl LifeConfig {
    /// Check every field, failing on the first violation.
    pub fn validate(&self) -> Result<(), LifeError> {
        self.grid_side()?;
        validate_probability(self.initial_alive_probability)?;
        self.tick_interval()?;
        Ok(())
    }

    /// Grid side length as an index type.
    pub fn grid_side(&self) -> Result<usize, LifeError> {
        let side = usize::try_from(self.grid_size).map_err(|_| {
            LifeError::invalid(format!(
                "gridSize must be greater than 0, got {}",
                self.grid_size
            ))
        })?;
        validate_grid_size(side)?;
        Ok(side)
    }

    /// Tick period as a `Duration`.
    ///
    /// Fails for values that are not positive, not finite, too large for a
    /// `Duration`, or so small they round to zero.
    pub fn tick_interval(&self) -> Result<Duration, LifeError> {
        match Duration::try_from_secs_f64(self.tick_interval_seconds) {
            Ok(d) if !d.is_zero() => Ok(d),
            _ => Err(LifeError::invalid(format!(
                "tickIntervalSeconds must be a positive, representable number of seconds, got {}",
                self.tick_interval_seconds
            ))),
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}

/// Grid sides must be positive and addressable with `i32` coordinates.
pub fn validate_grid_size(size: usize) -> Result<(), LifeError> {
    if size == 0 {
        return Err(LifeError::invalid("gridSize must be greater than 0"));
    }
    if i32::try_from(size).is_err() {
        return Err(LifeError::invalid(format!(
            "gridSize {size} exceeds the addressable coordinate range"
        )));
    }
    Ok(())
}

pub fn validate_probability(p: f64) -> Result<(), LifeError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(LifeError::invalid(format!(
            "initialAliveProbability must be within [0, 1], got {p}"
        )));
    }
    Ok(())
}
