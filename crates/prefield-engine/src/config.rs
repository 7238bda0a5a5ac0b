//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is immutable for the life of a run.
//! [`validate()`](SimulationConfig::validate) checks every parameter once,
//! before any computation; the driver additionally checks the initial field
//! and the requested checkpoints against it.

use prefield_core::{Field, Period};
use prefield_economy::{Economy, ParameterError};
use prefield_space::{SpaceError, Square8};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a configuration or its inputs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid side is zero or too large.
    #[error("lattice: {0}")]
    Space(#[from] SpaceError),
    /// Adjustment speed is NaN, infinite, or outside `[0, 1]`.
    #[error("speed must be finite and within [0, 1], got {value}")]
    InvalidSpeed {
        /// The invalid value.
        value: f64,
    },
    /// An economy parameter is not finite and positive.
    #[error("economy: {0}")]
    Economy(#[from] ParameterError),
    /// The initial field does not match the configured grid side.
    #[error("initial field has side {actual}, configuration expects {expected}")]
    InitialFieldSize {
        /// Configured side.
        expected: usize,
        /// Side of the supplied field.
        actual: usize,
    },
    /// An initial field value lies outside `[0, 1]` or is not finite.
    #[error("initial field value {value} at cell {index} is outside [0, 1]")]
    InitialFieldOutOfRange {
        /// Row-major index of the first offending cell.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A snapshot checkpoint lies beyond the last period.
    #[error("checkpoint {period} is beyond the last period of a {periods}-period run")]
    CheckpointOutOfRange {
        /// The requested checkpoint.
        period: Period,
        /// Configured period count.
        periods: u64,
    },
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete parameter set for one run.
///
/// The default is the headline exchange-economy run: a 50×50 lattice,
/// `r = 0.5`, 250 periods, endowments `e1 = e2 = 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Grid side `N`; the lattice holds `N * N` agents.
    pub side: u32,
    /// Adjustment speed `r`, in `[0, 1]`.
    pub speed: f64,
    /// Number of periods `T` to simulate. Zero is allowed.
    pub periods: u64,
    /// Production technology and its parameters.
    pub economy: Economy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            side: 50,
            speed: 0.5,
            periods: 250,
            economy: Economy::default(),
        }
    }
}

impl SimulationConfig {
    /// Largest accepted adjustment speed.
    pub const MAX_SPEED: f64 = 1.0;

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid must be non-empty and fit the lattice bounds.
        Square8::new(self.side)?;
        // 2. Speed must be finite and in [0, MAX_SPEED].
        if !self.speed.is_finite() || !(0.0..=Self::MAX_SPEED).contains(&self.speed) {
            return Err(ConfigError::InvalidSpeed { value: self.speed });
        }
        // 3. Economy parameters must be finite and positive.
        self.economy.validate()?;
        Ok(())
    }

    /// Check that `field` can seed this run: right side, values in `[0, 1]`.
    pub fn validate_initial_field(&self, field: &Field) -> Result<(), ConfigError> {
        let expected = self.side as usize;
        if field.side() != expected {
            return Err(ConfigError::InitialFieldSize {
                expected,
                actual: field.side(),
            });
        }
        if let Some(index) = field.first_outside_unit_interval() {
            let value = field.as_slice().get(index).copied().unwrap_or(f64::NAN);
            return Err(ConfigError::InitialFieldOutOfRange { index, value });
        }
        Ok(())
    }

    /// Check that every checkpoint names a period of this run.
    pub fn validate_checkpoints(&self, checkpoints: &[Period]) -> Result<(), ConfigError> {
        match checkpoints.iter().find(|p| p.0 >= self.periods) {
            Some(&period) => Err(ConfigError::CheckpointOutOfRange {
                period,
                periods: self.periods,
            }),
            None => Ok(()),
        }
    }
}
