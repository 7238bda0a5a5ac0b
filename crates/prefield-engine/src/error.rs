//! Run-level error types.
//!
//! [`SimError`] is what a single driver call reports. [`Halted`] is what a
//! whole run reports: the error plus everything recorded before it.

use std::fmt;

use prefield_core::{DegenerateField, Period};
use thiserror::Error;

use crate::config::ConfigError;
use crate::series::Trajectory;

/// Where in a run a degenerate field was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Computing the price ratio of the initial field.
    Initial,
    /// Updating the field or recomputing the ratio during a period.
    Period(Period),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial price ratio"),
            Self::Period(p) => write!(f, "period {}", p.0),
        }
    }
}

/// Errors reported by the simulation driver.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// Configuration, initial field, or checkpoints failed validation.
    /// Nothing was computed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// A price-ratio or update denominator vanished (or a value went
    /// non-finite). The run halts at `stage`.
    #[error("degenerate field at {stage}: {source}")]
    DegenerateField {
        /// Where the condition was detected.
        stage: Stage,
        /// The numerical failure.
        #[source]
        source: DegenerateField,
    },
    /// The driver was stepped before being given an initial field.
    #[error("simulation has no initial field")]
    NotInitialized,
    /// The driver was given a second initial field.
    #[error("simulation is already initialized")]
    AlreadyInitialized,
}

/// A run that stopped before completing, with everything recorded so far.
///
/// For [`SimError::InvalidConfiguration`] the trajectory is always empty.
#[derive(Debug, PartialEq, Error)]
#[error("run halted after {} recorded periods: {error}", .trajectory.series.len())]
pub struct Halted {
    /// Why the run stopped.
    #[source]
    pub error: SimError,
    /// Time series and snapshots accumulated before the failure.
    pub trajectory: Trajectory,
}
