//! Error types for lattice construction.

use thiserror::Error;

/// Errors arising from lattice construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero cells.
    #[error("lattice must have at least one cell")]
    EmptySpace,
    /// The side length exceeds the supported maximum.
    #[error("lattice side {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// The requested side.
        value: u32,
        /// Maximum supported side.
        max: u32,
    },
}
