//! Error types shared across the prefield crates.
//!
//! Organised by subsystem: [`FieldError`] for field construction and
//! [`DegenerateField`] for the numerical failures that halt a run.

use thiserror::Error;

/// Errors from constructing a [`Field`](crate::Field).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A field must have at least one cell.
    #[error("field must have at least one cell")]
    EmptyGrid,
    /// The cell buffer does not hold `side * side` values.
    #[error("field of side {side} needs {expected} cells, got {actual}")]
    ShapeMismatch {
        /// Requested grid side.
        side: usize,
        /// `side * side`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

/// A division by zero (or a poisoned value) in the price-ratio or update
/// computation.
///
/// The dynamics are deterministic, so none of these are retried: the run
/// halts at the period where the condition first appears.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DegenerateField {
    /// `Σ(1 − field)` is exactly zero: every agent sits at intensity 1.0
    /// and the price ratio has no denominator.
    #[error("complement mass is zero; price ratio is undefined")]
    ZeroComplementMass,
    /// Both neighbour sums vanish at a cell, leaving the update with a zero
    /// denominator.
    #[error("update denominator is zero at cell ({row}, {col})")]
    ZeroDenominator {
        /// Row of the first offending cell.
        row: usize,
        /// Column of the first offending cell.
        col: usize,
    },
    /// A computed or supplied price ratio is NaN or infinite.
    #[error("price ratio is not finite")]
    NonFinitePriceRatio,
    /// A NaN or infinite value was read or produced.
    #[error("non-finite value at cell {index}")]
    NonFinite {
        /// Row-major index of the first non-finite cell.
        index: usize,
    },
}
