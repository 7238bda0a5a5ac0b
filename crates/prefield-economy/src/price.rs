//! Price-ratio regimes.
//!
//! Each [`Economy`] variant maps the current preference field to the scalar
//! price ratio that feeds the next update. Exchange and decreasing returns
//! close a feedback loop (the ratio moves with aggregate preferences);
//! constant returns pins the ratio and isolates the purely local dynamics.

use prefield_core::{DegenerateField, Field};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An economy parameter outside its admissible range.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{name} must be finite and positive, got {value}")]
pub struct ParameterError {
    /// Parameter name as it appears in configuration.
    pub name: &'static str,
    /// The rejected value.
    pub value: f64,
}

/// Production technology of the economy.
///
/// | Variant | Price ratio |
/// |---|---|
/// | `Exchange { e1, e2 }` | `(e2 · Σ field) / (e1 · Σ (1 − field))` |
/// | `ConstantReturns { ratio }` | `ratio`, whatever the field |
/// | `DecreasingReturns` | `sqrt(Σ field / Σ (1 − field))` |
///
/// # Examples
///
/// ```
/// use prefield_core::Field;
/// use prefield_economy::Economy;
///
/// let field = Field::new(2, vec![0.25, 0.75, 0.5, 0.5]).unwrap();
/// assert_eq!(Economy::exchange(1.0, 1.0).price_ratio(&field).unwrap(), 1.0);
/// assert_eq!(Economy::constant_returns(0.5).price_ratio(&field).unwrap(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Economy {
    /// Pure exchange between two goods with fixed endowments.
    Exchange {
        /// Endowment of good 1.
        e1: f64,
        /// Endowment of good 2.
        e2: f64,
    },
    /// Constant returns to scale: the price ratio is set by technology.
    ConstantReturns {
        /// The fixed price ratio.
        ratio: f64,
    },
    /// Decreasing returns to scale: a damped response to aggregate demand.
    DecreasingReturns,
}

impl Economy {
    /// Exchange economy with endowments `e1` and `e2`.
    pub fn exchange(e1: f64, e2: f64) -> Self {
        Self::Exchange { e1, e2 }
    }

    /// Constant-returns economy with a fixed price ratio.
    pub fn constant_returns(ratio: f64) -> Self {
        Self::ConstantReturns { ratio }
    }

    /// Decreasing-returns economy.
    pub fn decreasing_returns() -> Self {
        Self::DecreasingReturns
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exchange { .. } => "exchange",
            Self::ConstantReturns { .. } => "constant_returns",
            Self::DecreasingReturns => "decreasing_returns",
        }
    }

    /// Check that every parameter is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let check = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ParameterError { name, value })
            }
        };
        match *self {
            Self::Exchange { e1, e2 } => {
                check("e1", e1)?;
                check("e2", e2)
            }
            Self::ConstantReturns { ratio } => check("ratio", ratio),
            Self::DecreasingReturns => Ok(()),
        }
    }

    /// Price ratio implied by `field`.
    ///
    /// # Errors
    ///
    /// - [`DegenerateField::NonFinite`] if the field holds NaN or infinity
    ///   (feedback variants only).
    /// - [`DegenerateField::ZeroComplementMass`] if `Σ(1 − field)` is
    ///   exactly zero.
    /// - [`DegenerateField::NonFinitePriceRatio`] if the ratio itself
    ///   overflows, e.g. for a tiny `e1` or a huge `e2`.
    pub fn price_ratio(&self, field: &Field) -> Result<f64, DegenerateField> {
        let ratio = match *self {
            Self::ConstantReturns { ratio } => ratio,
            Self::Exchange { e1, e2 } => {
                let (mass, complement) = masses(field)?;
                (e2 * mass) / (e1 * complement)
            }
            Self::DecreasingReturns => {
                let (mass, complement) = masses(field)?;
                (mass / complement).sqrt()
            }
        };
        if !ratio.is_finite() {
            return Err(DegenerateField::NonFinitePriceRatio);
        }
        Ok(ratio)
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::exchange(1.0, 1.0)
    }
}

/// `(Σ field, Σ (1 − field))`, rejecting poisoned fields and a zero
/// complement.
fn masses(field: &Field) -> Result<(f64, f64), DegenerateField> {
    if let Some(index) = field.first_non_finite() {
        return Err(DegenerateField::NonFinite { index });
    }
    let complement = field.complement_sum();
    if complement == 0.0 {
        return Err(DegenerateField::ZeroComplementMass);
    }
    Ok((field.sum(), complement))
}
