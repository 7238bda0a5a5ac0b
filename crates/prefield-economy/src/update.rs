//! The preference update rule.
//!
//! For every agent `i`, with `S` the Moore-neighbour sum operator:
//!
//! ```text
//! numerator   = S(field)[i]
//! denominator = numerator + price_ratio * S(1 - field)[i]
//! next[i]     = clamp(field[i] + r * (numerator / denominator - 0.5), 0, 1)
//! ```
//!
//! `numerator / denominator` is the locally perceived attractiveness of
//! raising one's intensity; 0.5 is indifference. Both neighbour sums are
//! taken over the `field` argument itself, so [`step`] is a pure function
//! of its inputs.

use prefield_core::{DegenerateField, Field};
use prefield_space::aggregate;

/// A new field plus the number of cells the clamp pulled back into `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOutcome {
    /// The next-period field; every value lies in `[0, 1]`.
    pub field: Field,
    /// Cells whose raw update fell below 0.
    pub clamped_low: usize,
    /// Cells whose raw update rose above 1.
    pub clamped_high: usize,
}

/// Advance `field` by one period at the given price ratio and speed.
///
/// # Errors
///
/// - [`DegenerateField::NonFinite`] if `field` holds NaN/infinity or the
///   raw update is not finite.
/// - [`DegenerateField::NonFinitePriceRatio`] if `price_ratio` is not finite.
/// - [`DegenerateField::ZeroDenominator`] at the first cell where both
///   neighbour sums vanish (always the case on a 1×1 grid).
pub fn step(field: &Field, price_ratio: f64, speed: f64) -> Result<Field, DegenerateField> {
    step_with_stats(field, price_ratio, speed).map(|outcome| outcome.field)
}

/// [`step`], also reporting how many cells were clamped.
pub fn step_with_stats(
    field: &Field,
    price_ratio: f64,
    speed: f64,
) -> Result<UpdateOutcome, DegenerateField> {
    if let Some(index) = field.first_non_finite() {
        return Err(DegenerateField::NonFinite { index });
    }
    if !price_ratio.is_finite() {
        return Err(DegenerateField::NonFinitePriceRatio);
    }

    let side = field.side();
    let own = aggregate(field);
    let other = aggregate(&field.complement());
    let own = own.as_slice();
    let other = other.as_slice();

    let mut clamped_low = 0;
    let mut clamped_high = 0;
    let next = field.try_map_indexed(|row, col, value| {
        let i = row * side + col;
        let numerator = own[i];
        let denominator = numerator + price_ratio * other[i];
        if denominator == 0.0 {
            return Err(DegenerateField::ZeroDenominator { row, col });
        }
        let raw = value + speed * (numerator / denominator - 0.5);
        if !raw.is_finite() {
            return Err(DegenerateField::NonFinite { index: i });
        }
        Ok(if raw < 0.0 {
            clamped_low += 1;
            0.0
        } else if raw > 1.0 {
            clamped_high += 1;
            1.0
        } else {
            raw
        })
    })?;

    Ok(UpdateOutcome {
        field: next,
        clamped_low,
        clamped_high,
    })
}
