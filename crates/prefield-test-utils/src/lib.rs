//! Test fixtures for prefield development.
//!
//! Deterministic field builders for hand-checked scenarios, plus
//! [`proptest`] strategies for property tests. Fixtures panic on invalid
//! sizes; they are only meant for tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::ops::Range;

use prefield_core::Field;
use proptest::prelude::*;

/// Every cell set to `value`.
pub fn uniform(side: usize, value: f64) -> Field {
    Field::filled(side, value).expect("fixture side must be non-zero")
}

/// Alternating 0.25 / 0.75 cells, starting with 0.25 at `(0, 0)`.
pub fn checkerboard(side: usize) -> Field {
    Field::from_fn(side, |r, c| if (r + c) % 2 == 0 { 0.25 } else { 0.75 })
        .expect("fixture side must be non-zero")
}

/// A field with `Σ field == Σ (1 − field)` exactly.
///
/// The first half of the cells (row-major) hold 0.25, the second half 0.75,
/// and the middle cell of an odd-sized grid holds 0.5. All values are
/// dyadic, so both sums are computed without rounding.
pub fn balanced_field(side: usize) -> Field {
    let n = side * side;
    Field::from_fn(side, |r, c| {
        let i = r * side + c;
        if n % 2 == 1 && i == n / 2 {
            0.5
        } else if i < n / 2 {
            0.25
        } else {
            0.75
        }
    })
    .expect("fixture side must be non-zero")
}

/// Linear ramp from 0.0 at `(0, 0)` to 1.0 at the last cell.
pub fn ramp(side: usize) -> Field {
    let last = (side * side).saturating_sub(1).max(1) as f64;
    Field::from_fn(side, |r, c| (r * side + c) as f64 / last).expect("fixture side must be non-zero")
}

/// Arbitrary fields with values anywhere in `[0, 1]`.
pub fn arb_field(sides: Range<usize>) -> impl Strategy<Value = Field> {
    arb_field_in(sides, 0.0, 1.0)
}

/// Arbitrary fields with values in `[0.01, 0.99]`.
///
/// On grids of side 2 or more every neighbour sum is strictly positive, so
/// the update never hits a zero denominator.
pub fn arb_interior_field(sides: Range<usize>) -> impl Strategy<Value = Field> {
    arb_field_in(sides, 0.01, 0.99)
}

fn arb_field_in(sides: Range<usize>, lo: f64, hi: f64) -> impl Strategy<Value = Field> {
    sides.prop_flat_map(move |side| {
        prop::collection::vec(lo..=hi, side * side)
            .prop_map(move |cells| Field::new(side, cells).expect("strategy builds exact shapes"))
    })
}
