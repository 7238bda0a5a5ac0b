//! The preference [`Field`]: an immutable N×N grid of agent intensities.

use crate::error::FieldError;
use serde::Serialize;
use std::sync::Arc;

/// A square grid of preference intensities, stored row-major.
///
/// Cell `(row, col)` lives at flat index `row * side + col`. Row and column
/// order is meaningful: it defines which agents are neighbours.
///
/// Fields have value semantics. The cell buffer is shared behind an
/// [`Arc`], so cloning a field (e.g. to keep it as a snapshot) never copies
/// cells, and nothing can mutate a field once it has been built. Each
/// simulation period produces a brand-new field.
///
/// Construction only checks the shape. Whether values lie in `[0, 1]` is a
/// property of the dynamics, checked by the engine on the initial field and
/// guaranteed by clamping thereafter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    side: usize,
    cells: Arc<[f64]>,
}

impl Field {
    /// Build a field from a row-major buffer of `side * side` values.
    pub fn new(side: usize, cells: Vec<f64>) -> Result<Self, FieldError> {
        if side == 0 {
            return Err(FieldError::EmptyGrid);
        }
        let expected = side.checked_mul(side).ok_or(FieldError::ShapeMismatch {
            side,
            expected: usize::MAX,
            actual: cells.len(),
        })?;
        if cells.len() != expected {
            return Err(FieldError::ShapeMismatch {
                side,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            side,
            cells: cells.into(),
        })
    }

    /// A field with every cell set to `value`.
    pub fn filled(side: usize, value: f64) -> Result<Self, FieldError> {
        Self::from_fn(side, |_, _| value)
    }

    /// A field whose cell `(row, col)` is `f(row, col)`.
    pub fn from_fn(side: usize, mut f: impl FnMut(usize, usize) -> f64) -> Result<Self, FieldError> {
        let mut cells = Vec::with_capacity(side.saturating_mul(side));
        for r in 0..side {
            for c in 0..side {
                cells.push(f(r, c));
            }
        }
        Self::new(side, cells)
    }

    /// Number of rows (and columns).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells, `side * side`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.cells.get(row * self.side + col).copied()
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, f64> {
        self.cells.chunks(self.side)
    }

    /// `Σ field`, accumulated in row-major order.
    pub fn sum(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// `Σ (1 − field)`, accumulated in row-major order.
    pub fn complement_sum(&self) -> f64 {
        self.cells.iter().map(|v| 1.0 - v).sum()
    }

    /// Average intensity across all agents.
    pub fn mean(&self) -> f64 {
        self.sum() / self.cells.len() as f64
    }

    /// A new field holding `1 − v` for every cell.
    pub fn complement(&self) -> Self {
        Self {
            side: self.side,
            cells: self.cells.iter().map(|v| 1.0 - v).collect(),
        }
    }

    /// A field of the same shape whose cell `(row, col)` is
    /// `f(row, col, self[row, col])`.
    pub fn map_indexed(&self, mut f: impl FnMut(usize, usize, f64) -> f64) -> Self {
        let side = self.side;
        Self {
            side,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(i, &v)| f(i / side, i % side, v))
                .collect(),
        }
    }

    /// Fallible variant of [`map_indexed`](Self::map_indexed): stops at the
    /// first cell for which `f` returns an error.
    pub fn try_map_indexed<E>(
        &self,
        mut f: impl FnMut(usize, usize, f64) -> Result<f64, E>,
    ) -> Result<Self, E> {
        let side = self.side;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i / side, i % side, v))
            .collect::<Result<Arc<[f64]>, E>>()?;
        Ok(Self { side, cells })
    }

    /// Flat index of the first NaN or infinite cell.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.cells.iter().position(|v| !v.is_finite())
    }

    /// Flat index of the first cell outside `[0, 1]` (NaN counts as outside).
    pub fn first_outside_unit_interval(&self) -> Option<usize> {
        self.cells.iter().position(|v| !(0.0..=1.0).contains(v))
    }

    /// `true` if both fields share the same cell buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}
