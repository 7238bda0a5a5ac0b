//! 2D square lattice with 8-connected (Moore) neighbourhood and an
//! absorbing boundary.

use crate::error::SpaceError;
use prefield_core::Field;
use smallvec::SmallVec;

/// All 8 offsets: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A square lattice of `side * side` agents with Moore neighbourhoods.
///
/// Each cell has coordinate `(row, col)`. Neighbours are the four cardinal
/// cells plus the four diagonals. Out-of-bounds neighbours are absorbed:
/// interior cells have 8 neighbours, edge cells 5, corner cells 3, and a
/// 1×1 lattice has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square8 {
    side: u32,
}

impl Square8 {
    /// Largest supported side; keeps the cell count within `u32`.
    pub const MAX_SIDE: u32 = u16::MAX as u32;

    /// Returns `Err(SpaceError::EmptySpace)` if `side` is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if it exceeds [`Self::MAX_SIDE`].
    pub fn new(side: u32) -> Result<Self, SpaceError> {
        if side == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if side > Self::MAX_SIDE {
            return Err(SpaceError::DimensionTooLarge {
                value: side,
                max: Self::MAX_SIDE,
            });
        }
        Ok(Self { side })
    }

    /// The lattice matching a field's shape.
    pub fn for_field(field: &Field) -> Result<Self, SpaceError> {
        let side = u32::try_from(field.side()).map_err(|_| SpaceError::DimensionTooLarge {
            value: u32::MAX,
            max: Self::MAX_SIDE,
        })?;
        Self::new(side)
    }

    /// Number of rows (and columns).
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Total number of agents.
    pub fn cell_count(&self) -> usize {
        (self.side as usize) * (self.side as usize)
    }

    /// In-bounds Moore neighbours of `(row, col)` as `(row, col)` pairs.
    ///
    /// Returns an empty set for coordinates outside the lattice.
    pub fn neighbours(&self, row: usize, col: usize) -> SmallVec<[(usize, usize); 8]> {
        let side = self.side as usize;
        if row >= side || col >= side {
            return SmallVec::new();
        }
        OFFSETS_8
            .iter()
            .filter_map(|&(dr, dc)| offset(side, row, col, dr, dc))
            .collect()
    }

    /// Number of in-bounds neighbours of `(row, col)`.
    pub fn neighbour_count(&self, row: usize, col: usize) -> usize {
        self.neighbours(row, col).len()
    }
}

/// Neighbour aggregation over a whole field.
///
/// `aggregate(field)[i, j]` is the sum of `field` over the up-to-8 cells
/// adjacent to `(i, j)`, excluding `(i, j)` itself. Cells outside the grid
/// contribute 0. Equivalent to convolving with a 3×3 all-ones kernel with a
/// zero centre and zero padding.
///
/// Pure and total: any real-valued field is accepted.
pub fn aggregate(field: &Field) -> Field {
    let side = field.side();
    let values = field.as_slice();
    field.map_indexed(|r, c, _| moore_sum_at(values, side, r, c))
}

/// Row/column after applying `(dr, dc)`, or `None` if it leaves the grid.
fn offset(side: usize, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let nr = row.checked_add_signed(dr)?;
    let nc = col.checked_add_signed(dc)?;
    (nr < side && nc < side).then_some((nr, nc))
}

fn moore_sum_at(values: &[f64], side: usize, row: usize, col: usize) -> f64 {
    let mut sum = 0.0;
    for &(dr, dc) in &OFFSETS_8 {
        if let Some((nr, nc)) = offset(side, row, col, dr, dc) {
            sum += values[nr * side + nc];
        }
    }
    sum
}
