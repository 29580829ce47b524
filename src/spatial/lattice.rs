//! Toroidal lattice of strategy labels

use serde::Serialize;

use crate::core::error::{FieldError, Result};
use crate::core::types::{Coord, Strategy};

/// N x N grid of strategies with periodic adjacency in both axes
///
/// Always holds exactly N² cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Lattice {
    size: usize,
    cells: Vec<Strategy>,
}

impl Lattice {
    /// N² for a positive side length that fits in `usize` once squared
    pub fn cell_count(size: usize) -> Result<usize> {
        if size == 0 {
            return Err(FieldError::config("lattice size must be positive"));
        }
        size.checked_mul(size).ok_or_else(|| {
            FieldError::config(format!("lattice size {} overflows the cell count", size))
        })
    }

    /// Uniform lattice; `size` must be positive
    pub fn new(size: usize, fill: Strategy) -> Result<Self> {
        let count = Self::cell_count(size)?;
        Ok(Self {
            size,
            cells: vec![fill; count],
        })
    }

    /// Build from row-major cells; the length must be a positive perfect square
    pub fn from_cells(size: usize, cells: Vec<Strategy>) -> Result<Self> {
        let count = Self::cell_count(size)?;
        if cells.len() != count {
            return Err(FieldError::config(format!(
                "expected {} cells for a {}x{} lattice, got {}",
                count,
                size,
                size,
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Build from square rows of strategies
    pub fn from_rows(rows: &[Vec<Strategy>]) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(FieldError::config("lattice rows must form a square"));
        }
        Self::from_cells(size, rows.concat())
    }

    /// Same shape, new content; callers supply exactly N² cells
    pub(crate) fn with_cells(&self, cells: Vec<Strategy>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            size: self.size,
            cells,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N²)
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Wrap signed coordinates onto the torus
    #[inline]
    pub fn wrap(&self, row: isize, col: isize) -> Coord {
        let n = self.size as isize;
        Coord::new(row.rem_euclid(n) as usize, col.rem_euclid(n) as usize)
    }

    #[inline]
    pub fn index_of(&self, coord: Coord) -> usize {
        (coord.row % self.size) * self.size + (coord.col % self.size)
    }

    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.size, index % self.size)
    }

    /// Strategy at (row, col); out-of-range coordinates wrap
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Strategy {
        self.cells[self.index_of(Coord::new(row, col))]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, strategy: Strategy) {
        let idx = self.index_of(Coord::new(row, col));
        self.cells[idx] = strategy;
    }

    pub fn cells(&self) -> &[Strategy] {
        &self.cells
    }

    /// Replace the whole content in one write
    ///
    /// The new cell vector must have exactly N² entries.
    pub fn replace(&mut self, cells: Vec<Strategy>) -> Result<()> {
        if cells.len() != self.cells.len() {
            return Err(FieldError::config(format!(
                "replacement has {} cells, lattice holds {}",
                cells.len(),
                self.cells.len()
            )));
        }
        self.cells = cells;
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Strategy]> {
        self.cells.chunks(self.size)
    }

    /// Rows as raw 0/1 labels for renderers
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&s| s as u8).collect())
            .collect()
    }

    pub fn count(&self, strategy: Strategy) -> usize {
        self.cells.iter().filter(|&&s| s == strategy).count()
    }

    pub fn is_uniform(&self) -> bool {
        self.cells.windows(2).all(|w| w[0] == w[1])
    }
}
