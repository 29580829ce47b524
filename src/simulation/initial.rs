//! Starting lattice generation
//!
//! Strategy A (`Cooperate`) is the cooperator/dove/stag hunter, strategy B
//! (`Defect`) the defector/hawk/hare hunter.

use rand::Rng;

use crate::core::config::{InitialCondition, SimulationConfig};
use crate::core::error::{FieldError, Result};
use crate::core::types::Strategy;
use crate::spatial::lattice::Lattice;

/// Number of cooperator blocks in the `clusters` layout
const CLUSTER_COUNT: usize = 4;

/// Block centers as (row, col) fractions of N, in fifteenths
const CLUSTER_ANCHORS: [(usize, usize); CLUSTER_COUNT] = [(3, 3), (12, 4), (7, 10), (4, 12)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditionGenerator {
    condition: InitialCondition,
    density: f64,
    invader_size: usize,
}

impl InitialConditionGenerator {
    pub fn new(condition: InitialCondition, density: f64, invader_size: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(FieldError::config(format!(
                "initial_coop_density ({}) must lie in [0, 1]",
                density
            )));
        }
        if invader_size == 0 {
            return Err(FieldError::config("invader_size must be positive"));
        }
        Ok(Self {
            condition,
            density,
            invader_size,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::new(
            config.initial_condition,
            config.initial_coop_density,
            config.invader_size,
        )
    }

    /// Lay out an N x N starting lattice, drawing any randomness from `rng`
    pub fn generate<R: Rng + ?Sized>(&self, grid_size: usize, rng: &mut R) -> Result<Lattice> {
        match self.condition {
            InitialCondition::Random => self.random(grid_size, rng),
            InitialCondition::Split => split(grid_size),
            InitialCondition::Clusters => self.clusters(grid_size),
            InitialCondition::Invader => self.invader(grid_size),
        }
    }

    fn random<R: Rng + ?Sized>(&self, grid_size: usize, rng: &mut R) -> Result<Lattice> {
        let count = Lattice::cell_count(grid_size)?;
        let cells = (0..count)
            .map(|_| {
                if rng.gen_bool(self.density) {
                    Strategy::Cooperate
                } else {
                    Strategy::Defect
                }
            })
            .collect();
        Lattice::from_cells(grid_size, cells)
    }

    /// Side of each cooperator block so the four blocks cover roughly `density` of the lattice
    pub fn cluster_side(&self, grid_size: usize) -> usize {
        let area = self.density * (grid_size as f64).powi(2) / CLUSTER_COUNT as f64;
        (area.sqrt().round() as usize).min(grid_size)
    }

    fn clusters(&self, grid_size: usize) -> Result<Lattice> {
        let mut lattice = Lattice::new(grid_size, Strategy::Defect)?;
        let side = self.cluster_side(grid_size);

        for (row_frac, col_frac) in CLUSTER_ANCHORS {
            let center_row = grid_size * row_frac / 15;
            let center_col = grid_size * col_frac / 15;
            fill_square(&mut lattice, center_row, center_col, side);
        }

        Ok(lattice)
    }

    fn invader(&self, grid_size: usize) -> Result<Lattice> {
        if self.invader_size > grid_size {
            return Err(FieldError::config(format!(
                "invader_size ({}) exceeds grid_size ({})",
                self.invader_size, grid_size
            )));
        }
        let mut lattice = Lattice::new(grid_size, Strategy::Defect)?;
        let center = grid_size / 2;
        fill_square(&mut lattice, center, center, self.invader_size);
        Ok(lattice)
    }
}

/// Left half cooperators, right half defectors
fn split(grid_size: usize) -> Result<Lattice> {
    let mut lattice = Lattice::new(grid_size, Strategy::Cooperate)?;
    for row in 0..grid_size {
        for col in grid_size / 2..grid_size {
            lattice.set(row, col, Strategy::Defect);
        }
    }
    Ok(lattice)
}

/// Set a `side` x `side` square of cooperators around (row, col), wrapping at the edges
fn fill_square(lattice: &mut Lattice, row: usize, col: usize, side: usize) {
    let top = row as isize - (side / 2) as isize;
    let left = col as isize - (side / 2) as isize;
    for dr in 0..side as isize {
        for dc in 0..side as isize {
            let coord = lattice.wrap(top + dr, left + dc);
            lattice.set(coord.row, coord.col, Strategy::Cooperate);
        }
    }
}
