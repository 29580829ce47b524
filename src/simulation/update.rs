//! "Best takes over" update rule
//!
//! A cell adopts the strategy whose total payoff against the cell's Moore
//! neighborhood is strictly highest. When both strategies are present and
//! their totals tie, the cell keeps its current strategy.
//!
//! Synchronous generations read only the pre-step lattice and may fan out
//! across the rayon pool; the result is identical either way. Asynchronous
//! generations write each cell back before the next pick and stay on one
//! thread.

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use tracing::trace;

use crate::core::config::AsyncOrder;
use crate::core::types::Strategy;
use crate::game::{GameDefinition, PayoffTable};
use crate::spatial::lattice::Lattice;
use crate::spatial::neighborhood::strategy_totals;

/// Decide between the two strategy totals, falling back to `current` on a tie
#[inline]
fn pick_best(current: Strategy, totals: [Option<f64>; 2]) -> Strategy {
    match (totals[Strategy::Cooperate.index()], totals[Strategy::Defect.index()]) {
        (Some(cooperate), Some(defect)) if cooperate > defect => Strategy::Cooperate,
        (Some(cooperate), Some(defect)) if defect > cooperate => Strategy::Defect,
        // Tie, or only the current strategy is present
        _ => current,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRule {
    table: PayoffTable,
    parallel_threshold: usize,
}

impl UpdateRule {
    pub fn new(game: &GameDefinition) -> Self {
        Self {
            table: game.payoff_table(),
            parallel_threshold: usize::MAX,
        }
    }

    /// Run synchronous passes on the rayon pool once the lattice has this many cells
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn table(&self) -> &PayoffTable {
        &self.table
    }

    /// Next strategy for (row, col) given the lattice as it is now
    pub fn next_strategy(&self, lattice: &Lattice, row: usize, col: usize) -> Strategy {
        let totals = strategy_totals(lattice, &self.table, row, col);
        pick_best(lattice.get(row, col), totals)
    }

    /// One synchronous generation: full read pass over `lattice`, then one write
    pub fn step(&self, lattice: &Lattice) -> Lattice {
        let cells = lattice.len();
        let next_cell = |i: usize| {
            let coord = lattice.coord_of(i);
            self.next_strategy(lattice, coord.row, coord.col)
        };

        let next: Vec<Strategy> = if cells >= self.parallel_threshold {
            trace!(cells, "parallel synchronous pass");
            (0..cells).into_par_iter().map(next_cell).collect()
        } else {
            (0..cells).map(next_cell).collect()
        };

        lattice.with_cells(next)
    }

    /// Recompute a single cell in place; returns whether it changed
    pub fn update_cell(&self, lattice: &mut Lattice, row: usize, col: usize) -> bool {
        let current = lattice.get(row, col);
        let next = self.next_strategy(lattice, row, col);
        if next != current {
            lattice.set(row, col, next);
            true
        } else {
            false
        }
    }

    /// One asynchronous generation of N² single-cell updates, in place
    ///
    /// Each pick sees every earlier write. Returns the number of cell flips.
    pub fn step_async<R: Rng + ?Sized>(
        &self,
        lattice: &mut Lattice,
        order: AsyncOrder,
        rng: &mut R,
    ) -> usize {
        let cells = lattice.len();
        let mut flips = 0;

        match order {
            AsyncOrder::Uniform => {
                for _ in 0..cells {
                    let coord = lattice.coord_of(rng.gen_range(0..cells));
                    if self.update_cell(lattice, coord.row, coord.col) {
                        flips += 1;
                    }
                }
            }
            AsyncOrder::Shuffled => {
                let mut visit: Vec<usize> = (0..cells).collect();
                visit.shuffle(rng);
                for i in visit {
                    let coord = lattice.coord_of(i);
                    if self.update_cell(lattice, coord.row, coord.col) {
                        flips += 1;
                    }
                }
            }
        }

        flips
    }
}
