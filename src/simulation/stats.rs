//! Per-generation population summary

use serde::{Deserialize, Serialize};

use crate::core::types::{Generation, Strategy};
use crate::game::PayoffTable;
use crate::spatial::lattice::Lattice;
use crate::spatial::neighborhood::total_payoff;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeStats {
    pub generation: Generation,
    pub cells: usize,
    pub cooperators: usize,
    pub defectors: usize,
    pub cooperator_fraction: f64,
    /// Mean over cells of the cell's own total payoff against its neighborhood
    pub mean_payoff: f64,
}

impl LatticeStats {
    pub fn measure(lattice: &Lattice, table: &PayoffTable, generation: Generation) -> Self {
        let cells = lattice.len();
        let cooperators = lattice.count(Strategy::Cooperate);

        let payoff_sum: f64 = (0..cells)
            .map(|i| {
                let coord = lattice.coord_of(i);
                let own = lattice.get(coord.row, coord.col);
                total_payoff(lattice, table, coord.row, coord.col, own)
            })
            .sum();

        Self {
            generation,
            cells,
            cooperators,
            defectors: cells - cooperators,
            cooperator_fraction: cooperators as f64 / cells as f64,
            mean_payoff: payoff_sum / cells as f64,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "gen {:>5}: {:>6} cooperators / {:>6} defectors ({:.1}%), mean payoff {:.3}",
            self.generation,
            self.cooperators,
            self.defectors,
            self.cooperator_fraction * 100.0,
            self.mean_payoff
        )
    }
}
