//! Moore neighborhood enumeration and payoff evaluation
//!
//! A neighborhood is the target cell plus its 8 wrapped neighbors. Every
//! member is scored by playing the member's strategy against all 9 members
//! of the *target's* neighborhood, so members sharing a strategy share a
//! total and at most two totals are ever computed.

use crate::core::types::{Coord, Strategy};
use crate::game::PayoffTable;
use crate::spatial::lattice::Lattice;

/// Members in a Moore neighborhood, self included
pub const NEIGHBORHOOD_SIZE: usize = 9;

/// Row-major offsets of the 3x3 block around a cell
pub const MOORE_OFFSETS: [(isize, isize); NEIGHBORHOOD_SIZE] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Lattice {
    /// The 9 (strategy, coordinate) pairs around (row, col), self included
    pub fn neighbors_of(&self, row: usize, col: usize) -> [(Strategy, Coord); NEIGHBORHOOD_SIZE] {
        let (r, c) = (row as isize, col as isize);
        MOORE_OFFSETS.map(|(dr, dc)| {
            let coord = self.wrap(r + dr, c + dc);
            (self.get(coord.row, coord.col), coord)
        })
    }
}

/// Sum of `candidate`'s payoff against every member of the neighborhood of (row, col)
pub fn total_payoff(
    lattice: &Lattice,
    table: &PayoffTable,
    row: usize,
    col: usize,
    candidate: Strategy,
) -> f64 {
    lattice
        .neighbors_of(row, col)
        .iter()
        .map(|&(member, _)| table.payoff(candidate, member))
        .sum()
}

/// Total payoff for each strategy value present in the neighborhood, indexed by strategy
///
/// Absent strategies are `None`. The target's own strategy is always present.
pub fn strategy_totals(
    lattice: &Lattice,
    table: &PayoffTable,
    row: usize,
    col: usize,
) -> [Option<f64>; 2] {
    let members = lattice.neighbors_of(row, col);
    let mut present = [false; 2];
    for &(strategy, _) in &members {
        present[strategy.index()] = true;
    }

    let mut totals = [None; 2];
    for candidate in Strategy::ALL {
        if present[candidate.index()] {
            let total: f64 = members
                .iter()
                .map(|&(member, _)| table.payoff(candidate, member))
                .sum();
            totals[candidate.index()] = Some(total);
        }
    }
    totals
}

/// One scored neighborhood member
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodMember {
    pub coord: Coord,
    pub strategy: Strategy,
    pub payoff: f64,
}

/// Fully scored Moore neighborhood of one target cell
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    pub center: Coord,
    pub center_strategy: Strategy,
    pub members: [NeighborhoodMember; NEIGHBORHOOD_SIZE],
}

impl Neighborhood {
    pub fn evaluate(lattice: &Lattice, table: &PayoffTable, row: usize, col: usize) -> Self {
        let totals = strategy_totals(lattice, table, row, col);
        let members = lattice.neighbors_of(row, col).map(|(strategy, coord)| NeighborhoodMember {
            coord,
            strategy,
            // Present by construction: every member's strategy was scored
            payoff: totals[strategy.index()].unwrap_or(f64::NEG_INFINITY),
        });
        let center = lattice.wrap(row as isize, col as isize);

        Self {
            center,
            center_strategy: lattice.get(center.row, center.col),
            members,
        }
    }

    /// Highest member payoff
    pub fn max_payoff(&self) -> f64 {
        self.members
            .iter()
            .map(|m| m.payoff)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
