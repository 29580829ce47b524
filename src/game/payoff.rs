//! Payoff model - pure function of (own strategy, neighbor strategy)

use serde::{Deserialize, Serialize};

use crate::core::types::Strategy;
use crate::game::definition::GameDefinition;

/// 2x2 payoff table derived once from a `GameDefinition`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffTable {
    values: [[f64; 2]; 2],
}

impl PayoffTable {
    pub(crate) fn zeroed() -> Self {
        Self {
            values: [[0.0; 2]; 2],
        }
    }

    pub(crate) fn set(&mut self, own: Strategy, neighbor: Strategy, value: f64) {
        self.values[own.index()][neighbor.index()] = value;
    }

    /// Payoff to a player using `own` against a player using `neighbor`
    #[inline]
    pub fn payoff(&self, own: Strategy, neighbor: Strategy) -> f64 {
        self.values[own.index()][neighbor.index()]
    }
}

impl From<&GameDefinition> for PayoffTable {
    fn from(game: &GameDefinition) -> Self {
        game.payoff_table()
    }
}

/// Payoff lookup straight from a game definition
pub fn payoff(game: &GameDefinition, own: Strategy, neighbor: Strategy) -> f64 {
    game.payoff_table().payoff(own, neighbor)
}
