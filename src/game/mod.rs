//! Game definitions and payoff model
//!
//! Each game is a symmetric 2x2 game. The payoff table is derived once
//! from the definition and never changes during a run.

pub mod definition;
pub mod payoff;

pub use definition::{GameDefinition, GameKind};
pub use payoff::{payoff, PayoffTable};
