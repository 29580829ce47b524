//! Simulation engine
//!
//! initial condition -> lattice -> repeated best-takes-over generations

pub mod initial;
pub mod scenario;
pub mod simulator;
pub mod stats;
pub mod update;

pub use initial::InitialConditionGenerator;
pub use scenario::Scenario;
pub use simulator::{run, Generations, Simulator};
pub use stats::LatticeStats;
pub use update::UpdateRule;
