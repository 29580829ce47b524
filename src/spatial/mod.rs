pub mod lattice;
pub mod neighborhood;

pub use lattice::Lattice;
pub use neighborhood::{
    strategy_totals, total_payoff, Neighborhood, NeighborhoodMember, MOORE_OFFSETS,
    NEIGHBORHOOD_SIZE,
};
