//! Strategic Field - spatial evolutionary games on a toroidal lattice

pub mod core;
pub mod game;
pub mod simulation;
pub mod spatial;
