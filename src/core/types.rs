//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Generation counter (simulation time unit)
pub type Generation = u64;

/// Binary strategy label held by every lattice cell
///
/// The game decides how the two values are read: `Cooperate` is the
/// cooperator/dove/stag hunter, `Defect` is the defector/hawk/hare hunter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Strategy {
    #[default]
    Cooperate = 0,
    Defect = 1,
}

impl Strategy {
    /// Both strategy values, in index order
    pub const ALL: [Strategy; 2] = [Strategy::Cooperate, Strategy::Defect];

    /// Index into a 2x2 payoff table
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Lattice coordinate (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
