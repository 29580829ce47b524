//! Simulation configuration
//!
//! A `SimulationConfig` is immutable for the life of a `Simulator`. Every
//! check happens in `validate()` so that a run never fails once built.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{FieldError, Result};
use crate::game::GameDefinition;

/// How the starting lattice is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialCondition {
    #[default]
    Random,
    Split,
    Clusters,
    Invader,
}

impl InitialCondition {
    pub const ALL: [InitialCondition; 4] = [
        InitialCondition::Random,
        InitialCondition::Split,
        InitialCondition::Clusters,
        InitialCondition::Invader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InitialCondition::Random => "random",
            InitialCondition::Split => "split",
            InitialCondition::Clusters => "clusters",
            InitialCondition::Invader => "invader",
        }
    }
}

/// Update discipline for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// Every cell reads the pre-step lattice, then all cells are written at once
    #[default]
    Synchronous,
    /// N² single-cell updates, each written back immediately
    Asynchronous,
}

impl SchedulingMode {
    pub const ALL: [SchedulingMode; 2] = [SchedulingMode::Synchronous, SchedulingMode::Asynchronous];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulingMode::Synchronous => "synchronous",
            SchedulingMode::Asynchronous => "asynchronous",
        }
    }
}

/// Cell selection order for asynchronous generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsyncOrder {
    /// N² uniform picks with replacement
    #[default]
    Uniform,
    /// One pass over a freshly shuffled list of all cells
    Shuffled,
}

impl AsyncOrder {
    pub const ALL: [AsyncOrder; 2] = [AsyncOrder::Uniform, AsyncOrder::Shuffled];

    pub fn as_str(&self) -> &'static str {
        match self {
            AsyncOrder::Uniform => "uniform",
            AsyncOrder::Shuffled => "shuffled",
        }
    }
}

fn parse_tag<T: Copy>(
    field: &str,
    input: &str,
    all: &[T],
    name: impl Fn(&T) -> &'static str,
) -> Result<T> {
    all.iter().copied().find(|v| name(v) == input).ok_or_else(|| {
        let expected: Vec<&str> = all.iter().map(&name).collect();
        FieldError::config(format!(
            "unrecognized {} '{}' (expected one of: {})",
            field,
            input,
            expected.join(", ")
        ))
    })
}

macro_rules! tag_impls {
    ($ty:ty, $field:literal) => {
        impl FromStr for $ty {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self> {
                parse_tag($field, s, &<$ty>::ALL, <$ty>::as_str)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_impls!(InitialCondition, "initial_condition");
tag_impls!(SchedulingMode, "scheduling_mode");
tag_impls!(AsyncOrder, "async_order");

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    // === LATTICE ===
    /// Side length N of the N x N toroidal lattice
    pub grid_size: usize,

    // === INITIAL CONDITION ===
    #[serde(default)]
    pub initial_condition: InitialCondition,

    /// Fraction of cooperators for `random`; block coverage for `clusters`
    #[serde(default = "default_density")]
    pub initial_coop_density: f64,

    /// Side length of the cooperator seed square for `invader`
    #[serde(default = "default_invader_size")]
    pub invader_size: usize,

    // === SCHEDULING ===
    #[serde(default)]
    pub scheduling_mode: SchedulingMode,

    #[serde(default)]
    pub async_order: AsyncOrder,

    /// Fixed seed for a reproducible trajectory; drawn at construction when absent
    ///
    /// TOML integers are signed, so only seeds up to `i64::MAX` can be written
    /// back with `to_toml_string`. Drawn seeds always stay in that range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    // === PARALLELIZATION ===
    /// Minimum cell count before the synchronous pass runs on the rayon pool
    ///
    /// Below this, thread overhead exceeds the per-cell work.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    // === GAME ===
    // Must stay the last field: TOML tables follow plain values
    pub game: GameDefinition,
}

fn default_density() -> f64 {
    0.5
}

fn default_invader_size() -> usize {
    1
}

fn default_parallel_threshold() -> usize {
    4096
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 150,
            game: GameDefinition::default(),
            initial_condition: InitialCondition::Random,
            initial_coop_density: default_density(),
            invader_size: default_invader_size(),
            scheduling_mode: SchedulingMode::Synchronous,
            async_order: AsyncOrder::Uniform,
            seed: None,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_game(mut self, game: GameDefinition) -> Self {
        self.game = game;
        self
    }

    pub fn with_initial_condition(mut self, condition: InitialCondition, density: f64) -> Self {
        self.initial_condition = condition;
        self.initial_coop_density = density;
        self
    }

    pub fn with_scheduling(mut self, mode: SchedulingMode) -> Self {
        self.scheduling_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(FieldError::config("grid_size must be positive"));
        }

        if self.grid_size.checked_mul(self.grid_size).is_none() {
            return Err(FieldError::config(format!(
                "grid_size ({}) is too large: N² overflows the cell count",
                self.grid_size
            )));
        }

        if !(0.0..=1.0).contains(&self.initial_coop_density) {
            return Err(FieldError::config(format!(
                "initial_coop_density ({}) must lie in [0, 1]",
                self.initial_coop_density
            )));
        }

        if self.invader_size == 0 || self.invader_size > self.grid_size {
            return Err(FieldError::config(format!(
                "invader_size ({}) must be between 1 and grid_size ({})",
                self.invader_size, self.grid_size
            )));
        }

        self.game.validate()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)
            .map_err(|e| FieldError::config(format!("Failed to parse simulation TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| FieldError::config(format!("Failed to serialize simulation config: {}", e)))
    }
}
