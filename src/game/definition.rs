//! Game definitions and their payoff parameters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{FieldError, Result};
use crate::core::types::Strategy;
use crate::game::payoff::PayoffTable;

/// Which 2x2 game is played on the lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    PrisonerClusters,
    HawkDoveSpirals,
    StagHunt,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [
        GameKind::PrisonerClusters,
        GameKind::HawkDoveSpirals,
        GameKind::StagHunt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::PrisonerClusters => "prisoner_clusters",
            GameKind::HawkDoveSpirals => "hawk_dove_spirals",
            GameKind::StagHunt => "stag_hunt",
        }
    }

    /// Parameters tuned for visible pattern formation on a 150-200 cell grid
    pub fn default_definition(&self) -> GameDefinition {
        match self {
            // Weak dilemma: T barely above R lets cooperator clusters hold their borders
            GameKind::PrisonerClusters => GameDefinition::PrisonersDilemma {
                reward: 3.0,
                temptation: 3.1,
                punishment: 1.0,
                sucker: 0.0,
            },
            // V < C keeps both strategies alive
            GameKind::HawkDoveSpirals => GameDefinition::HawkDove {
                value: 3.5,
                cost: 4.5,
            },
            GameKind::StagHunt => GameDefinition::StagHunt {
                reward: 4.0,
                safe: 1.5,
                sucker: 0.0,
                hare_vs_stag: Some(2.5),
            },
        }
    }

    /// Display name of a strategy under this game's reading
    pub fn strategy_name(&self, strategy: Strategy) -> &'static str {
        match (self, strategy) {
            (GameKind::PrisonerClusters, Strategy::Cooperate) => "Cooperate",
            (GameKind::PrisonerClusters, Strategy::Defect) => "Defect",
            (GameKind::HawkDoveSpirals, Strategy::Cooperate) => "Dove",
            (GameKind::HawkDoveSpirals, Strategy::Defect) => "Hawk",
            (GameKind::StagHunt, Strategy::Cooperate) => "Stag",
            (GameKind::StagHunt, Strategy::Defect) => "Hare",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                FieldError::config(format!(
                    "unrecognized game_type '{}' (expected prisoner_clusters, hawk_dove_spirals or stag_hunt)",
                    s
                ))
            })
    }
}

/// Immutable game definition: kind tag plus numeric payoff parameters
///
/// Deserialized from a table tagged by `game_type`, e.g.
///
/// ```toml
/// [game]
/// game_type = "hawk_dove_spirals"
/// V = 2.0
/// C = 4.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game_type")]
pub enum GameDefinition {
    #[serde(rename = "prisoner_clusters")]
    PrisonersDilemma {
        #[serde(alias = "R")]
        reward: f64,
        #[serde(alias = "T")]
        temptation: f64,
        #[serde(alias = "P")]
        punishment: f64,
        #[serde(alias = "S")]
        sucker: f64,
    },
    #[serde(rename = "hawk_dove_spirals")]
    HawkDove {
        #[serde(alias = "V")]
        value: f64,
        #[serde(alias = "C")]
        cost: f64,
    },
    #[serde(rename = "stag_hunt")]
    StagHunt {
        reward: f64,
        safe: f64,
        /// Stag hunter meeting a hare hunter
        #[serde(default)]
        sucker: f64,
        /// Hare hunter meeting a stag hunter; falls back to `safe`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hare_vs_stag: Option<f64>,
    },
}

impl GameDefinition {
    pub fn prisoners_dilemma(reward: f64, temptation: f64, punishment: f64, sucker: f64) -> Self {
        GameDefinition::PrisonersDilemma {
            reward,
            temptation,
            punishment,
            sucker,
        }
    }

    pub fn hawk_dove(value: f64, cost: f64) -> Self {
        GameDefinition::HawkDove { value, cost }
    }

    pub fn stag_hunt(reward: f64, safe: f64) -> Self {
        GameDefinition::StagHunt {
            reward,
            safe,
            sucker: 0.0,
            hare_vs_stag: None,
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            GameDefinition::PrisonersDilemma { .. } => GameKind::PrisonerClusters,
            GameDefinition::HawkDove { .. } => GameKind::HawkDoveSpirals,
            GameDefinition::StagHunt { .. } => GameKind::StagHunt,
        }
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        match *self {
            GameDefinition::PrisonersDilemma {
                reward,
                temptation,
                punishment,
                sucker,
            } => vec![
                ("R", reward),
                ("T", temptation),
                ("P", punishment),
                ("S", sucker),
            ],
            GameDefinition::HawkDove { value, cost } => vec![("V", value), ("C", cost)],
            GameDefinition::StagHunt {
                reward,
                safe,
                sucker,
                hare_vs_stag,
            } => vec![
                ("reward", reward),
                ("safe", safe),
                ("sucker", sucker),
                ("hare_vs_stag", hare_vs_stag.unwrap_or(safe)),
            ],
        }
    }

    /// Reject non-finite payoff parameters
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.parameters() {
            if !value.is_finite() {
                return Err(FieldError::config(format!(
                    "{} payoff parameter {} must be finite, got {}",
                    self.kind(),
                    name,
                    value
                )));
            }
        }
        Ok(())
    }

    /// Derive the 2x2 payoff table, indexed [own][neighbor]
    pub fn payoff_table(&self) -> PayoffTable {
        use Strategy::{Cooperate, Defect};

        let mut table = PayoffTable::zeroed();
        match *self {
            GameDefinition::PrisonersDilemma {
                reward,
                temptation,
                punishment,
                sucker,
            } => {
                table.set(Cooperate, Cooperate, reward);
                table.set(Cooperate, Defect, sucker);
                table.set(Defect, Cooperate, temptation);
                table.set(Defect, Defect, punishment);
            }
            // Cooperate = Dove, Defect = Hawk
            GameDefinition::HawkDove { value, cost } => {
                table.set(Defect, Defect, (value - cost) / 2.0);
                table.set(Defect, Cooperate, value);
                table.set(Cooperate, Defect, 0.0);
                table.set(Cooperate, Cooperate, value / 2.0);
            }
            // Cooperate = Stag, Defect = Hare
            GameDefinition::StagHunt {
                reward,
                safe,
                sucker,
                hare_vs_stag,
            } => {
                table.set(Cooperate, Cooperate, reward);
                table.set(Cooperate, Defect, sucker);
                table.set(Defect, Cooperate, hare_vs_stag.unwrap_or(safe));
                table.set(Defect, Defect, safe);
            }
        }
        table
    }
}

impl Default for GameDefinition {
    fn default() -> Self {
        GameKind::PrisonerClusters.default_definition()
    }
}
