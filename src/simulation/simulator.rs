//! Simulator - builds the initial lattice and yields generations lazily
//!
//! The sequence has no upper bound; callers take as many generations as
//! they need. Every call to `generations()` restarts from the same initial
//! lattice and random stream, so a fixed seed gives a fixed trajectory.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::core::config::{AsyncOrder, SchedulingMode, SimulationConfig};
use crate::core::error::Result;
use crate::core::types::Generation;
use crate::simulation::initial::InitialConditionGenerator;
use crate::simulation::stats::LatticeStats;
use crate::simulation::update::UpdateRule;
use crate::spatial::lattice::Lattice;

/// Largest seed drawn when none is configured; keeps it writable as a TOML integer
const MAX_DRAWN_SEED: u64 = i64::MAX as u64;

pub struct Simulator {
    config: SimulationConfig,
    seed: u64,
    rule: UpdateRule,
    initial: Lattice,
    /// Random stream as it stands after the initial lattice was drawn
    rng: ChaCha8Rng,
}

impl Simulator {
    /// Validate `config` and build the initial lattice
    ///
    /// Every failure a run can have surfaces here as a configuration error.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let seed = config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..=MAX_DRAWN_SEED));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let generator = InitialConditionGenerator::from_config(&config)?;
        let initial = generator.generate(config.grid_size, &mut rng)?;
        let rule = UpdateRule::new(&config.game).with_parallel_threshold(config.parallel_threshold);

        info!(
            grid_size = config.grid_size,
            game = %config.game.kind(),
            initial_condition = %config.initial_condition,
            scheduling_mode = %config.scheduling_mode,
            seed,
            "Simulator ready"
        );

        Ok(Self {
            config,
            seed,
            rule,
            initial,
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed in use, drawn at construction if the config had none
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rule(&self) -> &UpdateRule {
        &self.rule
    }

    pub fn initial_lattice(&self) -> &Lattice {
        &self.initial
    }

    /// Fresh lazy sequence: the initial lattice, then one lattice per generation
    pub fn generations(&self) -> Generations {
        Generations {
            lattice: self.initial.clone(),
            rule: self.rule,
            mode: self.config.scheduling_mode,
            order: self.config.async_order,
            rng: self.rng.clone(),
            generation: 0,
            started: false,
        }
    }
}

/// Validate a config and start its generation sequence
pub fn run(config: SimulationConfig) -> Result<Generations> {
    Ok(Simulator::new(config)?.generations())
}

/// Lazy, unbounded sequence of lattice snapshots
///
/// Owns the one live lattice of the run. `next()` yields clones; use
/// `advance()` and `current()` to step without copying.
pub struct Generations {
    lattice: Lattice,
    rule: UpdateRule,
    mode: SchedulingMode,
    order: AsyncOrder,
    rng: ChaCha8Rng,
    generation: Generation,
    started: bool,
}

impl Generations {
    /// Lattice as of `generation()`
    pub fn current(&self) -> &Lattice {
        &self.lattice
    }

    /// Generations applied so far
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Apply one generation under the configured scheduling mode
    pub fn advance(&mut self) -> &Lattice {
        match self.mode {
            SchedulingMode::Synchronous => {
                self.lattice = self.rule.step(&self.lattice);
                debug!(generation = self.generation + 1, "synchronous generation");
            }
            SchedulingMode::Asynchronous => {
                let flips = self
                    .rule
                    .step_async(&mut self.lattice, self.order, &mut self.rng);
                debug!(generation = self.generation + 1, flips, "async generation");
            }
        }
        self.generation += 1;
        self.started = true;
        &self.lattice
    }

    pub fn stats(&self) -> LatticeStats {
        LatticeStats::measure(&self.lattice, self.rule.table(), self.generation)
    }
}

impl Iterator for Generations {
    type Item = Lattice;

    fn next(&mut self) -> Option<Lattice> {
        if !self.started {
            self.started = true;
            return Some(self.lattice.clone());
        }
        Some(self.advance().clone())
    }
}
