//! Headless Strategic Field Runner
//!
//! Runs one simulation for a fixed number of generations and reports
//! population statistics. Optionally writes a JSON run summary with the
//! final lattice for external renderers.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use strategic_field::core::{Result, SchedulingMode, SimulationConfig, Strategy};
use strategic_field::simulation::{LatticeStats, Scenario, Simulator};

/// Headless runner for spatial evolutionary games
#[derive(Parser, Debug)]
#[command(name = "field_sim")]
#[command(about = "Simulate best-takes-over dynamics on a toroidal lattice")]
struct Args {
    /// Named preset (cooperative_clusters, flickering_equilibrium, cluster_expansion, coordination_cascade)
    #[arg(long, conflicts_with = "config")]
    scenario: Option<Scenario>,

    /// TOML simulation config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generations to run (defaults to the scenario's frame count, else 100)
    #[arg(long)]
    generations: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Override the scheduling mode (synchronous or asynchronous)
    #[arg(long)]
    mode: Option<SchedulingMode>,

    /// Log statistics every N generations
    #[arg(long, default_value_t = 10)]
    report_every: u64,

    /// Write a JSON run summary to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    config: SimulationConfig,
    seed: u64,
    elapsed_ms: u64,
    stats: Vec<LatticeStats>,
    final_lattice: Vec<Vec<u8>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("strategic_field=info,field_sim=info")),
        )
        .init();

    let args = Args::parse();

    let (mut config, default_generations) = match (&args.scenario, &args.config) {
        (Some(scenario), _) => (scenario.config(), scenario.frames()),
        (None, Some(path)) => (SimulationConfig::load(path)?, 100),
        (None, None) => (Scenario::CooperativeClusters.config(), 100),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.scheduling_mode = mode;
    }
    let generations = args.generations.unwrap_or(default_generations);

    let simulator = Simulator::new(config)?;
    let game = simulator.config().game.kind();

    println!("Strategic Field");
    println!("===============");
    println!(
        "{0}x{0} lattice, {1}, {2} start, {3} updates, seed {4}",
        simulator.config().grid_size,
        game,
        simulator.config().initial_condition,
        simulator.config().scheduling_mode,
        simulator.seed()
    );
    println!("Running {} generations...", generations);
    println!();

    let start = Instant::now();
    let mut run = simulator.generations();
    let mut stats = vec![run.stats()];
    for _ in 0..generations {
        run.advance();
        let snapshot = run.stats();
        if args.report_every > 0 && snapshot.generation % args.report_every == 0 {
            tracing::info!("{}", snapshot.summary());
        }
        stats.push(snapshot);
    }
    let elapsed = start.elapsed();

    if let Some(last) = stats.last() {
        println!("{}", last.summary());
        println!(
            "{}: {}  {}: {}",
            game.strategy_name(Strategy::Cooperate),
            last.cooperators,
            game.strategy_name(Strategy::Defect),
            last.defectors
        );
    }
    println!("Actual time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = args.output {
        let summary = RunSummary {
            config: simulator.config().clone(),
            seed: simulator.seed(),
            elapsed_ms: elapsed.as_millis() as u64,
            stats,
            final_lattice: run.current().to_rows(),
        };
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json)?;
        println!("\nRun summary written to {}", path.display());
    }

    Ok(())
}
