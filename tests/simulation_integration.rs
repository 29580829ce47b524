//! Integration tests for the strategic field simulation
//!
//! These tests verify the end-to-end behavior of the engine:
//! - Lattice shape is preserved every generation
//! - Toroidal neighborhoods wrap at the edges
//! - Uniform lattices are fixed points under both scheduling modes
//! - Ties keep the current strategy
//! - Seeded runs are reproducible
//! - Single-cell asynchronous updates touch at most one cell
//! - Asynchronous picks see earlier writes, so pick order matters

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use strategic_field::core::{
    AsyncOrder, Coord, FieldError, InitialCondition, SchedulingMode, SimulationConfig, Strategy,
};
use strategic_field::game::{GameDefinition, GameKind};
use strategic_field::simulation::{run, Scenario, Simulator, UpdateRule};
use strategic_field::spatial::{Lattice, Neighborhood};

fn pd_game() -> GameDefinition {
    GameDefinition::prisoners_dilemma(3.0, 5.0, 1.0, 0.0)
}

#[test]
fn test_every_snapshot_has_n_squared_cells() {
    for mode in SchedulingMode::ALL {
        for condition in InitialCondition::ALL {
            let config = SimulationConfig::default()
                .with_grid_size(9)
                .with_initial_condition(condition, 0.4)
                .with_scheduling(mode)
                .with_seed(8);
            let sim = Simulator::new(config).unwrap();
            for lattice in sim.generations().take(6) {
                assert_eq!(lattice.size(), 9);
                assert_eq!(lattice.len(), 81);
                assert_eq!(
                    lattice.count(Strategy::Cooperate) + lattice.count(Strategy::Defect),
                    81
                );
            }
        }
    }
}

#[test]
fn test_corner_neighborhood_wraps() {
    let lattice = Lattice::new(6, Strategy::Defect).unwrap();
    let coords: Vec<Coord> = lattice.neighbors_of(0, 0).iter().map(|&(_, c)| c).collect();
    assert!(coords.contains(&Coord::new(5, 5)));

    let small = Lattice::new(3, Strategy::Defect).unwrap();
    let mut all: Vec<Coord> = small.neighbors_of(0, 0).iter().map(|&(_, c)| c).collect();
    all.sort_by_key(|c| (c.row, c.col));
    all.dedup();
    assert_eq!(all.len(), 9);
}

#[test]
fn test_uniform_lattice_is_fixed_point_in_both_modes() {
    for kind in GameKind::ALL {
        let rule = UpdateRule::new(&kind.default_definition());
        for strategy in Strategy::ALL {
            let lattice = Lattice::new(7, strategy).unwrap();
            assert_eq!(rule.step(&lattice), lattice, "{} sync", kind);

            let mut in_place = lattice.clone();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            rule.step_async(&mut in_place, AsyncOrder::Uniform, &mut rng);
            assert_eq!(in_place, lattice, "{} async", kind);
        }
    }
}

#[test]
fn test_tie_keeps_center_strategy() {
    // Stag hunt with reward 3 and safe 2: six stags and three hares give
    // Stag = 6 * 3 = 18 and Hare = 9 * 2 = 18
    let rule = UpdateRule::new(&GameDefinition::stag_hunt(3.0, 2.0));
    let h = Strategy::Defect;
    let s = Strategy::Cooperate;

    for center in [s, h] {
        let rows = if center == s {
            vec![vec![s, s, h], vec![s, s, h], vec![s, s, h]]
        } else {
            vec![vec![s, s, s], vec![s, h, s], vec![h, s, h]]
        };
        let lattice = Lattice::from_rows(&rows).unwrap();
        assert_eq!(lattice.count(s), 6);

        let hood = Neighborhood::evaluate(&lattice, rule.table(), 1, 1);
        let stag = hood.members.iter().find(|m| m.strategy == s).unwrap().payoff;
        let hare = hood.members.iter().find(|m| m.strategy == h).unwrap().payoff;
        assert_eq!(stag, hare);

        let next = rule.step(&lattice);
        assert_eq!(next.get(1, 1), center);
        // On a 3x3 torus every cell sees the same tie, so nothing moves
        assert_eq!(next, lattice);
    }
}

#[test]
fn test_lone_cooperator_scenario() {
    // grid 3, all Defect except the center
    // Cooperate: 1 * R + 8 * S = 3;  Defect: 1 * T + 8 * P = 13
    let mut lattice = Lattice::new(3, Strategy::Defect).unwrap();
    lattice.set(1, 1, Strategy::Cooperate);
    let rule = UpdateRule::new(&pd_game());

    let hood = Neighborhood::evaluate(&lattice, rule.table(), 1, 1);
    assert_eq!(hood.max_payoff(), 13.0);

    let next = rule.step(&lattice);
    assert_eq!(next.get(1, 1), Strategy::Defect);
    assert_eq!(next.count(Strategy::Defect), 9);
    // The step reads only the old lattice
    assert_eq!(lattice.get(1, 1), Strategy::Cooperate);
}

#[test]
fn test_cooperator_block_survives_weak_dilemma() {
    // A 3x3 cooperator block in a defector sea on a larger torus. The block's
    // center sees only cooperators, so it can never be taken over.
    let game = GameKind::PrisonerClusters.default_definition();
    let rule = UpdateRule::new(&game);
    let mut lattice = Lattice::new(11, Strategy::Defect).unwrap();
    for row in 4..7 {
        for col in 4..7 {
            lattice.set(row, col, Strategy::Cooperate);
        }
    }
    let next = rule.step(&lattice);
    assert_eq!(next.get(5, 5), Strategy::Cooperate);
}

#[test]
fn test_seeded_runs_are_identical() {
    for mode in SchedulingMode::ALL {
        for order in AsyncOrder::ALL {
            let mut config = SimulationConfig::default()
                .with_grid_size(16)
                .with_game(GameDefinition::hawk_dove(2.0, 4.0))
                .with_scheduling(mode)
                .with_seed(1234);
            config.async_order = order;

            let a: Vec<Lattice> = run(config.clone()).unwrap().take(8).collect();
            let b: Vec<Lattice> = run(config).unwrap().take(8).collect();
            assert_eq!(a, b, "{} / {}", mode, order);
        }
    }
}

#[test]
fn test_parallel_threshold_does_not_change_trajectory() {
    let base = SimulationConfig::default()
        .with_grid_size(24)
        .with_game(GameDefinition::hawk_dove(2.0, 4.0))
        .with_seed(77);
    let mut parallel = base.clone();
    parallel.parallel_threshold = 1;
    let mut sequential = base;
    sequential.parallel_threshold = usize::MAX;

    let a: Vec<Lattice> = run(parallel).unwrap().take(10).collect();
    let b: Vec<Lattice> = run(sequential).unwrap().take(10).collect();
    assert_eq!(a, b);
}

#[test]
fn test_single_cell_update_changes_at_most_one_cell() {
    let config = SimulationConfig::default()
        .with_grid_size(10)
        .with_game(GameDefinition::hawk_dove(2.0, 4.0))
        .with_seed(5);
    let sim = Simulator::new(config).unwrap();
    let rule = *sim.rule();
    let mut lattice = sim.initial_lattice().clone();

    for row in 0..10 {
        for col in 0..10 {
            let before = lattice.clone();
            rule.update_cell(&mut lattice, row, col);
            let changed = before
                .cells()
                .iter()
                .zip(lattice.cells())
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
        }
    }
}

/// 7x7 hare field with a stag column at col 1 (rows 2..=4) and stags at (2, 4), (4, 4)
///
/// Stag hunt with reward 4 and safe 1: a hare flips once 3 stags are in its
/// neighborhood (4 * 3 = 12 > 9). Cell (3, 2) sees the column's 3 stags.
/// Cell (3, 3) sees only 2 stags unless (3, 2) has already flipped.
fn stag_cascade_lattice() -> Lattice {
    let mut lattice = Lattice::new(7, Strategy::Defect).unwrap();
    for (row, col) in [(2, 1), (3, 1), (4, 1), (2, 4), (4, 4)] {
        lattice.set(row, col, Strategy::Cooperate);
    }
    lattice
}

#[test]
fn test_async_update_sees_earlier_writes() {
    let rule = UpdateRule::new(&GameDefinition::stag_hunt(4.0, 1.0));

    let mut forward = stag_cascade_lattice();
    assert!(rule.update_cell(&mut forward, 3, 2));
    assert!(rule.update_cell(&mut forward, 3, 3));
    assert_eq!(forward.get(3, 3), Strategy::Cooperate);

    let mut reversed = stag_cascade_lattice();
    assert!(!rule.update_cell(&mut reversed, 3, 3));
    assert!(rule.update_cell(&mut reversed, 3, 2));
    assert_eq!(reversed.get(3, 3), Strategy::Defect);

    // The synchronous pass reads only the old lattice, so (3, 3) stays a hare
    let next = rule.step(&stag_cascade_lattice());
    assert_eq!(next.get(3, 2), Strategy::Cooperate);
    assert_eq!(next.get(3, 3), Strategy::Defect);
}

#[test]
fn test_shuffled_order_depends_on_seed() {
    let config = SimulationConfig::default()
        .with_grid_size(16)
        .with_game(GameDefinition::hawk_dove(2.0, 4.0))
        .with_seed(3);
    let sim = Simulator::new(config).unwrap();
    let rule = *sim.rule();

    let outcomes: Vec<Lattice> = (0..8u64)
        .map(|seed| {
            let mut lattice = sim.initial_lattice().clone();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rule.step_async(&mut lattice, AsyncOrder::Shuffled, &mut rng);
            lattice
        })
        .collect();
    assert!(outcomes.iter().any(|lattice| lattice != &outcomes[0]));
}

#[test]
fn test_hawk_dove_fifty_generations() {
    let config = SimulationConfig::default()
        .with_grid_size(40)
        .with_game(GameDefinition::hawk_dove(2.0, 4.0))
        .with_initial_condition(InitialCondition::Random, 0.5)
        .with_scheduling(SchedulingMode::Synchronous)
        .with_seed(99);
    let sim = Simulator::new(config).unwrap();
    let snapshots: Vec<Lattice> = sim.generations().take(51).collect();
    assert_eq!(snapshots.len(), 51);
    for lattice in &snapshots {
        assert_eq!(lattice.len(), 1600);
    }
}

#[test]
fn test_invalid_configs_rejected_at_construction() {
    let zero = SimulationConfig::default().with_grid_size(0);
    assert!(matches!(Simulator::new(zero), Err(FieldError::Configuration(_))));

    let dense = SimulationConfig::default().with_initial_condition(InitialCondition::Random, 1.01);
    assert!(matches!(Simulator::new(dense), Err(FieldError::Configuration(_))));
}

#[test]
fn test_load_scenario_file() {
    let config =
        SimulationConfig::load(Path::new("data/scenarios/coordination_cascade.toml")).unwrap();
    let preset = Scenario::CoordinationCascade.config();
    assert_eq!(config.grid_size, preset.grid_size);
    assert_eq!(config.game, preset.game);
    assert_eq!(config.initial_coop_density, preset.initial_coop_density);
    assert_eq!(config.seed, Some(2024));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = SimulationConfig::load(Path::new("data/scenarios/does_not_exist.toml")).unwrap_err();
    assert!(matches!(err, FieldError::IoError(_)));
}
