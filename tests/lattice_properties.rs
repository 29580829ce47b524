//! Property tests for lattice invariants under both update disciplines

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use strategic_field::core::{AsyncOrder, Strategy as CellStrategy};
use strategic_field::game::GameDefinition;
use strategic_field::simulation::UpdateRule;
use strategic_field::spatial::Lattice;

fn lattice_strategy() -> impl Strategy<Value = Lattice> {
    (1usize..8).prop_flat_map(|size| {
        prop::collection::vec(any::<bool>(), size * size).prop_map(move |bits| {
            let cells = bits
                .into_iter()
                .map(|b| if b { CellStrategy::Cooperate } else { CellStrategy::Defect })
                .collect();
            Lattice::from_cells(size, cells).unwrap()
        })
    })
}

fn game_strategy() -> impl Strategy<Value = GameDefinition> {
    prop_oneof![
        (0.0f64..6.0, 0.0f64..6.0, 0.0f64..6.0, 0.0f64..6.0)
            .prop_map(|(r, t, p, s)| GameDefinition::prisoners_dilemma(r, t, p, s)),
        (0.5f64..5.0, 0.5f64..8.0).prop_map(|(v, c)| GameDefinition::hawk_dove(v, c)),
        (0.5f64..6.0, 0.5f64..6.0).prop_map(|(reward, safe)| GameDefinition::stag_hunt(reward, safe)),
    ]
}

proptest! {
    #[test]
    fn test_sync_step_preserves_shape(lattice in lattice_strategy(), game in game_strategy()) {
        let next = UpdateRule::new(&game).step(&lattice);
        prop_assert_eq!(next.size(), lattice.size());
        prop_assert_eq!(next.len(), lattice.size() * lattice.size());
    }

    #[test]
    fn test_async_step_preserves_shape(lattice in lattice_strategy(), game in game_strategy(), seed in any::<u64>()) {
        let mut lattice = lattice;
        let size = lattice.size();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let flips = UpdateRule::new(&game).step_async(&mut lattice, AsyncOrder::Shuffled, &mut rng);
        prop_assert_eq!(lattice.len(), size * size);
        prop_assert!(flips <= size * size);
    }

    #[test]
    fn test_single_cell_update_touches_one_cell(
        lattice in lattice_strategy(),
        game in game_strategy(),
        row in 0usize..8,
        col in 0usize..8,
    ) {
        let mut after = lattice.clone();
        let row = row % lattice.size();
        let col = col % lattice.size();
        UpdateRule::new(&game).update_cell(&mut after, row, col);
        let changed: Vec<usize> = (0..lattice.len())
            .filter(|&i| lattice.cells()[i] != after.cells()[i])
            .collect();
        prop_assert!(changed.len() <= 1);
        if let Some(&i) = changed.first() {
            prop_assert_eq!(i, row * lattice.size() + col);
        }
    }

    #[test]
    fn test_parallel_matches_sequential(lattice in lattice_strategy(), game in game_strategy()) {
        let sequential = UpdateRule::new(&game).step(&lattice);
        let parallel = UpdateRule::new(&game).with_parallel_threshold(1).step(&lattice);
        prop_assert_eq!(sequential, parallel);
    }
}
