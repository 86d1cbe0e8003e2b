//! Properties every reachable game state must hold.

use mahjong_driver::{DriverError, Seat, Selection};
use mahjong_learn::{play_random, step_random};
use mahjong_rules::{GameConfig, MahjongGame, TILE_SET_SIZE, state};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded_game(seed: u64) -> MahjongGame {
    MahjongGame::new(&GameConfig::default().with_seed(seed)).expect("Game failed to start")
}

#[test]
fn test_random_games_conserve_tiles_to_the_end() {
    for seed in [1, 2, 3] {
        let game = seeded_game(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let report = play_random(&game, &mut rng, 10_000).expect("Random play failed");

        assert!(report.terminated());
        assert_eq!(report.final_state(), state::GAME_ENDED);
        assert!(*report.transitions() > 0);
        assert_eq!(game.tile_count(), TILE_SET_SIZE);
    }
}

#[test]
fn test_missing_seat_is_rejected_without_change() {
    let game = seeded_game(12);
    let mut rng = StdRng::seed_from_u64(12);

    // Discard, so every other seat has to react.
    while game.state_name() != state::TILE_DISCARDED {
        step_random(&game, &mut rng).expect("Step failed");
    }

    let before = game.snapshot();
    let active = *before.active_seat();
    let mut selection: Selection = active.others().into_iter().map(|s| (s, 0)).collect();
    let dropped = active.others()[1];
    selection.remove(&dropped);

    let err = game.transition(&selection).expect_err("Missing seat accepted");
    assert!(matches!(err, DriverError::IncorrectAction { seat, .. } if seat == dropped));
    assert_eq!(game.state_name(), state::TILE_DISCARDED);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_out_of_range_index_is_rejected_without_change() {
    let game = seeded_game(13);
    let before = game.snapshot();
    let options = game.available_actions()[&Seat::First].len();

    let err = game
        .transition(&Selection::from([(Seat::First, options)]))
        .expect_err("Out of range index accepted");

    assert_eq!(
        err.to_string(),
        format!(
            "an action is required for seat [0] within range [0 to {}]",
            options - 1
        )
    );
    assert_eq!(game.state_name(), state::MUST_DISCARD);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_terminal_transition_is_noop() {
    let game = seeded_game(4);
    let mut rng = StdRng::seed_from_u64(4);
    play_random(&game, &mut rng, 10_000).expect("Random play failed");

    let before = game.snapshot();
    for selection in [Selection::new(), Selection::from([(Seat::Third, 99)])] {
        game.transition(&selection).expect("Terminal transition failed");
        assert!(game.has_terminated());
        assert_eq!(game.state_name(), state::GAME_ENDED);
    }
    assert!(game.available_actions().is_empty());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_same_seed_and_choices_replay_exactly() {
    let play = |seed: u64, steps: usize| {
        let game = seeded_game(seed);
        let mut rng = StdRng::seed_from_u64(seed * 31);
        for _ in 0..steps {
            step_random(&game, &mut rng).expect("Step failed");
        }
        game.snapshot()
    };

    assert_eq!(play(77, 60), play(77, 60));
    assert_ne!(play(77, 60), play(78, 60));
}

#[test]
fn test_whole_game_replays_exactly() {
    let finish = |seed: u64| {
        let game = seeded_game(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let report = play_random(&game, &mut rng, 10_000).expect("Random play failed");
        (report, game.snapshot())
    };

    assert_eq!(finish(5), finish(5));
}

#[test]
fn test_every_decision_has_choices() {
    let game = seeded_game(8);
    let mut rng = StdRng::seed_from_u64(8);

    while !game.has_terminated() {
        let actions = game.available_actions();
        assert!(!actions.is_empty(), "stopped in {} without menus", game.state_name());
        assert!(actions.values().all(|menu| !menu.is_empty()));
        step_random(&game, &mut rng).expect("Step failed");
    }
}
