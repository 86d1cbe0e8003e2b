//! Tests for the JSON game view.

use mahjong_driver::Seat;
use mahjong_learn::{GameView, NO_TILE, play_random, step_random};
use mahjong_rules::{GameConfig, MahjongGame};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_view_json_shape() {
    let game = MahjongGame::new(&GameConfig::default().with_seed(2)).expect("Start failed");
    let json = serde_json::to_value(GameView::of(&game)).expect("Serialize failed");

    assert_eq!(json["has_ended"], false);
    assert_eq!(json["state_name"], "Must Discard");
    assert_eq!(json["prevalent_wind"], "East");
    assert_eq!(json["active_players"], serde_json::json!([0]));
    assert_eq!(json["active_discard"], NO_TILE);
    assert_eq!(json["players"]["3"]["wind"], "North");
    assert!(json["players"]["0"]["actions"]["0"].is_string());
    assert!(
        json["wall"][0]
            .as_str()
            .is_some_and(|entry| entry.contains("× "))
    );
}

#[test]
fn test_view_during_reactions() {
    let game = MahjongGame::new(&GameConfig::default().with_seed(6)).expect("Start failed");
    let mut rng = StdRng::seed_from_u64(6);
    while game.state_name() != "Tile Discarded" {
        step_random(&game, &mut rng).expect("Step failed");
    }

    let view = GameView::of(&game);
    let active = *game.snapshot().active_seat();

    assert_ne!(view.active_discard(), NO_TILE);
    let mut reacting: Vec<Seat> = active.others().to_vec();
    reacting.sort();
    assert_eq!(view.active_players(), &reacting);
    assert!(view.players()[&active].actions().is_empty());
    for seat in active.others() {
        assert_eq!(view.players()[&seat].actions()[&0], "Do nothing");
    }
}

#[test]
fn test_view_of_ended_game() {
    let game = MahjongGame::new(&GameConfig::default().with_seed(9)).expect("Start failed");
    let mut rng = StdRng::seed_from_u64(9);
    play_random(&game, &mut rng, 10_000).expect("Random play failed");

    let view = GameView::of(&game);
    assert!(view.has_ended());
    assert_eq!(view.state_name(), "Game Ended");
    assert!(view.active_players().is_empty());
}
