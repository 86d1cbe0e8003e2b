//! The mahjong turn engine as a graph of driver states.
//!
//! Each [`Step`] is one kind of state. Builders return the state value for
//! a step; the table is handed to each transition explicitly.

use crate::{MahjongAction, Table, Wind, table::DEAD_WALL_SIZE};
use mahjong_driver::{Seat, SeatActions, SelectedActions, State, Transition, TransitionError};
use tracing::{debug, info, instrument, warn};

/// Name of the state a new game starts in.
pub const NEW_GAME: &str = "New Game";
/// Name of the state between rounds.
pub const NEXT_ROUND: &str = "Next Round";
/// Name of the state that deals the active seat its tile.
pub const NEXT_TURN: &str = "Next Turn";
/// Name of the state where the active seat answers its draw.
pub const MUST_DISCARD: &str = "Must Discard";
/// Name of the state where the other seats react to a discard.
pub const TILE_DISCARDED: &str = "Tile Discarded";
/// Name of the terminal state.
pub const GAME_ENDED: &str = "Game Ended";

/// Kinds of state in the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Deal starting hands.
    NewGame,
    /// End the game, or rotate winds and deal the next round.
    NextRound,
    /// Deal the active seat a tile, or end the round on a short wall.
    NextTurn,
    /// Wait for the active seat to answer its draw or claim.
    MustDiscard,
    /// Wait for the other seats to react to the active discard.
    TileDiscarded,
}

/// State a new game starts in.
pub fn new_game() -> State<Step> {
    State::intermediate(NEW_GAME, Step::NewGame)
}

/// State between two rounds.
pub fn next_round() -> State<Step> {
    State::intermediate(NEXT_ROUND, Step::NextRound)
}

/// State that deals the next tile.
pub fn next_turn() -> State<Step> {
    State::intermediate(NEXT_TURN, Step::NextTurn)
}

/// State waiting on the active seat, with its menu computed from `table`.
pub fn must_discard(table: &Table) -> State<Step> {
    let mut actions = SeatActions::new();
    actions.insert(
        *table.active_seat(),
        table.active_player().must_discard_actions(),
    );
    State::new(MUST_DISCARD, actions, Step::MustDiscard)
}

/// State waiting on every seat but the active one.
///
/// # Errors
///
/// Fails if no discard is pending.
pub fn tile_discarded(table: &Table) -> Result<State<Step>, TransitionError> {
    let discard = table
        .active_discard()
        .ok_or_else(|| TransitionError::new("no discard to react to"))?;
    let next_seat = table.active_seat().next();

    let actions: SeatActions<MahjongAction> = table
        .reacting_seats()
        .into_iter()
        .map(|seat| {
            let menu = table
                .player(seat)
                .tile_discarded_actions(discard, seat == next_seat);
            (seat, menu)
        })
        .collect();

    Ok(State::new(TILE_DISCARDED, actions, Step::TileDiscarded))
}

/// The terminal state.
pub fn game_ended() -> State<Step> {
    State::terminal(GAME_ENDED)
}

impl Transition for Step {
    type Context = Table;
    type Action = MahjongAction;

    #[instrument(skip(table, selected), fields(active_seat = %table.active_seat()))]
    fn transition(
        &self,
        table: &mut Table,
        selected: SelectedActions<MahjongAction>,
    ) -> Result<State<Step>, TransitionError> {
        match self {
            Step::NewGame => {
                table.initialize()?;
                Ok(next_turn())
            }
            Step::NextRound => try_next_round(table),
            Step::NextTurn => try_deal_tile(table),
            Step::MustDiscard => handle_must_discard(table, &selected),
            Step::TileDiscarded => handle_tile_discarded(table, &selected),
        }
    }
}

fn try_next_round(table: &mut Table) -> Result<State<Step>, TransitionError> {
    let reference_seat = *table.round_reference_seat();
    let reference_wind = *table.player(reference_seat).wind();
    let prevalent_wind = *table.prevalent_wind();

    if prevalent_wind == Wind::North && reference_wind == Wind::North {
        info!(%reference_seat, "Wind cycle complete, game ended");
        return Ok(game_ended());
    }

    if reference_wind == prevalent_wind {
        table.next_prevalent_wind();
    }

    table.reset_wall();
    table.prepare_next_round()?;
    info!(prevalent_wind = %table.prevalent_wind(), "New round dealt");

    Ok(next_turn())
}

fn try_deal_tile(table: &mut Table) -> Result<State<Step>, TransitionError> {
    if table.wall().size() <= DEAD_WALL_SIZE {
        debug!(wall = table.wall().size(), "Wall exhausted, round over");
        return Ok(next_round());
    }

    table.deal_to_active_player()?;
    Ok(must_discard(table))
}

fn handle_must_discard(
    table: &mut Table,
    selected: &SelectedActions<MahjongAction>,
) -> Result<State<Step>, TransitionError> {
    let seat = *table.active_seat();
    let action = selected
        .get(&seat)
        .copied()
        .ok_or_else(|| TransitionError::new(format!("no action given for active seat {}", seat)))?;

    debug!(%seat, %action, "Active seat answers");
    match action {
        MahjongAction::Discard(tile) => {
            table.discards(tile)?;
            tile_discarded(table)
        }
        MahjongAction::DeclareConcealedKong(tile) => {
            table.ensure_drawable(1)?;
            table.declares_concealed_kong(tile)?;
            table.deal_to_active_player()?;
            Ok(must_discard(table))
        }
        MahjongAction::ExposedPungToKong => {
            table.ensure_drawable(1)?;
            table.adds_to_exposed_pung()?;
            table.deal_to_active_player()?;
            Ok(must_discard(table))
        }
        MahjongAction::DeclareMahjong => Ok(next_round()),
        other => {
            warn!(%seat, action = ?other, "Not an answer to a draw");
            Err(TransitionError::new(format!(
                "illegal action {:?} in response to a draw",
                other
            )))
        }
    }
}

/// Picks the winning reaction and applies it.
///
/// Seats are scanned in proximity order from the active seat, and only a
/// strictly higher priority replaces the best so far, so the closest seat
/// wins ties.
fn handle_tile_discarded(
    table: &mut Table,
    selected: &SelectedActions<MahjongAction>,
) -> Result<State<Step>, TransitionError> {
    let mut best: Option<(Seat, MahjongAction, u8)> = None;

    for seat in table.reacting_seats() {
        let action = selected.get(&seat).copied().ok_or_else(|| {
            TransitionError::new(format!("no reaction given for seat {}", seat))
        })?;
        let priority = action.reaction_priority().ok_or_else(|| {
            TransitionError::new(format!(
                "invalid action {:?} given in response to a discard by seat {}",
                action, seat
            ))
        })?;

        if best.is_none_or(|(_, _, top)| priority > top) {
            best = Some((seat, action, priority));
        }
    }

    let Some((seat, action, _)) = best else {
        return Err(TransitionError::new("no seat reacted to the discard"));
    };

    debug!(%seat, %action, "Reaction resolved");
    match action {
        MahjongAction::DoNothing => {
            table.takes_discarded()?;
            table.activate_seat(seat);
            Ok(next_turn())
        }
        MahjongAction::DeclareChow(first) => {
            table.takes_chow(seat, first)?;
            Ok(must_discard(table))
        }
        MahjongAction::DeclarePung => {
            table.takes_pung(seat)?;
            Ok(must_discard(table))
        }
        MahjongAction::DeclareKong => {
            table.ensure_drawable(1)?;
            table.takes_kong(seat)?;
            table.deal_to_active_player()?;
            Ok(must_discard(table))
        }
        MahjongAction::DeclareMahjong => Ok(next_round()),
        other => Err(TransitionError::new(format!(
            "invalid state after resolving the discard: best action {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Combination, Tile, TileCollection};

    fn hand(tiles: &[Tile]) -> TileCollection {
        tiles.iter().copied().collect()
    }

    /// Table where the first seat has just discarded `tile`.
    fn table_after_discard(tile: Tile) -> Table {
        let mut table = Table::new(Some(17));
        table.player_mut_for_test(Seat::First).received = Some(tile);
        table.discards(tile).unwrap();
        table
    }

    fn reactions(second: MahjongAction, third: MahjongAction, fourth: MahjongAction) -> SelectedActions<MahjongAction> {
        [(Seat::Second, second), (Seat::Third, third), (Seat::Fourth, fourth)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_new_game_deals_then_turns() {
        let mut table = Table::new(Some(1));
        let next = Step::NewGame
            .transition(&mut table, SelectedActions::new())
            .unwrap();
        assert_eq!(next.name(), NEXT_TURN);
        assert_eq!(table.player(Seat::Third).concealed().size(), 13);
    }

    #[test]
    fn test_next_turn_deals_to_active_seat() {
        let mut table = Table::new(Some(1));
        table.initialize().unwrap();

        let next = Step::NextTurn
            .transition(&mut table, SelectedActions::new())
            .unwrap();
        assert_eq!(next.name(), MUST_DISCARD);
        assert!(table.active_player().received().is_some());

        let menus = next.actions().unwrap();
        assert_eq!(menus.keys().copied().collect::<Vec<_>>(), vec![Seat::First]);
    }

    #[test]
    fn test_short_wall_ends_round() {
        let mut table = Table::new(Some(1));
        *table.wall_mut_for_test() = hand(&[Tile::Bamboo1; 4]);
        let next = Step::NextTurn
            .transition(&mut table, SelectedActions::new())
            .unwrap();
        assert_eq!(next.name(), NEXT_ROUND);
        assert_eq!(table.active_player().received(), &None);
    }

    #[test]
    fn test_discard_offers_reactions_to_others() {
        let mut table = Table::new(Some(3));
        table.player_mut_for_test(Seat::First).received = Some(Tile::Bamboo5);
        table.player_mut_for_test(Seat::Second).concealed = hand(&[Tile::Bamboo3, Tile::Bamboo4]);
        table.player_mut_for_test(Seat::Third).concealed = hand(&[Tile::Bamboo3, Tile::Bamboo4]);

        let mut selected = SelectedActions::new();
        selected.insert(Seat::First, MahjongAction::Discard(Tile::Bamboo5));
        let next = Step::MustDiscard.transition(&mut table, selected).unwrap();

        assert_eq!(next.name(), TILE_DISCARDED);
        let menus = next.actions().unwrap();
        assert!(!menus.contains_key(&Seat::First));
        assert_eq!(
            menus[&Seat::Second],
            vec![
                MahjongAction::DoNothing,
                MahjongAction::DeclareChow(Tile::Bamboo3)
            ]
        );
        assert_eq!(menus[&Seat::Third], vec![MahjongAction::DoNothing]);
        assert_eq!(menus[&Seat::Fourth], vec![MahjongAction::DoNothing]);
    }

    #[test]
    fn test_all_pass_moves_discard_and_turn() {
        let mut table = table_after_discard(Tile::RedDragon);
        let next = Step::TileDiscarded
            .transition(
                &mut table,
                reactions(
                    MahjongAction::DoNothing,
                    MahjongAction::DoNothing,
                    MahjongAction::DoNothing,
                ),
            )
            .unwrap();

        assert_eq!(next.name(), NEXT_TURN);
        assert_eq!(*table.active_seat(), Seat::Second);
        assert_eq!(table.active_discard(), &None);
        assert_eq!(table.player(Seat::First).discarded().count(Tile::RedDragon), 1);
    }

    #[test]
    fn test_pung_tie_goes_to_closer_seat() {
        let mut table = table_after_discard(Tile::WhiteDragon);
        table.player_mut_for_test(Seat::Second).concealed = hand(&[Tile::WhiteDragon; 2]);
        table.player_mut_for_test(Seat::Third).concealed = hand(&[Tile::WhiteDragon; 2]);

        let next = Step::TileDiscarded
            .transition(
                &mut table,
                reactions(
                    MahjongAction::DeclarePung,
                    MahjongAction::DeclarePung,
                    MahjongAction::DoNothing,
                ),
            )
            .unwrap();

        assert_eq!(next.name(), MUST_DISCARD);
        assert_eq!(*table.active_seat(), Seat::Second);
        assert!(table.player(Seat::Second).exposed().contains(&Combination::Pung {
            tile: Tile::WhiteDragon
        }));
        assert!(table.player(Seat::Third).exposed().is_empty());
    }

    #[test]
    fn test_higher_priority_beats_proximity() {
        let mut table = table_after_discard(Tile::Circles6);
        table.player_mut_for_test(Seat::Second).concealed = hand(&[Tile::Circles4, Tile::Circles5]);
        table.player_mut_for_test(Seat::Fourth).concealed = hand(&[Tile::Circles6; 3]);

        let next = Step::TileDiscarded
            .transition(
                &mut table,
                reactions(
                    MahjongAction::DeclareChow(Tile::Circles4),
                    MahjongAction::DoNothing,
                    MahjongAction::DeclareKong,
                ),
            )
            .unwrap();

        assert_eq!(next.name(), MUST_DISCARD);
        assert_eq!(*table.active_seat(), Seat::Fourth);
        let winner = table.player(Seat::Fourth);
        assert_eq!(winner.exposed().tile_count(), 4);
        assert!(winner.received().is_some());
    }

    #[test]
    fn test_chow_claim_needs_no_draw() {
        let mut table = table_after_discard(Tile::Circles6);
        table.player_mut_for_test(Seat::Second).concealed =
            hand(&[Tile::Circles7, Tile::Circles8, Tile::EastWind]);

        let next = Step::TileDiscarded
            .transition(
                &mut table,
                reactions(
                    MahjongAction::DeclareChow(Tile::Circles6),
                    MahjongAction::DoNothing,
                    MahjongAction::DoNothing,
                ),
            )
            .unwrap();

        let player = table.player(Seat::Second);
        assert_eq!(player.received(), &None);
        assert_eq!(player.concealed(), &hand(&[Tile::EastWind]));
        assert_eq!(
            next.actions().unwrap()[&Seat::Second],
            vec![MahjongAction::Discard(Tile::EastWind)]
        );
    }

    #[test]
    fn test_draw_answer_as_reaction_is_rejected() {
        let mut table = table_after_discard(Tile::Bamboo9);
        let before = table.snapshot();

        let result = Step::TileDiscarded.transition(
            &mut table,
            reactions(
                MahjongAction::DoNothing,
                MahjongAction::Discard(Tile::Bamboo9),
                MahjongAction::DoNothing,
            ),
        );

        assert!(result.is_err());
        assert_eq!(table.snapshot(), before);
    }

    #[test]
    fn test_reaction_as_draw_answer_is_rejected() {
        let mut table = Table::new(Some(2));
        table.player_mut_for_test(Seat::First).received = Some(Tile::Bamboo9);
        let mut selected = SelectedActions::new();
        selected.insert(Seat::First, MahjongAction::DeclarePung);

        assert!(Step::MustDiscard.transition(&mut table, selected).is_err());
    }

    #[test]
    fn test_concealed_kong_loops_back_to_must_discard() {
        let mut table = Table::new(Some(8));
        let player = table.player_mut_for_test(Seat::First);
        player.concealed = hand(&[Tile::GreenDragon; 4]);
        player.received = Some(Tile::Bamboo1);
        table.wall_mut_for_test().remove_all(Tile::GreenDragon);
        table.wall_mut_for_test().remove(Tile::Bamboo1);

        let mut selected = SelectedActions::new();
        selected.insert(Seat::First, MahjongAction::DeclareConcealedKong(Tile::GreenDragon));
        let next = Step::MustDiscard.transition(&mut table, selected).unwrap();

        assert_eq!(next.name(), MUST_DISCARD);
        let player = table.active_player();
        assert_eq!(player.concealed().count(Tile::GreenDragon), 0);
        assert!(player.received().is_some());
        assert!(player.exposed().contains(&Combination::Kong {
            tile: Tile::GreenDragon,
            concealed: true
        }));
        assert_eq!(table.tile_count(), 144);
    }

    #[test]
    fn test_pung_upgrade_loops_back_to_must_discard() {
        let mut table = Table::new(Some(9));
        let player = table.player_mut_for_test(Seat::First);
        player.concealed = hand(&[Tile::Circles2, Tile::Circles3, Tile::EastWind, Tile::EastWind]);
        player.exposed.add(Combination::Pung {
            tile: Tile::WhiteDragon,
        });
        player.received = Some(Tile::WhiteDragon);
        table.wall_mut_for_test().remove_all(Tile::WhiteDragon);
        for tile in [Tile::Circles2, Tile::Circles3, Tile::EastWind, Tile::EastWind] {
            table.wall_mut_for_test().remove(tile);
        }
        assert_eq!(table.tile_count(), 144);

        let mut selected = SelectedActions::new();
        selected.insert(Seat::First, MahjongAction::ExposedPungToKong);
        let next = Step::MustDiscard.transition(&mut table, selected).unwrap();

        assert_eq!(next.name(), MUST_DISCARD);
        let player = table.active_player();
        assert!(player.received().is_some());
        assert!(player.exposed().contains(&Combination::Kong {
            tile: Tile::WhiteDragon,
            concealed: false
        }));
        assert!(!player.exposed().contains(&Combination::Pung {
            tile: Tile::WhiteDragon
        }));
        assert_eq!(table.tile_count(), 144);
    }

    #[test]
    fn test_kong_without_replacement_tile_leaves_table_untouched() {
        let mut table = Table::new(Some(10));
        let player = table.player_mut_for_test(Seat::First);
        player.concealed = hand(&[Tile::RedDragon; 4]);
        player.received = Some(Tile::Bamboo3);
        *table.wall_mut_for_test() = hand(&[Tile::FlowerOrchid]);
        let before = table.snapshot();

        let mut selected = SelectedActions::new();
        selected.insert(Seat::First, MahjongAction::DeclareConcealedKong(Tile::RedDragon));

        assert!(Step::MustDiscard.transition(&mut table, selected).is_err());
        assert_eq!(table.snapshot(), before);
    }

    #[test]
    fn test_game_ends_after_full_wind_cycle() {
        let mut table = Table::new(Some(4));
        let mut rounds = 0;
        loop {
            let next = Step::NextRound
                .transition(&mut table, SelectedActions::new())
                .unwrap();
            if next.is_terminal() {
                break;
            }
            rounds += 1;
            assert!(rounds < 16, "game never ended");
        }

        assert_eq!(rounds, 4);
        assert_eq!(*table.prevalent_wind(), Wind::North);
        assert_eq!(*table.player(Seat::Fourth).wind(), Wind::North);
    }

    #[test]
    fn test_reference_seat_changes_game_length() {
        let mut table = Table::new(Some(4)).with_round_reference_seat(Seat::First);
        let mut rounds = 0;
        while !Step::NextRound
            .transition(&mut table, SelectedActions::new())
            .unwrap()
            .is_terminal()
        {
            rounds += 1;
        }
        assert_eq!(rounds, 3);
    }
}
