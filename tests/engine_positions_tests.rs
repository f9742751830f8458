//! Позиции и ротация дилера.
//!
//! - D/SB/BB и первый ход для 2, 3, 4 игроков;
//! - sit out игроки пропускаются;
//! - после раздачи кнопка переходит к следующему сидящему игроку.

use chip_tracker::domain::{Chips, Player, PlayerId, TableSettings, TableStakes};
use chip_tracker::engine::positions::{compute_seating, next_dealer, Position};
use chip_tracker::engine::{ChipTable, PlayerAction, PlayerActionKind};

fn pid(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn roster(names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .map(|n| Player::new(pid(n), n.to_uppercase(), Chips::whole(100)))
        .collect()
}

fn table_with(names: &[&str]) -> ChipTable {
    let settings = TableSettings {
        stakes: TableStakes::new(Chips::whole(1), Chips::whole(2)),
        ..TableSettings::default()
    };
    ChipTable::with_players(roster(names), settings)
}

#[test]
fn seating_four_players_from_dealer() {
    let players = roster(&["a", "b", "c", "d"]);

    let seating = compute_seating(&players, &pid("b"));

    assert_eq!(seating.position_of(&pid("b")), Some(Position::Dealer));
    assert_eq!(seating.position_of(&pid("c")), Some(Position::SmallBlind));
    assert_eq!(seating.position_of(&pid("d")), Some(Position::BigBlind));
    assert_eq!(seating.position_of(&pid("a")), Some(Position::None));
    assert_eq!(seating.first_to_act, Some(pid("a")));
}

#[test]
fn seating_three_players_dealer_acts_first() {
    let players = roster(&["a", "b", "c"]);

    let seating = compute_seating(&players, &pid("a"));

    assert_eq!(seating.small_blind, Some(pid("b")));
    assert_eq!(seating.big_blind, Some(pid("c")));
    assert_eq!(seating.first_to_act, Some(pid("a")));
}

/// Хедз-ап: дилер ставит SB и ходит первым.
#[test]
fn seating_heads_up() {
    let players = roster(&["a", "b"]);

    let seating = compute_seating(&players, &pid("b"));

    assert_eq!(seating.dealer, Some(pid("b")));
    assert_eq!(seating.small_blind, Some(pid("b")));
    assert_eq!(seating.big_blind, Some(pid("a")));
    assert_eq!(seating.first_to_act, Some(pid("b")));
    assert_eq!(seating.position_of(&pid("b")), Some(Position::Dealer));
    assert_eq!(seating.position_of(&pid("a")), Some(Position::BigBlind));
}

#[test]
fn seating_skips_sit_out_players() {
    let mut players = roster(&["a", "b", "c", "d"]);
    players[1].sit_out = true;

    let seating = compute_seating(&players, &pid("a"));

    assert_eq!(seating.position_of(&pid("b")), None);
    assert_eq!(seating.small_blind, Some(pid("c")));
    assert_eq!(seating.big_blind, Some(pid("d")));
}

#[test]
fn seating_with_unknown_dealer_is_empty() {
    let players = roster(&["a", "b"]);

    let seating = compute_seating(&players, &pid("zzz"));

    assert!(seating.positions.is_empty());
    assert!(seating.dealer.is_none());
}

#[test]
fn next_dealer_wraps_and_skips_sit_out() {
    let mut players = roster(&["a", "b", "c"]);
    players[0].sit_out = true;

    assert_eq!(next_dealer(&players, Some(&pid("b"))), Some(pid("c")));
    assert_eq!(next_dealer(&players, Some(&pid("c"))), Some(pid("b")));
    assert_eq!(next_dealer(&players, None), Some(pid("b")));
}

/// После завершения раздачи кнопка переходит к следующему сидящему игроку.
#[test]
fn dealer_advances_after_hand_reset() {
    let mut table = table_with(&["a", "b", "c", "d"]);
    table.toggle_sit_out(&pid("b")).unwrap();
    table.set_dealer(&pid("a")).unwrap();

    table.start_hand().unwrap();
    // a – дилер, c – SB, d – BB, первым ходит a.
    let first = table.current_actor().cloned().unwrap();
    assert_eq!(first, pid("a"));
    table
        .apply_action(PlayerAction::new(pid("a"), PlayerActionKind::Fold))
        .unwrap();
    table
        .apply_action(PlayerAction::new(pid("c"), PlayerActionKind::Fold))
        .unwrap();

    assert!(!table.is_hand_in_progress());
    // b сидит в sit out, поэтому кнопка уходит к c.
    assert_eq!(table.dealer, Some(pid("c")));
    assert_eq!(table.position_of(&pid("c")), Some(Position::Dealer));
}

/// Дилер в sit out: кнопку берёт следующий сидящий, и после раздачи она уходит дальше.
#[test]
fn button_moves_on_when_chosen_dealer_sits_out() {
    let mut table = table_with(&["a", "b", "c", "d"]);
    table.set_dealer(&pid("a")).unwrap();
    table.toggle_sit_out(&pid("a")).unwrap();

    table.start_hand().unwrap();
    assert_eq!(table.dealer, Some(pid("b")));
    assert_eq!(table.position_of(&pid("b")), Some(Position::Dealer));

    // b – дилер и ходит первым (c – SB, d – BB).
    table
        .apply_action(PlayerAction::new(pid("b"), PlayerActionKind::Fold))
        .unwrap();
    table
        .apply_action(PlayerAction::new(pid("c"), PlayerActionKind::Fold))
        .unwrap();
    assert!(!table.is_hand_in_progress());

    assert_eq!(table.dealer, Some(pid("c")));

    table.start_hand().unwrap();
    assert_eq!(table.position_of(&pid("c")), Some(Position::Dealer));
    assert_eq!(table.position_of(&pid("b")), Some(Position::BigBlind));
}
