//! Шоудаун: ручное объявление победителей и раздача сайд-потов.

use chip_tracker::domain::{Chips, Player, PlayerId, TableSettings, TableStakes};
use chip_tracker::engine::pot::distribute_pots;
use chip_tracker::engine::side_pots::SidePot;
use chip_tracker::engine::{ChipTable, EngineError, FinishReason, PlayerAction, PlayerActionKind};

fn pid(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn chips(n: u64) -> Chips {
    Chips::whole(n)
}

fn table_with_stacks(stacks: &[(&str, u64)]) -> ChipTable {
    let players = stacks
        .iter()
        .map(|(id, stack)| Player::new(pid(id), id.to_uppercase(), chips(*stack)))
        .collect();
    let settings = TableSettings {
        stakes: TableStakes::new(chips(5), chips(10)),
        ..TableSettings::default()
    };
    let mut table = ChipTable::with_players(players, settings);
    table.set_dealer(&pid(stacks[0].0)).unwrap();
    table
}

fn act(table: &mut ChipTable, who: &str, kind: PlayerActionKind) {
    table
        .apply_action(PlayerAction::new(pid(who), kind))
        .unwrap_or_else(|e| panic!("{who}: {e}"));
}

fn stack(table: &ChipTable, who: &str) -> Chips {
    table.player(&pid(who)).unwrap().chips
}

fn total_chips(table: &ChipTable) -> Chips {
    table.players.iter().map(|p| p.chips).sum()
}

#[test]
fn finish_without_winner_is_rejected_and_hand_stays_open() {
    let mut table = table_with_stacks(&[("a", 100), ("b", 100), ("c", 100)]);
    table.start_hand().unwrap();
    let pot_before = table.total_pot();

    assert_eq!(table.finish_hand(&[]), Err(EngineError::NoWinnerSelected));

    assert!(table.is_hand_in_progress());
    assert_eq!(table.total_pot(), pot_before);
}

#[test]
fn folded_winner_does_not_count() {
    let mut table = table_with_stacks(&[("a", 100), ("b", 100), ("c", 100)]);
    table.start_hand().unwrap();
    act(&mut table, "a", PlayerActionKind::Fold);

    assert_eq!(table.finish_hand(&[pid("a")]), Err(EngineError::NoWinnerSelected));
    assert_eq!(
        table.finish_hand(&[pid("nobody")]),
        Err(EngineError::PlayerNotFound(pid("nobody")))
    );
}

#[test]
fn single_winner_takes_everything() {
    let mut table = table_with_stacks(&[("a", 100), ("b", 100), ("c", 100)]);
    table.start_hand().unwrap();
    act(&mut table, "a", PlayerActionKind::Call);
    act(&mut table, "b", PlayerActionKind::Call);
    act(&mut table, "c", PlayerActionKind::Check);

    let result = table.finish_hand(&[pid("b")]).unwrap();

    assert_eq!(result.reason, FinishReason::Showdown);
    assert_eq!(result.total_pot, chips(30));
    assert_eq!(stack(&table, "b"), chips(120));
    assert_eq!(stack(&table, "a"), chips(90));
    assert_eq!(total_chips(&table), chips(300));
    assert!(!table.is_hand_in_progress());
}

/// Банк 9.99 на троих – каждому ровно по 3.33.
#[test]
fn split_pot_between_three_winners() {
    let mut table = table_with_stacks(&[("a", 100), ("b", 100), ("c", 100)]);
    table.set_stakes(TableStakes::new(Chips(1_00), Chips(2_00))).unwrap();
    table.start_hand().unwrap();
    act(&mut table, "a", PlayerActionKind::Raise(Chips(3_33)));
    act(&mut table, "b", PlayerActionKind::Call);
    act(&mut table, "c", PlayerActionKind::Call);
    assert_eq!(table.total_pot(), Chips(9_99));

    let result = table.finish_hand(&[pid("a"), pid("b"), pid("c")]).unwrap();

    assert_eq!(result.awards.len(), 3);
    assert!(result.awards.iter().all(|a| a.amount == Chips(3_33)));
    assert!(table.players.iter().all(|p| p.chips == chips(100)));
}

/// Доли округляются до сотых: 10.00 на троих – по 3.33.
#[test]
fn split_share_rounds_to_two_decimals() {
    let pots = vec![SidePot {
        amount: chips(10),
        eligible: vec![pid("a"), pid("b"), pid("c")],
    }];

    let awards = distribute_pots(&pots, &[pid("a"), pid("b"), pid("c")], |_| true);

    assert_eq!(awards.len(), 3);
    assert!(awards.iter().all(|a| a.amount == Chips(3_33)));

    // 0.05 на двоих: 0.025 округляется вверх до 0.03.
    assert_eq!(Chips(5).split_even(2), Chips(3));
}

/// Короткий стек выигрывает только основной пот, сайд-пот уходит следующему.
#[test]
fn short_all_in_winner_takes_only_main_pot() {
    let mut table = table_with_stacks(&[("a", 20), ("b", 100), ("c", 100)]);
    table.start_hand().unwrap();

    // a – дилер и ходит первым.
    act(&mut table, "a", PlayerActionKind::AllIn);
    act(&mut table, "b", PlayerActionKind::Raise(chips(50)));
    act(&mut table, "c", PlayerActionKind::Call);

    let pots = table.pots();
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].amount, chips(60));
    assert_eq!(pots[1].amount, chips(60));

    // Объявлены a (лучшая рука) и c (вторая) – сайд-пот a не положен.
    let result = table.finish_hand(&[pid("a"), pid("c")]).unwrap();

    assert_eq!(result.total_pot, chips(120));
    // Основной пот 60 делят a и c, сайд-пот 60 – только c.
    assert_eq!(stack(&table, "a"), chips(30));
    assert_eq!(stack(&table, "c"), chips(50 + 30 + 60));
    assert_eq!(stack(&table, "b"), chips(50));
    assert_eq!(total_chips(&table), chips(220));
}

/// Непокрытую часть ставки забирает тот, кто её поставил, даже если выиграл другой.
#[test]
fn uncalled_excess_returns_to_its_owner() {
    let mut table = table_with_stacks(&[("a", 30), ("b", 100), ("c", 100)]);
    table.start_hand().unwrap();

    act(&mut table, "a", PlayerActionKind::AllIn);
    act(&mut table, "b", PlayerActionKind::Raise(chips(80)));
    act(&mut table, "c", PlayerActionKind::Fold);

    // Вклады: a 30, b 80, c 10 (BB).
    let result = table.finish_hand(&[pid("a")]).unwrap();

    assert_eq!(result.total_pot, chips(120));
    // a выигрывает 30*2 + 10 = 70; остаток 50 возвращается b.
    assert_eq!(stack(&table, "a"), chips(70));
    assert_eq!(stack(&table, "b"), chips(20 + 50));
    assert_eq!(total_chips(&table), chips(230));
}
