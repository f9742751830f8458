use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Player, PlayerId};

/// Позиция игрока в раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Position {
    Dealer,
    SmallBlind,
    BigBlind,
    /// Сидит за столом, но без особой позиции.
    None,
}

impl Position {
    pub fn label(&self) -> &'static str {
        match self {
            Position::Dealer => "D",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::None => "",
        }
    }
}

/// Рассадка на раздачу: позиции + кто платит блайнды + кто ходит первым.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seating {
    pub positions: BTreeMap<PlayerId, Position>,
    pub dealer: Option<PlayerId>,
    pub small_blind: Option<PlayerId>,
    pub big_blind: Option<PlayerId>,
    pub first_to_act: Option<PlayerId>,
}

impl Seating {
    pub fn position_of(&self, id: &PlayerId) -> Option<Position> {
        self.positions.get(id).copied()
    }
}

/// Индекс игрока в порядке рассадки.
pub fn seat_index(players: &[Player], id: &PlayerId) -> Option<usize> {
    players.iter().position(|p| &p.id == id)
}

/// Игроки по кругу, начиная с `start` (включительно).
pub fn ordered_from(players: &[Player], start: usize) -> impl Iterator<Item = &Player> {
    let n = players.len();
    (0..n).map(move |i| &players[(start + i) % n])
}

/// Посчитать позиции от заданного дилера.
///
/// Берём игроков по кругу начиная с дилера и отбрасываем sit out.
/// - 3+ игрока: D, SB, BB – первые три, первый ход у `active[3 % n]`;
/// - хедз-ап: дилер ставит SB и ходит первым, второй игрок – BB.
///
/// Если дилера нет в списке – пустая рассадка.
pub fn compute_seating(players: &[Player], dealer: &PlayerId) -> Seating {
    let Some(idx) = seat_index(players, dealer) else {
        return Seating::default();
    };

    let active: Vec<&PlayerId> = ordered_from(players, idx)
        .filter(|p| p.is_seated())
        .map(|p| &p.id)
        .collect();

    let mut seating = Seating {
        positions: active.iter().map(|id| ((*id).clone(), Position::None)).collect(),
        ..Seating::default()
    };

    let n = active.len();
    if n < 2 {
        return seating;
    }

    let (d, sb, bb, first) = if n == 2 {
        (active[0], active[0], active[1], active[0])
    } else {
        (active[0], active[1], active[2], active[3 % n])
    };

    seating.positions.insert(d.clone(), Position::Dealer);
    if sb != d {
        seating.positions.insert(sb.clone(), Position::SmallBlind);
    }
    seating.positions.insert(bb.clone(), Position::BigBlind);

    seating.dealer = Some(d.clone());
    seating.small_blind = Some(sb.clone());
    seating.big_blind = Some(bb.clone());
    seating.first_to_act = Some(first.clone());

    seating
}

/// Следующий дилер: ближайший по кругу игрок после текущего, который не sit out.
/// Если текущего дилера нет – первый сидящий игрок.
pub fn next_dealer(players: &[Player], current: Option<&PlayerId>) -> Option<PlayerId> {
    if players.is_empty() {
        return None;
    }

    match current.and_then(|id| seat_index(players, id)) {
        Some(idx) => ordered_from(players, idx + 1)
            .filter(|p| p.is_seated())
            .map(|p| p.id.clone())
            .next(),
        None => players.iter().find(|p| p.is_seated()).map(|p| p.id.clone()),
    }
}
