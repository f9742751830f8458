use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::side_pots::SidePot;

/// Выплата одному игроку по итогам раздачи (сумма по всем потам).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Раздать поты объявленным победителям.
///
/// Для каждого пота:
/// - делим поровну между объявленными победителями, которые на него претендуют;
/// - если таких нет – между живыми претендентами пота (непокрытая часть ставки
///   возвращается тому, кто её поставил);
/// - если живых претендентов нет вовсе – между объявленными победителями.
///
/// Доли округляются до сотых.
pub fn distribute_pots(
    pots: &[SidePot],
    winners: &[PlayerId],
    is_live: impl Fn(&PlayerId) -> bool,
) -> Vec<PotAward> {
    let mut totals: BTreeMap<PlayerId, Chips> = BTreeMap::new();

    for pot in pots {
        if pot.amount.is_zero() {
            continue;
        }

        let live_eligible: Vec<&PlayerId> = pot.eligible.iter().filter(|id| is_live(id)).collect();

        let mut receivers: Vec<&PlayerId> = live_eligible
            .iter()
            .copied()
            .filter(|id| winners.contains(id))
            .collect();
        if receivers.is_empty() {
            receivers = live_eligible;
        }
        if receivers.is_empty() {
            receivers = winners.iter().collect();
        }
        if receivers.is_empty() {
            continue;
        }

        let share = pot.amount.split_even(receivers.len());
        for id in receivers {
            *totals.entry(id.clone()).or_insert(Chips::ZERO) += share;
        }
    }

    totals
        .into_iter()
        .map(|(player_id, amount)| PotAward { player_id, amount })
        .collect()
}
