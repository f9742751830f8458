use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// Вклады игроков в текущую раздачу: сколько суммарно фишек внёс каждый.
pub type Contributions = HashMap<PlayerId, Chips>;

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Игроки, внёсшие не меньше порога этого пота (по возрастанию id).
    pub eligible: Vec<PlayerId>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Вход: contributions[player] = сколько суммарно фишек поставил игрок за раздачу.
/// Выход: список side pots в порядке "от младших" к "старшим".
///
/// Для каждого уровня вклада (по возрастанию) пот равен
/// `(уровень - предыдущий уровень) * число игроков с вкладом >= уровня`,
/// поэтому сумма потов всегда равна сумме вкладов.
pub fn compute_side_pots(contributions: &Contributions) -> Vec<SidePot> {
    // Собираем (player, amount > 0)
    let mut entries: Vec<(&PlayerId, Chips)> = contributions
        .iter()
        .filter(|(_, chips)| !chips.is_zero())
        .map(|(id, chips)| (id, *chips))
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    // Сортируем по размеру вклада, при равенстве – по id (детерминированный вывод).
    entries.sort_by(|(a_id, a), (b_id, b)| a.cmp(b).then_with(|| a_id.cmp(b_id)));

    let mut levels: Vec<Chips> = entries.iter().map(|(_, c)| *c).collect();
    levels.dedup();

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let level_diff = level - prev_level;

        let mut eligible: Vec<PlayerId> = entries
            .iter()
            .filter(|(_, contrib)| *contrib >= level)
            .map(|(id, _)| (*id).clone())
            .collect();
        eligible.sort();

        let pot_amount = Chips(level_diff.0 * eligible.len() as u64);
        pots.push(SidePot {
            amount: pot_amount,
            eligible,
        });

        prev_level = level;
    }

    pots
}

/// Общий размер банка (сумма всех потов).
pub fn total_of(pots: &[SidePot]) -> Chips {
    pots.iter().map(|p| p.amount).sum()
}
