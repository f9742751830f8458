use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::side_pots::{compute_side_pots, Contributions, SidePot};

/// Состояние ставок в текущей раздаче.
///
/// Улиц трекер не различает: ставка и вклады копятся на всю раздачу.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, raise, all-in).
    pub current_bet: Chips,
    /// Сколько всего фишек внёс каждый игрок (для side pots).
    pub contributions: Contributions,
}

impl BettingState {
    pub fn new(current_bet: Chips) -> Self {
        Self {
            current_bet,
            ..Self::default()
        }
    }

    /// Сколько игрок уже внёс в этой раздаче.
    pub fn contributed(&self, id: &PlayerId) -> Chips {
        self.contributions.get(id).copied().unwrap_or(Chips::ZERO)
    }

    /// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
    pub fn to_call(&self, id: &PlayerId) -> Chips {
        self.current_bet.saturating_sub(self.contributed(id))
    }

    /// Обновить вклады.
    pub fn commit(&mut self, id: &PlayerId, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        *self.contributions.entry(id.clone()).or_insert(Chips::ZERO) += amount;
    }

    /// Поднять ставку (raise / all-in выше текущей).
    pub fn on_raise(&mut self, new_bet: Chips) {
        self.current_bet = new_bet;
    }

    pub fn pots(&self) -> Vec<SidePot> {
        compute_side_pots(&self.contributions)
    }

    /// Банк целиком = сумма всех вкладов.
    pub fn total_pot(&self) -> Chips {
        self.contributions.values().copied().sum()
    }
}
