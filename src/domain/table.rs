use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::currency::Currency;

/// Стейки стола (SB/BB). Нулевой BB означает "блайнды ещё не заданы".
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }

    pub fn is_set(&self) -> bool {
        !self.big_blind.is_zero()
    }

    /// Минимальный размер докупки – один большой блайнд.
    pub fn min_top_up(&self) -> Chips {
        self.big_blind
    }
}

/// Настройки стола, которые задаются вне раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSettings {
    pub stakes: TableStakes,
    pub currency: Currency,
}
