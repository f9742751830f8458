use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Игрок за столом.
///
/// Формат сериализации совпадает с тем, что лежит в хранилище:
/// `{"id": "...", "name": "...", "chips": 100.5, "sitOut": true, "folded": true}`
/// (флаги пишутся только когда они выставлены).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Текущий стек.
    pub chips: Chips,
    /// Игрок пропускает раздачи (sit out).
    #[serde(default, skip_serializing_if = "is_false")]
    pub sit_out: bool,
    /// Игрок сфолдил в текущей раздаче.
    #[serde(default, skip_serializing_if = "is_false")]
    pub folded: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, chips: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            sit_out: false,
            folded: false,
        }
    }

    /// Сидит за столом (не sit out).
    pub fn is_seated(&self) -> bool {
        !self.sit_out
    }

    /// Может ли игрок получить ход: не sit out, не сфолдил и есть фишки.
    pub fn can_act(&self) -> bool {
        !self.sit_out && !self.folded && !self.chips.is_zero()
    }

    /// Участвует ли игрок в борьбе за банк.
    ///
    /// `committed` – сколько игрок уже внёс в этой раздаче: all-in игрок
    /// с нулевым стеком всё ещё претендует на банк.
    pub fn is_live(&self, committed: Chips) -> bool {
        !self.sit_out && !self.folded && (!self.chips.is_zero() || !committed.is_zero())
    }

    /// Взять из стека не более amount. Возвращает реально списанную сумму.
    pub fn take(&mut self, amount: Chips) -> Chips {
        let real = if self.chips < amount { self.chips } else { amount };
        self.chips -= real;
        real
    }
}
