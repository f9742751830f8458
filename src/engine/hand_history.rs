use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::actions::PlayerActionKind;

/// Запись в логе действий раздачи. После добавления не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionEntry {
    pub index: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub kind: PlayerActionKind,
    /// Сколько фишек игрок внёс этим действием (для call/raise/all-in).
    pub amount: Option<Chips>,
}

/// Лог действий текущей раздачи. Очищается вместе с раздачей.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionLog {
    pub entries: Vec<ActionEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        player_id: PlayerId,
        player_name: String,
        kind: PlayerActionKind,
        amount: Option<Chips>,
    ) {
        let index = self.entries.len() as u32;
        self.entries.push(ActionEntry {
            index,
            player_id,
            player_name,
            kind,
            amount,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
