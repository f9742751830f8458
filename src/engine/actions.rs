use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// Тип действия игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Raise: поднять текущую ставку до указанной суммы (вклад за раздачу).
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl PlayerActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "FOLD",
            PlayerActionKind::Check => "CHECK",
            PlayerActionKind::Call => "CALL",
            PlayerActionKind::Raise(_) => "RAISE",
            PlayerActionKind::AllIn => "ALL-IN",
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Raise(to) => write!(f, "RAISE to {to}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self { player_id, kind }
    }
}
