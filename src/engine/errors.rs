use crate::domain::{Chips, PlayerId};

use thiserror::Error;

/// Ошибки движка трекера.
///
/// Любая ошибка означает, что ввод отклонён и состояние стола не изменилось.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игрок {0} не найден за столом")]
    PlayerNotFound(PlayerId),

    #[error("Игрок с id={0} уже есть за столом")]
    DuplicatePlayer(PlayerId),

    #[error("Не указано имя игрока")]
    MissingName,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Дилер не выбран")]
    NoDealer,

    #[error("Блайнды не заданы")]
    BlindsNotSet,

    #[error("Некорректные блайнды: SB {small_blind} больше BB {big_blind} или BB равен нулю")]
    InvalidStakes { small_blind: Chips, big_blind: Chips },

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Сейчас не ход игрока {0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Рейз до {to} должен быть больше текущей ставки {current_bet}")]
    RaiseTooSmall { to: Chips, current_bet: Chips },

    #[error("Недостаточно фишек: нужно {needed}, в стеке {stack}")]
    NotEnoughChips { needed: Chips, stack: Chips },

    #[error("Минимальная докупка – BB ({min})")]
    TopUpBelowMinimum { min: Chips },

    #[error("Выберите хотя бы одного победителя")]
    NoWinnerSelected,
}
