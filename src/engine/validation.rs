use crate::domain::{Chips, Player, TableStakes};
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
pub fn validate_action(
    player: &Player,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<(), EngineError> {
    if player.folded || player.sit_out {
        return Err(EngineError::IllegalAction);
    }

    let stack = player.chips;
    let contributed = betting.contributed(&player.id);
    let to_call = betting.to_call(&player.id);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if contributed >= betting.current_bet {
                Ok(())
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        // Call при нехватке стека – это all-in call, списываем сколько есть.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else if stack.is_zero() {
                Err(EngineError::IllegalAction)
            } else {
                Ok(())
            }
        }

        PlayerActionKind::Raise(to) => {
            if *to <= betting.current_bet {
                return Err(EngineError::RaiseTooSmall {
                    to: *to,
                    current_bet: betting.current_bet,
                });
            }

            let needed = *to - contributed;
            if stack < needed {
                return Err(EngineError::NotEnoughChips { needed, stack });
            }

            Ok(())
        }

        PlayerActionKind::AllIn => {
            if stack.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            Ok(())
        }
    }
}

/// Проверка блайндов перед сохранением в настройки.
pub fn validate_stakes(stakes: &TableStakes) -> Result<(), EngineError> {
    if stakes.big_blind.is_zero() || stakes.small_blind > stakes.big_blind {
        return Err(EngineError::InvalidStakes {
            small_blind: stakes.small_blind,
            big_blind: stakes.big_blind,
        });
    }
    Ok(())
}

/// Докупка должна быть не меньше BB.
pub fn validate_top_up(amount: Chips, stakes: &TableStakes) -> Result<(), EngineError> {
    let min = stakes.min_top_up();
    if amount.is_zero() || amount < min {
        return Err(EngineError::TopUpBelowMinimum { min });
    }
    Ok(())
}
