//! Движок трекера: позиции, ставки, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `ChipTable`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу (позиции + блайнды)
//!   - `apply_action` – применить действие игрока (с авто-завершением)
//!   - `finish_hand` – раздать банк объявленным победителям

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod side_pots;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_loop::{live_players, next_turn, ChipTable, FinishReason, HandEngine, HandResult, HandStatus};
pub use hand_history::{ActionEntry, ActionLog};
pub use positions::{compute_seating, next_dealer, Position, Seating};
pub use pot::{distribute_pots, PotAward};
pub use side_pots::{compute_side_pots, Contributions, SidePot};
