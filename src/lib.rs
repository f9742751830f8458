//! Трекер фишек для живой игры в покер на одном устройстве.
//!
//! Стол хранит стеки игроков, блайнды, действия, сайд-поты и победителей
//! шоудауна. Сервера нет: список игроков сохраняется в локальное
//! key-value хранилище после каждого изменения.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;

pub use domain::{Chips, Currency, Player, PlayerId, TableSettings, TableStakes};
pub use engine::{ChipTable, EngineError, HandResult, HandStatus, PlayerAction, PlayerActionKind};
pub use infra::{FileStore, InMemoryStore, KeyValueStore, Tracker, TrackerError};
