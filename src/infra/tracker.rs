// src/infra/tracker.rs

use log::info;
use thiserror::Error;

use crate::domain::{Chips, Currency, Player, PlayerId, TableSettings, TableStakes};
use crate::engine::{ChipTable, EngineError, HandResult, HandStatus, PlayerAction, PlayerActionKind};
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::{load_players, save_players, KeyValueStore, StorageError};

/// Ошибки уровня трекера (движок + хранилище).
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Проброшенная ошибка из движка (EngineError).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Не удалось прочитать/записать список игроков.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Трекер: стол + хранилище.
///
/// - при открытии один раз читает список игроков из хранилища;
/// - после каждой операции, меняющей игроков, перезаписывает список целиком;
/// - даёт методы поверх `ChipTable`, подставляя id и текущего ходящего.
pub struct Tracker<S: KeyValueStore> {
    table: ChipTable,
    store: S,
    ids: IdGenerator,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Открыть трекер: загрузить игроков из хранилища.
    pub fn open(store: S, settings: TableSettings) -> Result<Self, TrackerError> {
        Self::open_with_ids(store, settings, IdGenerator::new())
    }

    /// То же, но с заданным генератором id (тесты).
    pub fn open_with_ids(store: S, settings: TableSettings, ids: IdGenerator) -> Result<Self, TrackerError> {
        let players = load_players(&store)?;
        ids.skip_past(players.iter().map(|p| &p.id));
        info!("загружено игроков: {}", players.len());

        Ok(Self {
            table: ChipTable::with_players(players, settings),
            store,
            ids,
        })
    }

    /// Получить ссылку на стол (read-only).
    pub fn table(&self) -> &ChipTable {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Найти игрока по id или имени и вернуть его id.
    pub fn resolve(&self, query: &str) -> Result<PlayerId, TrackerError> {
        self.table
            .find_player(query)
            .map(|p| p.id.clone())
            .ok_or_else(|| EngineError::PlayerNotFound(PlayerId::new(query)).into())
    }

    pub fn add_player(&mut self, name: &str, chips: Chips) -> Result<Player, TrackerError> {
        let id = self.ids.next_player_id();
        let player = self.table.add_player(id, name, chips)?.clone();
        self.persist()?;
        Ok(player)
    }

    pub fn toggle_sit_out(&mut self, id: &PlayerId) -> Result<bool, TrackerError> {
        let flag = self.table.toggle_sit_out(id)?;
        self.persist()?;
        Ok(flag)
    }

    pub fn set_dealer(&mut self, id: &PlayerId) -> Result<(), TrackerError> {
        Ok(self.table.set_dealer(id)?)
    }

    pub fn set_stakes(&mut self, stakes: TableStakes) -> Result<(), TrackerError> {
        Ok(self.table.set_stakes(stakes)?)
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.table.set_currency(currency);
    }

    pub fn top_up(&mut self, id: &PlayerId, amount: Chips) -> Result<Chips, TrackerError> {
        let stack = self.table.top_up(id, amount)?;
        self.persist()?;
        Ok(stack)
    }

    pub fn start_hand(&mut self) -> Result<(), TrackerError> {
        self.table.start_hand()?;
        self.persist()
    }

    /// Действие за текущего ходящего игрока.
    pub fn act(&mut self, kind: PlayerActionKind) -> Result<HandStatus, TrackerError> {
        let actor = match self.table.current_actor() {
            Some(id) => id.clone(),
            None if self.table.is_hand_in_progress() => return Err(EngineError::IllegalAction.into()),
            None => return Err(EngineError::NoActiveHand.into()),
        };
        self.apply_action(PlayerAction::new(actor, kind))
    }

    pub fn apply_action(&mut self, action: PlayerAction) -> Result<HandStatus, TrackerError> {
        let status = self.table.apply_action(action)?;
        self.persist()?;
        Ok(status)
    }

    pub fn finish_hand(&mut self, winners: &[PlayerId]) -> Result<HandResult, TrackerError> {
        let result = self.table.finish_hand(winners)?;
        self.persist()?;
        Ok(result)
    }

    fn persist(&mut self) -> Result<(), TrackerError> {
        save_players(&mut self.store, &self.table.players)?;
        Ok(())
    }
}
