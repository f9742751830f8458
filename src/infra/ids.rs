use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::PlayerId;

/// Генерация id игроков на основе монотонного счётчика.
///
/// По умолчанию счётчик стартует с текущего времени в миллисекундах,
/// чтобы новые id не совпадали с уже сохранёнными в хранилище.
#[derive(Debug)]
pub struct IdGenerator {
    player_counter: AtomicU64,
}

impl IdGenerator {
    /// Генератор, начинающий с текущего unix-времени (мс).
    pub fn new() -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);
        Self::starting_at(now_ms)
    }

    /// Детерминированный старт (тесты).
    pub fn starting_at(first: u64) -> Self {
        Self {
            player_counter: AtomicU64::new(first),
        }
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        PlayerId(self.player_counter.fetch_add(1, Ordering::Relaxed).to_string())
    }

    /// Пропустить уже занятые числовые id (после загрузки из хранилища).
    pub fn skip_past<'a>(&self, existing: impl IntoIterator<Item = &'a PlayerId>) {
        let max = existing
            .into_iter()
            .filter_map(|id| id.as_str().parse::<u64>().ok())
            .max();
        if let Some(max) = max {
            self.player_counter.fetch_max(max + 1, Ordering::Relaxed);
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
