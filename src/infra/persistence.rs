use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

use crate::domain::Player;

/// Фиксированный ключ, под которым лежит список игроков.
pub const PLAYERS_KEY: &str = "poker-players";

/// Ошибки хранилища.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Ошибка ввода-вывода ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Битый JSON в хранилище: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректный ключ хранилища: {0:?}")]
    InvalidKey(String),
}

/// Абстракция локального key-value хранилища (строка → строка).
///
/// Реализации:
/// - `InMemoryStore` – для тестов;
/// - `FileStore` – каталог с файлами `<key>.json`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Простая in-memory реализация для тестов.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Хранилище на диске: каждый ключ – отдельный файл в каталоге.
///
/// Запись идёт через временный файл + rename, чтобы не оставить
/// наполовину записанный JSON.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Создать (при необходимости) каталог хранилища.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("записано {} байт в {}", value.len(), path.display());
        Ok(())
    }
}

/// Прочитать список игроков. Нет записи – пустой список.
pub fn load_players<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Player>, StorageError> {
    match store.get(PLAYERS_KEY)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

/// Перезаписать список игроков целиком.
pub fn save_players<S: KeyValueStore + ?Sized>(store: &mut S, players: &[Player]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(players)?;
    store.set(PLAYERS_KEY, &raw)
}
