use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Chips, Currency, TableSettings, TableStakes};

/// Переменная окружения с путём к TOML-конфигу.
pub const ENV_CONFIG: &str = "CHIP_TRACKER_CONFIG";
/// Переопределение каталога хранилища.
pub const ENV_STORE: &str = "CHIP_TRACKER_STORE";
/// Переопределение валюты.
pub const ENV_CURRENCY: &str = "CHIP_TRACKER_CURRENCY";

/// Настройки запуска трекера.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Каталог локального хранилища.
    pub store_dir: PathBuf,
    pub small_blind: Chips,
    /// Нулевой BB – блайнды не заданы, их нужно выставить командой.
    pub big_blind: Chips,
    pub currency: Currency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".chip-tracker"),
            small_blind: Chips::ZERO,
            big_blind: Chips::ZERO,
            currency: Currency::Inr,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ошибка разбора TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Некорректная конфигурация: {0}")]
    Invalid(String),
}

/// То, что может лежать в TOML-файле. Все поля опциональны.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    store_dir: Option<PathBuf>,
    #[serde(default)]
    small_blind: Option<f64>,
    #[serde(default)]
    big_blind: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
}

impl Config {
    /// Настройки стола, которые берутся из конфига.
    pub fn table_settings(&self) -> TableSettings {
        TableSettings {
            stakes: TableStakes::new(self.small_blind, self.big_blind),
            currency: self.currency,
        }
    }

    /// Разобрать TOML поверх значений по умолчанию.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut cfg = Config::default();
        cfg.apply_file(toml::from_str(raw)?)?;
        validate(&cfg)?;
        Ok(cfg)
    }

    fn apply_file(&mut self, f: FileConfig) -> Result<(), ConfigError> {
        if let Some(v) = f.store_dir {
            self.store_dir = v;
        }
        if let Some(v) = f.small_blind {
            self.small_blind = chips_from("small_blind", v)?;
        }
        if let Some(v) = f.big_blind {
            self.big_blind = chips_from("big_blind", v)?;
        }
        if let Some(v) = f.currency {
            self.currency = v.parse().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }
}

/// Порядок: значения по умолчанию → TOML (`path` или `CHIP_TRACKER_CONFIG`) → переменные окружения.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));
    if let Some(path) = path {
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        cfg.apply_file(toml::from_str(&raw)?)?;
    }

    if let Ok(dir) = std::env::var(ENV_STORE) {
        if !dir.is_empty() {
            cfg.store_dir = PathBuf::from(dir);
        }
    }
    if let Ok(cur) = std::env::var(ENV_CURRENCY) {
        if !cur.is_empty() {
            cfg.currency = cur.parse().map_err(ConfigError::Invalid)?;
        }
    }

    validate(&cfg)?;
    Ok(cfg)
}

fn chips_from(field: &str, value: f64) -> Result<Chips, ConfigError> {
    Chips::from_f64(value).ok_or_else(|| ConfigError::Invalid(format!("{field} = {value}")))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !cfg.big_blind.is_zero() && cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(format!(
            "small_blind ({}) больше big_blind ({})",
            cfg.small_blind, cfg.big_blind
        )));
    }
    if cfg.big_blind.is_zero() && !cfg.small_blind.is_zero() {
        return Err(ConfigError::Invalid("small_blind задан без big_blind".into()));
    }
    Ok(())
}
