//! Доменная модель трекера фишек: фишки, игроки, стейки, валюта.

pub mod chips;
pub mod currency;
pub mod player;
pub mod table;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Идентификатор игрока – непрозрачная строка (в хранилище лежит как есть).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Chips и т.п.
pub use chips::*;
pub use currency::*;
pub use player::*;
pub use table::*;
