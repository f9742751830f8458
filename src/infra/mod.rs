//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - локальное key-value хранилище списка игроков;
//! - `Tracker` – стол, который сам сохраняет игроков после каждого изменения.

pub mod ids;
pub mod persistence;
pub mod tracker;

pub use ids::*;
pub use persistence::*;
pub use tracker::*;
