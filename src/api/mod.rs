//! Внешний API трекера для драйверов (CLI).
//!
//! Здесь описываются:
//! - команды (commands.rs) – текстовый язык команд и его разбор;
//! - DTO (dto.rs) – снимок стола для отображения.

pub mod commands;
pub mod dto;

pub use commands::*;
pub use dto::*;
