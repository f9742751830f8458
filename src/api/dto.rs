use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Currency, PlayerId};
use crate::engine::{ActionEntry, ChipTable, Position, SidePot};

/// Игрок глазами драйвера (CLI / JSON-вывод).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerViewDto {
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub position: Option<Position>,
    pub contributed: Chips,
    pub sit_out: bool,
    pub folded: bool,
    pub is_current_actor: bool,
}

/// Снимок стола для отображения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub currency: Currency,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub dealer: Option<PlayerId>,
    pub hand_in_progress: bool,
    pub hand_number: Option<u64>,
    pub current_bet: Chips,
    pub current_actor: Option<PlayerId>,
    pub total_pot: Chips,
    pub pots: Vec<SidePot>,
    pub players: Vec<PlayerViewDto>,
    pub actions: Vec<ActionEntry>,
}

/// Сформировать DTO стола.
pub fn build_table_view(table: &ChipTable) -> TableViewDto {
    let current_actor = table.current_actor().cloned();

    let players = table
        .players
        .iter()
        .map(|p| PlayerViewDto {
            id: p.id.clone(),
            name: p.name.clone(),
            chips: p.chips,
            position: table.position_of(&p.id),
            contributed: table.contributed(&p.id),
            sit_out: p.sit_out,
            folded: p.folded,
            is_current_actor: current_actor.as_ref() == Some(&p.id),
        })
        .collect();

    TableViewDto {
        currency: table.currency(),
        small_blind: table.stakes().small_blind,
        big_blind: table.stakes().big_blind,
        dealer: table.dealer.clone(),
        hand_in_progress: table.is_hand_in_progress(),
        hand_number: table.hand.as_ref().map(|h| h.hand_number),
        current_bet: table.current_bet(),
        current_actor,
        total_pot: table.total_pot(),
        pots: table.pots(),
        players,
        actions: table
            .hand
            .as_ref()
            .map(|h| h.log.entries.clone())
            .unwrap_or_default(),
    }
}

impl TableViewDto {
    /// Имя игрока по id (для подписи сайд-потов).
    pub fn name_of(&self, id: &PlayerId) -> &str {
        self.players
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    }

    /// Текстовое представление стола.
    pub fn render(&self) -> Vec<String> {
        let c = self.currency;
        let mut lines = Vec::new();

        lines.push(format!(
            "Блайнды {}/{} | валюта {} | банк {}",
            c.format(self.small_blind),
            c.format(self.big_blind),
            c,
            c.format(self.total_pot)
        ));

        if self.pots.len() > 1 {
            for (i, pot) in self.pots.iter().enumerate() {
                let names: Vec<&str> = pot.eligible.iter().map(|id| self.name_of(id)).collect();
                lines.push(format!(
                    "  Сайд-пот {}: {} ({})",
                    i + 1,
                    c.format(pot.amount),
                    names.join(", ")
                ));
            }
        }

        for p in &self.players {
            let marker = if p.is_current_actor { "▶" } else { " " };
            let badge = p.position.map(|pos| pos.label()).unwrap_or("");
            let mut flags = Vec::new();
            if p.sit_out {
                flags.push("sit out");
            }
            if p.folded {
                flags.push("fold");
            }
            lines.push(format!(
                "{} [{}] {:<12} {:>3} стек {:>12} внёс {:>10} {}",
                marker,
                p.id,
                p.name,
                badge,
                c.format(p.chips),
                c.format(p.contributed),
                flags.join(", ")
            ));
        }

        if !self.actions.is_empty() {
            lines.push("Действия:".to_string());
            for a in &self.actions {
                let amount = a.amount.map(|x| format!(" {}", c.format(x))).unwrap_or_default();
                lines.push(format!("  {} → {}{}", a.player_name, a.kind.name(), amount));
            }
        }

        lines
    }
}

/// Старшинство комбинаций (от сильной к слабой) – подсказка для игроков.
pub const HAND_RANKINGS: [&str; 10] = [
    "Royal Flush",
    "Straight Flush",
    "Four of a Kind",
    "Full House",
    "Flush",
    "Straight",
    "Three of a Kind",
    "Two Pair",
    "One Pair",
    "High Card",
];
