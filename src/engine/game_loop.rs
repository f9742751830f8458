use std::collections::HashSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Currency, Player, PlayerId, TableSettings, TableStakes};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::ActionLog;
use crate::engine::positions::{compute_seating, next_dealer, ordered_from, seat_index, Position, Seating};
use crate::engine::pot::{distribute_pots, PotAward};
use crate::engine::side_pots::SidePot;
use crate::engine::validation::{validate_action, validate_stakes, validate_top_up};

/// Чем закончилась раздача.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinishReason {
    /// Все, кроме одного, сфолдили – банк уходит ему автоматически.
    LastPlayerStanding,
    /// Победители объявлены вручную.
    Showdown,
}

/// Итог раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub reason: FinishReason,
    pub total_pot: Chips,
    pub awards: Vec<PotAward>,
}

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandResult),
}

/// Внутреннее состояние раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEngine {
    /// Порядковый номер раздачи за сессию (с 1).
    pub hand_number: u64,
    pub betting: BettingState,
    /// Чей сейчас ход. None – ставки невозможны, ждём шоудауна.
    pub current_actor: Option<PlayerId>,
    pub log: ActionLog,
}

/// Стол целиком: ростер, настройки, дилер, позиции и (опционально) активная раздача.
///
/// Каждая операция либо применяется целиком, либо возвращает ошибку,
/// не трогая состояние.
#[derive(Clone, Debug, Default)]
pub struct ChipTable {
    /// Игроки в порядке рассадки.
    pub players: Vec<Player>,
    pub settings: TableSettings,
    pub dealer: Option<PlayerId>,
    pub seating: Seating,
    pub hand: Option<HandEngine>,
    pub hands_played: u64,
}

/// Следующий ход после `from` (или начиная с `from`, если `include_from`).
///
/// Ходить может только игрок, который не sit out, не сфолдил и имеет фишки.
/// Если таких меньше двух, ротация останавливается – кроме случая, когда
/// единственный оставшийся ещё должен уравнять ставку.
pub fn next_turn(
    players: &[Player],
    betting: &BettingState,
    from: &PlayerId,
    include_from: bool,
) -> Option<PlayerId> {
    let candidates = players.iter().filter(|p| p.can_act()).count();
    if candidates == 0 {
        return None;
    }

    let start = seat_index(players, from)? + usize::from(!include_from);
    let next = ordered_from(players, start).find(|p| p.can_act() && (include_from || &p.id != from))?;

    if candidates >= 2 {
        return Some(next.id.clone());
    }

    if !betting.to_call(&next.id).is_zero() {
        Some(next.id.clone())
    } else {
        None
    }
}

/// Живые игроки: не сфолдили, не sit out и либо с фишками, либо в all-in с вкладом.
pub fn live_players(players: &[Player], betting: &BettingState) -> Vec<PlayerId> {
    players
        .iter()
        .filter(|p| p.is_live(betting.contributed(&p.id)))
        .map(|p| p.id.clone())
        .collect()
}

impl ChipTable {
    pub fn new(settings: TableSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Стол с уже известным ростером (например, из хранилища).
    ///
    /// Раздачи не сохраняются, поэтому флаги fold сбрасываются.
    pub fn with_players(players: Vec<Player>, settings: TableSettings) -> Self {
        let mut table = Self::new(settings);
        table.players = players;
        for p in table.players.iter_mut() {
            p.folded = false;
        }
        table
    }

    // ---------- чтение ----------

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Найти игрока по id или по имени (без учёта регистра).
    pub fn find_player(&self, query: &str) -> Option<&Player> {
        let query = query.trim();
        self.players
            .iter()
            .find(|p| p.id.as_str() == query)
            .or_else(|| self.players.iter().find(|p| p.name.eq_ignore_ascii_case(query)))
    }

    pub fn stakes(&self) -> TableStakes {
        self.settings.stakes
    }

    pub fn currency(&self) -> Currency {
        self.settings.currency
    }

    pub fn is_hand_in_progress(&self) -> bool {
        self.hand.is_some()
    }

    pub fn current_actor(&self) -> Option<&PlayerId> {
        self.hand.as_ref().and_then(|h| h.current_actor.as_ref())
    }

    pub fn position_of(&self, id: &PlayerId) -> Option<Position> {
        self.seating.position_of(id)
    }

    pub fn contributed(&self, id: &PlayerId) -> Chips {
        self.hand
            .as_ref()
            .map(|h| h.betting.contributed(id))
            .unwrap_or(Chips::ZERO)
    }

    pub fn current_bet(&self) -> Chips {
        self.hand
            .as_ref()
            .map(|h| h.betting.current_bet)
            .unwrap_or(Chips::ZERO)
    }

    pub fn pots(&self) -> Vec<SidePot> {
        self.hand.as_ref().map(|h| h.betting.pots()).unwrap_or_default()
    }

    pub fn total_pot(&self) -> Chips {
        self.hand
            .as_ref()
            .map(|h| h.betting.total_pot())
            .unwrap_or(Chips::ZERO)
    }

    // ---------- ростер и настройки ----------

    pub fn add_player(&mut self, id: PlayerId, name: &str, chips: Chips) -> Result<&Player, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::MissingName);
        }
        self.ensure_no_hand()?;
        if self.player(&id).is_some() {
            return Err(EngineError::DuplicatePlayer(id));
        }

        info!("игрок {} ({}) сел за стол со стеком {}", name, id, chips);
        self.players.push(Player::new(id, name, chips));
        self.refresh_seating();

        Ok(&self.players[self.players.len() - 1])
    }

    /// Переключить sit out. Возвращает новое значение флага.
    pub fn toggle_sit_out(&mut self, id: &PlayerId) -> Result<bool, EngineError> {
        self.ensure_no_hand()?;
        let player = self.player_mut(id)?;
        player.sit_out = !player.sit_out;
        let sit_out = player.sit_out;

        debug!("игрок {} sit_out={}", id, sit_out);
        self.refresh_seating();
        Ok(sit_out)
    }

    pub fn set_dealer(&mut self, id: &PlayerId) -> Result<(), EngineError> {
        self.ensure_no_hand()?;
        if self.player(id).is_none() {
            return Err(EngineError::PlayerNotFound(id.clone()));
        }
        self.dealer = Some(id.clone());
        self.refresh_seating();
        Ok(())
    }

    pub fn set_stakes(&mut self, stakes: TableStakes) -> Result<(), EngineError> {
        self.ensure_no_hand()?;
        validate_stakes(&stakes)?;
        info!("блайнды {}/{}", stakes.small_blind, stakes.big_blind);
        self.settings.stakes = stakes;
        Ok(())
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.settings.currency = currency;
    }

    /// Докупка фишек. Возвращает новый стек.
    pub fn top_up(&mut self, id: &PlayerId, amount: Chips) -> Result<Chips, EngineError> {
        if let Err(err) = validate_top_up(amount, &self.settings.stakes) {
            debug!("докупка {} для {} отклонена: {}", amount, id, err);
            return Err(err);
        }
        let player = self.player_mut(id)?;
        player.chips += amount;
        info!("игрок {} докупил {}, стек {}", id, amount, player.chips);
        Ok(player.chips)
    }

    // ---------- раздача ----------

    /// Старт новой раздачи:
    /// - пересчитывает позиции от текущего дилера;
    /// - постит SB/BB (не больше стека);
    /// - выставляет текущую ставку = BB и первого ходящего.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        self.ensure_no_hand()?;
        let dealer = self.dealer.clone().ok_or(EngineError::NoDealer)?;
        let stakes = self.settings.stakes;
        if !stakes.is_set() {
            return Err(EngineError::BlindsNotSet);
        }
        if self.players.iter().filter(|p| p.can_act()).count() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }

        let seating = compute_seating(&self.players, &dealer);
        // Если выбранный дилер sit out, кнопка у следующего сидящего игрока.
        let (Some(button), Some(sb_id), Some(bb_id), Some(first)) = (
            seating.dealer.clone(),
            seating.small_blind.clone(),
            seating.big_blind.clone(),
            seating.first_to_act.clone(),
        ) else {
            return Err(EngineError::NotEnoughPlayers);
        };

        let mut betting = BettingState::new(stakes.big_blind);
        for (id, blind) in [(&sb_id, stakes.small_blind), (&bb_id, stakes.big_blind)] {
            if let Some(idx) = seat_index(&self.players, id) {
                let paid = self.players[idx].take(blind);
                betting.commit(id, paid);
                debug!("игрок {} поставил блайнд {}", id, paid);
            }
        }

        let current_actor = next_turn(&self.players, &betting, &first, true);
        let hand_number = self.hands_played + 1;

        info!(
            "раздача #{} началась: дилер {}, ставка {}, первый ход {:?}",
            hand_number, button, betting.current_bet, current_actor
        );

        self.dealer = Some(button);
        self.seating = seating;
        self.hand = Some(HandEngine {
            hand_number,
            betting,
            current_actor,
            log: ActionLog::new(),
        });

        Ok(())
    }

    /// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<HandStatus, EngineError> {
        let hand = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;

        if hand.current_actor.as_ref() != Some(&action.player_id) {
            return Err(EngineError::NotPlayersTurn(action.player_id));
        }

        let idx = seat_index(&self.players, &action.player_id)
            .ok_or_else(|| EngineError::PlayerNotFound(action.player_id.clone()))?;

        // Валидация действия по текущему состоянию.
        validate_action(&self.players[idx], &action.kind, &hand.betting)?;

        let player = &mut self.players[idx];
        let amount = match &action.kind {
            PlayerActionKind::Fold => {
                player.folded = true;
                None
            }

            PlayerActionKind::Check => None,

            PlayerActionKind::Call => {
                let due = hand.betting.to_call(&player.id);
                let paid = player.take(due);
                hand.betting.commit(&player.id, paid);
                Some(paid)
            }

            PlayerActionKind::Raise(to) => {
                let needed = *to - hand.betting.contributed(&player.id);
                let paid = player.take(needed);
                hand.betting.commit(&player.id, paid);
                hand.betting.on_raise(*to);
                Some(paid)
            }

            PlayerActionKind::AllIn => {
                let paid = player.take(player.chips);
                hand.betting.commit(&player.id, paid);
                let total = hand.betting.contributed(&player.id);
                if total > hand.betting.current_bet {
                    hand.betting.on_raise(total);
                }
                Some(paid)
            }
        };

        info!(
            "{} → {}{}",
            player.name,
            action.kind,
            amount.map(|a| format!(" ({a})")).unwrap_or_default()
        );
        hand.log.push(player.id.clone(), player.name.clone(), action.kind.clone(), amount);

        if action.kind == PlayerActionKind::Fold {
            if let [winner] = live_players(&self.players, &hand.betting).as_slice() {
                let winner = winner.clone();
                return Ok(HandStatus::Finished(self.award_all_to(&winner)));
            }
        }

        hand.current_actor = next_turn(&self.players, &hand.betting, &action.player_id, false);
        if hand.current_actor.is_none() {
            debug!("ставки закрыты, ждём шоудауна");
        }

        Ok(HandStatus::Ongoing)
    }

    /// Завершить раздачу с объявленными победителями.
    ///
    /// Сфолдившие и sit out игроки среди `winners` игнорируются;
    /// если никого не осталось – `NoWinnerSelected`, раздача продолжается.
    pub fn finish_hand(&mut self, winners: &[PlayerId]) -> Result<HandResult, EngineError> {
        let hand = self.hand.as_ref().ok_or(EngineError::NoActiveHand)?;

        if let Some(unknown) = winners.iter().find(|id| self.player(id).is_none()) {
            return Err(EngineError::PlayerNotFound(unknown.clone()));
        }

        let live: HashSet<PlayerId> = live_players(&self.players, &hand.betting).into_iter().collect();

        let mut declared: Vec<PlayerId> = Vec::new();
        for id in winners {
            if live.contains(id) && !declared.contains(id) {
                declared.push(id.clone());
            }
        }
        if declared.is_empty() {
            debug!("шоудаун без победителей отклонён");
            return Err(EngineError::NoWinnerSelected);
        }

        let pots = hand.betting.pots();
        let total_pot = hand.betting.total_pot();
        let awards = distribute_pots(&pots, &declared, |id| live.contains(id));

        self.pay_out(&awards);
        self.reset_hand();

        Ok(HandResult {
            reason: FinishReason::Showdown,
            total_pot,
            awards,
        })
    }

    // ---------- внутреннее ----------

    /// Весь банк – единственному оставшемуся игроку.
    fn award_all_to(&mut self, winner: &PlayerId) -> HandResult {
        let total_pot = self.total_pot();
        let awards = vec![PotAward {
            player_id: winner.clone(),
            amount: total_pot,
        }];

        info!("все сфолдили, {} забирает {}", winner, total_pot);
        self.pay_out(&awards);
        self.reset_hand();

        HandResult {
            reason: FinishReason::LastPlayerStanding,
            total_pot,
            awards,
        }
    }

    fn pay_out(&mut self, awards: &[PotAward]) {
        for award in awards {
            if let Some(p) = self.players.iter_mut().find(|p| p.id == award.player_id) {
                p.chips += award.amount;
                info!("игрок {} получает {}", p.name, award.amount);
            }
        }
    }

    /// Сброс раздачи: фолды, лог и вклады очищаются, дилер переходит дальше.
    fn reset_hand(&mut self) {
        self.hand = None;
        self.hands_played += 1;
        for p in self.players.iter_mut() {
            p.folded = false;
        }
        if self.dealer.is_some() {
            self.dealer = next_dealer(&self.players, self.dealer.as_ref());
        }
        self.refresh_seating();
    }

    fn refresh_seating(&mut self) {
        self.seating = match &self.dealer {
            Some(dealer) => compute_seating(&self.players, dealer),
            None => Seating::default(),
        };
    }

    fn ensure_no_hand(&self) -> Result<(), EngineError> {
        if self.hand.is_some() {
            return Err(EngineError::HandAlreadyInProgress);
        }
        Ok(())
    }

    fn player_mut(&mut self, id: &PlayerId) -> Result<&mut Player, EngineError> {
        self.players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))
    }
}
