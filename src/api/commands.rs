use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, ChipsParseError, Currency};
use crate::engine::PlayerActionKind;

/// Ошибка разбора текстовой команды.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Пустая команда")]
    Empty,

    #[error("Неизвестная команда: {0} (help – список команд)")]
    Unknown(String),

    #[error("Команде {command} не хватает аргумента <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Некорректный аргумент <{argument}>: {reason}")]
    InvalidArgument { argument: &'static str, reason: String },
}

/// Команда драйвера.
///
/// `player` – id или имя игрока (ищется без учёта регистра).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Посадить игрока за стол.
    AddPlayer { name: String, chips: Chips },

    /// Переключить sit out.
    ToggleSitOut { player: String },

    /// Выбрать дилера.
    SetDealer { player: String },

    /// Задать блайнды.
    SetBlinds { small_blind: Chips, big_blind: Chips },

    /// Валюта отображения.
    SetCurrency(Currency),

    /// Запустить новую раздачу.
    StartHand,

    /// Действие текущего ходящего игрока.
    Action(PlayerActionKind),

    /// Завершить раздачу, объявив победителей.
    FinishHand { winners: Vec<String> },

    /// Докупка.
    TopUp { player: String, amount: Chips },

    Show,
    Ranks,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let cmd = match head.as_str() {
            "add" => {
                // Имя может состоять из нескольких слов: последнее слово – стек.
                let (chips, name) = args
                    .split_last()
                    .ok_or(CommandError::MissingArgument {
                        command: "add",
                        argument: "name",
                    })?;
                if name.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "add",
                        argument: "chips",
                    });
                }
                Command::AddPlayer {
                    name: name.join(" "),
                    chips: parse_chips("chips", chips)?,
                }
            }
            "sitout" => Command::ToggleSitOut {
                player: rest("sitout", "player", &args)?,
            },
            "dealer" => Command::SetDealer {
                player: rest("dealer", "player", &args)?,
            },
            "blinds" => Command::SetBlinds {
                small_blind: parse_chips("sb", arg("blinds", "sb", &args, 0)?)?,
                big_blind: parse_chips("bb", arg("blinds", "bb", &args, 1)?)?,
            },
            "currency" => {
                let raw = arg("currency", "currency", &args, 0)?;
                Command::SetCurrency(raw.parse::<Currency>().map_err(|reason| CommandError::InvalidArgument {
                    argument: "currency",
                    reason,
                })?)
            }
            "start" => Command::StartHand,
            "check" => Command::Action(PlayerActionKind::Check),
            "call" => Command::Action(PlayerActionKind::Call),
            "fold" => Command::Action(PlayerActionKind::Fold),
            "allin" | "all-in" => Command::Action(PlayerActionKind::AllIn),
            "raise" => Command::Action(PlayerActionKind::Raise(parse_chips(
                "to",
                arg("raise", "to", &args, 0)?,
            )?)),
            "finish" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "finish",
                        argument: "player",
                    });
                }
                // Имена из нескольких слов разделяются запятой: `finish Mary Jane, Bob`.
                let joined = args.join(" ");
                let winners: Vec<String> = if joined.contains(',') {
                    joined
                        .split(',')
                        .map(str::trim)
                        .filter(|w| !w.is_empty())
                        .map(str::to_string)
                        .collect()
                } else {
                    args.iter().map(|s| s.to_string()).collect()
                };
                if winners.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "finish",
                        argument: "player",
                    });
                }
                Command::FinishHand { winners }
            }
            "topup" => {
                let (amount, player) = args.split_last().ok_or(CommandError::MissingArgument {
                    command: "topup",
                    argument: "player",
                })?;
                if player.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "topup",
                        argument: "amount",
                    });
                }
                Command::TopUp {
                    player: player.join(" "),
                    amount: parse_chips("amount", amount)?,
                }
            }
            "show" => Command::Show,
            "ranks" => Command::Ranks,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(cmd)
    }
}

/// Краткая справка по командам.
pub const HELP: &str = "\
add <name> <chips>        – посадить игрока
sitout <player>           – переключить sit out
dealer <player>           – выбрать дилера
blinds <sb> <bb>          – задать блайнды
currency <inr|usd|aed>    – валюта отображения
start                     – начать раздачу
check | call | fold       – действие текущего игрока
raise <to>                – рейз до суммы
allin                     – all-in
finish <player>...        – завершить раздачу, объявив победителей
                            (через запятую, если в имени пробелы)
topup <player> <amount>   – докупка (не меньше BB)
show                      – состояние стола
ranks                     – старшинство комбинаций
quit                      – выход";

fn arg<'a>(
    command: &'static str,
    argument: &'static str,
    args: &[&'a str],
    idx: usize,
) -> Result<&'a str, CommandError> {
    args.get(idx)
        .copied()
        .ok_or(CommandError::MissingArgument { command, argument })
}

fn rest(command: &'static str, argument: &'static str, args: &[&str]) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    Ok(args.join(" "))
}

fn parse_chips(argument: &'static str, raw: &str) -> Result<Chips, CommandError> {
    raw.parse::<Chips>().map_err(|e: ChipsParseError| CommandError::InvalidArgument {
        argument,
        reason: e.to_string(),
    })
}
