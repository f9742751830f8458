// src/bin/chip_tracker_cli.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error};

use chip_tracker::api::{build_table_view, Command, HAND_RANKINGS, HELP};
use chip_tracker::config;
use chip_tracker::domain::{PlayerId, TableStakes};
use chip_tracker::engine::{FinishReason, HandResult, HandStatus};
use chip_tracker::infra::{FileStore, Tracker, TrackerError};

/// Трекер фишек для живой игры: один стол, одно устройство.
#[derive(Parser, Debug)]
#[command(name = "chip_tracker_cli", version)]
struct Args {
    /// Путь к TOML-конфигу (иначе CHIP_TRACKER_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Каталог хранилища (перекрывает конфиг и окружение).
    #[arg(long)]
    store: Option<PathBuf>,
}

enum Flow {
    Continue,
    Quit,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{err}");
            eprintln!("Ошибка конфигурации: {err}");
            std::process::exit(2);
        }
    };
    if let Some(store) = args.store {
        cfg.store_dir = store;
    }

    let tracker = FileStore::open(&cfg.store_dir)
        .map_err(TrackerError::from)
        .and_then(|store| Tracker::open(store, cfg.table_settings()));
    let mut tracker = match tracker {
        Ok(t) => t,
        Err(err) => {
            eprintln!("Не удалось открыть хранилище {}: {err}", cfg.store_dir.display());
            std::process::exit(1);
        }
    };

    println!("=== POKER TABLE ===");
    println!("Хранилище: {} | help – список команд\n", cfg.store_dir.display());
    print_table(&tracker);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("Ошибка чтения ввода: {err}");
                break;
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                println!("⚠ {err}");
                continue;
            }
        };
        debug!("команда: {:?}", cmd);

        match run(&mut tracker, cmd) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            // Любая ошибка = ввод отклонён, состояние не изменилось.
            Err(err) => println!("⚠ {err}"),
        }
    }
}

fn run(tracker: &mut Tracker<FileStore>, cmd: Command) -> Result<Flow, TrackerError> {
    match cmd {
        Command::AddPlayer { name, chips } => {
            let p = tracker.add_player(&name, chips)?;
            println!("Игрок {} [{}] сел за стол", p.name, p.id);
        }
        Command::ToggleSitOut { player } => {
            let id = tracker.resolve(&player)?;
            let sit_out = tracker.toggle_sit_out(&id)?;
            println!("{}: {}", player, if sit_out { "sit out" } else { "в игре" });
        }
        Command::SetDealer { player } => {
            let id = tracker.resolve(&player)?;
            tracker.set_dealer(&id)?;
            print_table(tracker);
        }
        Command::SetBlinds {
            small_blind,
            big_blind,
        } => {
            tracker.set_stakes(TableStakes::new(small_blind, big_blind))?;
            println!("Блайнды: {small_blind}/{big_blind}");
        }
        Command::SetCurrency(currency) => {
            tracker.set_currency(currency);
            println!("Валюта: {currency}");
        }
        Command::StartHand => {
            tracker.start_hand()?;
            print_table(tracker);
        }
        Command::Action(kind) => {
            if let HandStatus::Finished(result) = tracker.act(kind)? {
                print_result(tracker, &result);
            }
            print_table(tracker);
        }
        Command::FinishHand { winners } => {
            let ids = winners
                .iter()
                .map(|w| tracker.resolve(w))
                .collect::<Result<Vec<PlayerId>, _>>()?;
            let result = tracker.finish_hand(&ids)?;
            print_result(tracker, &result);
            print_table(tracker);
        }
        Command::TopUp { player, amount } => {
            let id = tracker.resolve(&player)?;
            let stack = tracker.top_up(&id, amount)?;
            let currency = tracker.table().currency();
            println!("{}: стек {}", player, currency.format(stack));
        }
        Command::Show => print_table(tracker),
        Command::Ranks => {
            println!("Старшинство комбинаций:");
            for (i, rank) in HAND_RANKINGS.iter().enumerate() {
                println!("  {}. {}", i + 1, rank);
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn print_table(tracker: &Tracker<FileStore>) {
    let view = build_table_view(tracker.table());
    for line in view.render() {
        println!("{line}");
    }
    println!();
}

fn print_result(tracker: &Tracker<FileStore>, result: &HandResult) {
    let table = tracker.table();
    let currency = table.currency();
    if result.reason == FinishReason::LastPlayerStanding {
        println!("Все сфолдили.");
    }
    for award in &result.awards {
        let name = table
            .player(&award.player_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!("{} выигрывает {}", name, currency.format(award.amount));
    }
}
