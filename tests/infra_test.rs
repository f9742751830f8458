// tests/infra_test.rs

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chip_tracker::domain::{Chips, Player, PlayerId, TableSettings, TableStakes};
use chip_tracker::engine::{EngineError, HandStatus, PlayerActionKind};
use chip_tracker::infra::{
    load_players, save_players, FileStore, IdGenerator, InMemoryStore, KeyValueStore, StorageError, Tracker,
    TrackerError, PLAYERS_KEY,
};

//
// ---------- helpers ----------
//

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Уникальный каталог под target/ для файлового хранилища.
fn temp_dir() -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut dir = PathBuf::from("target");
    dir.push(format!("chip_store_{}_{}_{}", std::process::id(), ts, unique));
    dir
}

fn settings() -> TableSettings {
    TableSettings {
        stakes: TableStakes::new(Chips::whole(5), Chips::whole(10)),
        ..TableSettings::default()
    }
}

fn open_memory() -> Tracker<InMemoryStore> {
    Tracker::open_with_ids(InMemoryStore::new(), settings(), IdGenerator::starting_at(1)).unwrap()
}

//
// ---------- ids ----------
//

#[test]
fn id_generator_is_monotonic() {
    let ids = IdGenerator::starting_at(10);

    assert_eq!(ids.next_player_id(), PlayerId::from("10"));
    assert_eq!(ids.next_player_id(), PlayerId::from("11"));
}

#[test]
fn id_generator_skips_existing_ids() {
    let ids = IdGenerator::starting_at(1);
    let existing = [PlayerId::from("41"), PlayerId::from("not-a-number"), PlayerId::from("7")];

    ids.skip_past(existing.iter());

    assert_eq!(ids.next_player_id(), PlayerId::from("42"));
}

//
// ---------- stores ----------
//

#[test]
fn in_memory_store_round_trip() {
    let mut store = InMemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
}

#[test]
fn players_are_saved_under_fixed_key() {
    let mut store = InMemoryStore::new();
    let players = vec![
        Player::new(PlayerId::from("1"), "Ann", Chips(100_00)),
        Player::new(PlayerId::from("2"), "Bob", Chips(55_50)),
    ];

    save_players(&mut store, &players).unwrap();

    let raw = store.get(PLAYERS_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));
    assert_eq!(load_players(&store).unwrap(), players);
}

#[test]
fn empty_store_loads_no_players() {
    assert!(load_players(&InMemoryStore::new()).unwrap().is_empty());
}

#[test]
fn corrupted_store_is_reported() {
    let mut store = InMemoryStore::new();
    store.set(PLAYERS_KEY, "{not json").unwrap();

    assert!(matches!(load_players(&store), Err(StorageError::Json(_))));
}

#[test]
fn file_store_persists_between_opens() {
    let dir = temp_dir();

    {
        let mut store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get(PLAYERS_KEY).unwrap(), None);
        store.set(PLAYERS_KEY, "[]").unwrap();
    }

    let store = FileStore::open(&dir).unwrap();
    assert_eq!(store.get(PLAYERS_KEY).unwrap(), Some("[]".to_string()));
    assert!(dir.join("poker-players.json").exists());
    assert!(matches!(store.get("../evil"), Err(StorageError::InvalidKey(_))));

    let _ = fs::remove_dir_all(&dir);
}

//
// ---------- tracker ----------
//

#[test]
fn tracker_persists_after_every_change() {
    let mut tracker = open_memory();

    let ann = tracker.add_player("Ann", Chips::whole(100)).unwrap();
    assert_eq!(ann.id, PlayerId::from("1"));
    assert_eq!(load_players(tracker.store()).unwrap().len(), 1);

    let bob = tracker.add_player("Bob", Chips::whole(100)).unwrap();
    tracker.top_up(&bob.id, Chips::whole(20)).unwrap();

    let saved = load_players(tracker.store()).unwrap();
    assert_eq!(saved[1].chips, Chips::whole(120));
}

#[test]
fn tracker_reloads_players_and_continues_ids() {
    let dir = temp_dir();

    {
        let store = FileStore::open(&dir).unwrap();
        let mut tracker = Tracker::open_with_ids(store, settings(), IdGenerator::starting_at(1)).unwrap();
        tracker.add_player("Ann", Chips::whole(100)).unwrap();
        tracker.add_player("Bob", Chips::whole(80)).unwrap();
    }

    let store = FileStore::open(&dir).unwrap();
    let mut tracker = Tracker::open_with_ids(store, settings(), IdGenerator::starting_at(1)).unwrap();

    let names: Vec<&str> = tracker.table().players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bob"]);

    let carl = tracker.add_player("Carl", Chips::whole(50)).unwrap();
    assert_eq!(carl.id, PlayerId::from("3"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tracker_plays_a_hand_for_the_current_actor() {
    let mut tracker = open_memory();
    let ann = tracker.add_player("Ann", Chips::whole(100)).unwrap();
    tracker.add_player("Bob", Chips::whole(100)).unwrap();
    tracker.set_dealer(&ann.id).unwrap();

    assert!(matches!(
        tracker.act(PlayerActionKind::Check),
        Err(TrackerError::Engine(EngineError::NoActiveHand))
    ));

    tracker.start_hand().unwrap();
    // Хедз-ап: Ann – дилер, ставит SB и ходит первой.
    let status = tracker.act(PlayerActionKind::Fold).unwrap();
    assert!(matches!(status, HandStatus::Finished(_)));

    let saved = load_players(tracker.store()).unwrap();
    assert_eq!(saved[0].chips, Chips::whole(95));
    assert_eq!(saved[1].chips, Chips::whole(105));
}

#[test]
fn tracker_resolves_players_by_name_or_id() {
    let mut tracker = open_memory();
    let ann = tracker.add_player("Ann", Chips::whole(100)).unwrap();

    assert_eq!(tracker.resolve("ann").unwrap(), ann.id);
    assert_eq!(tracker.resolve("1").unwrap(), ann.id);
    assert!(matches!(
        tracker.resolve("zed"),
        Err(TrackerError::Engine(EngineError::PlayerNotFound(_)))
    ));
}

#[test]
fn loaded_folded_flags_are_cleared() {
    let mut store = InMemoryStore::new();
    let mut p = Player::new(PlayerId::from("1"), "Ann", Chips(10_00));
    p.folded = true;
    save_players(&mut store, &[p]).unwrap();

    let tracker = Tracker::open_with_ids(store, settings(), IdGenerator::starting_at(1)).unwrap();

    assert!(!tracker.table().players[0].folded);
}
