#![cfg(target_arch = "wasm32")]

// Browser tests: run with `wasm-pack test --headless --firefox`

use slidetile_core::{
    load_json, DailyChallenge, Game, KeyValueStore, LocalStorage, StorageKeys, StreakRecord,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear_storage() {
    let mut storage = LocalStorage::open().unwrap();
    let keys = StorageKeys::default();
    for key in [&keys.results, &keys.best_times, &keys.daily_seed, &keys.daily_streak] {
        storage.remove_item(key).unwrap();
    }
}

#[wasm_bindgen_test]
fn local_storage_roundtrip() {
    let mut storage = LocalStorage::open().unwrap();
    storage.set_item("slidetile-test", "42").unwrap();
    assert_eq!(storage.get_item("slidetile-test").unwrap().as_deref(), Some("42"));
    storage.remove_item("slidetile-test").unwrap();
    assert_eq!(storage.get_item("slidetile-test").unwrap(), None);
}

#[wasm_bindgen_test]
fn new_game_writes_daily_records() {
    clear_storage();
    let _game = Game::new("?seed=5&size=3", None).unwrap();

    let storage = LocalStorage::open().unwrap();
    let keys = StorageKeys::default();
    let daily: DailyChallenge = load_json(&storage, &keys.daily_seed).unwrap();
    assert!(!daily.is_solved);
    assert_eq!(daily.date, daily.seed.to_string());

    let streak: StreakRecord = load_json(&storage, &keys.daily_streak).unwrap();
    assert_eq!(streak.current_streak, 0);
}

#[wasm_bindgen_test]
fn corrupt_storage_is_replaced() {
    clear_storage();
    let mut storage = LocalStorage::open().unwrap();
    storage.set_item("dailyStreak", "{broken").unwrap();

    let game = Game::new("?seed=5&size=3", None).unwrap();
    assert_eq!(game.streak(), 0);
    let streak: Option<StreakRecord> = load_json(&storage, "dailyStreak");
    assert!(streak.is_some());
}

#[wasm_bindgen_test]
fn snapshot_value_is_plain_object() {
    clear_storage();
    let game = Game::new("?seed=11&size=4", None).unwrap();
    let value = game.snapshot_value().unwrap();
    let tiles = js_sys::Reflect::get(&value, &JsValue::from_str("tiles")).unwrap();
    assert_eq!(js_sys::Array::from(&tiles).length(), 16);
}

#[wasm_bindgen_test]
fn missing_seed_requests_url_rewrite() {
    clear_storage();
    let mut game = Game::new("", None).unwrap();
    let query = game.take_url_update().unwrap();
    assert_eq!(query, format!("?seed={}&size=3", game.seed()));
}

#[wasm_bindgen_test]
fn log_level_can_be_changed() {
    slidetile_core::init();
    slidetile_core::set_log_level("debug");
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    slidetile_core::set_log_level("nonsense");
    assert_eq!(log::max_level(), log::LevelFilter::Info);
}
