// Game: JS-facing wrapper around a PuzzleSession
//
// The page renders `snapshot()` after every call and never keeps game logic
// of its own. Structured results cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::config::PuzzleConfig;
use crate::scores::format_best_time;
use crate::session::PuzzleSession;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::types::{PuzzleError, Result, Seed};
use crate::utils::{now, today};

#[wasm_bindgen]
pub struct Game {
    session: PuzzleSession,
}

#[wasm_bindgen]
impl Game {
    /// Start a game from `location.search`
    ///
    /// JavaScript usage:
    /// ```js
    /// const game = new Game(window.location.search);
    /// const query = game.takeUrlUpdate();
    /// if (query) history.replaceState(null, "", query);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(query: &str, config_json: Option<String>) -> Result<Game> {
        let config = match config_json {
            Some(json) => PuzzleConfig::from_json(&json)?,
            None => PuzzleConfig::default(),
        };
        let session = PuzzleSession::open(config, open_store(), query, today())?;
        Ok(Game { session })
    }

    /// Current board as JSON
    #[wasm_bindgen(js_name = snapshot)]
    pub fn snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.session.snapshot())?)
    }

    /// Current board as a plain JS object
    #[wasm_bindgen(js_name = snapshotValue)]
    pub fn snapshot_value(&self) -> Result<JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot())
            .map_err(|e| PuzzleError::SerializationError(e.to_string()))
    }

    /// Click on tile `index`; returns the move outcome as JSON
    #[wasm_bindgen(js_name = click)]
    pub fn click(&mut self, index: usize) -> Result<String> {
        let outcome = self.session.click(index, now(), today())?;
        Ok(serde_json::to_string(&outcome)?)
    }

    /// Arrow-key press; returns the move outcome as JSON
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> Result<String> {
        let outcome = self.session.key(key, now(), today())?;
        Ok(serde_json::to_string(&outcome)?)
    }

    #[wasm_bindgen(js_name = shuffle)]
    pub fn shuffle(&mut self) -> Result<()> {
        self.session.shuffle()
    }

    #[wasm_bindgen(js_name = shuffleWithSeed)]
    pub fn shuffle_with_seed(&mut self, seed: f64) -> Result<()> {
        self.session.shuffle_with_seed(seed as Seed)
    }

    /// Grow the board; throws the size-limit notice at the maximum size
    #[wasm_bindgen(js_name = grow)]
    pub fn grow(&mut self) -> Result<()> {
        self.session.grow()
    }

    #[wasm_bindgen(js_name = seed)]
    pub fn seed(&self) -> f64 {
        self.session.seed() as f64
    }

    #[wasm_bindgen(js_name = size)]
    pub fn size(&self) -> usize {
        self.session.size()
    }

    #[wasm_bindgen(js_name = moves)]
    pub fn moves(&self) -> u32 {
        self.session.moves()
    }

    /// `MM:SS`, polled by the page's one-second interval
    #[wasm_bindgen(js_name = timerText)]
    pub fn timer_text(&self) -> String {
        self.session.timer_text(now())
    }

    #[wasm_bindgen(js_name = isTimerRunning)]
    pub fn is_timer_running(&self) -> bool {
        self.session.is_timer_running()
    }

    #[wasm_bindgen(js_name = bestMoves)]
    pub fn best_moves(&self) -> String {
        match self.session.best().best_moves {
            Some(moves) => moves.to_string(),
            None => "N/A".to_string(),
        }
    }

    #[wasm_bindgen(js_name = bestTime)]
    pub fn best_time(&self) -> String {
        format_best_time(self.session.best().best_time_seconds)
    }

    #[wasm_bindgen(js_name = streak)]
    pub fn streak(&self) -> u32 {
        self.session.streak().current_streak
    }

    #[wasm_bindgen(js_name = urlQuery)]
    pub fn url_query(&self) -> String {
        self.session.url_query()
    }

    /// Query string to `replaceState` with, if it changed since the last call
    #[wasm_bindgen(js_name = takeUrlUpdate)]
    pub fn take_url_update(&mut self) -> Option<String> {
        self.session.take_url_update()
    }

    #[wasm_bindgen(js_name = dailyChallengeTarget)]
    pub fn daily_challenge_target(&self) -> String {
        self.session.daily_challenge_target()
    }
}

#[cfg(target_arch = "wasm32")]
fn open_store() -> Box<dyn KeyValueStore> {
    match crate::storage::LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{}; progress will not be saved", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::new())
}
