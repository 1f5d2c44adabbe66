// PuzzleSession: one player's running game
//
// Owns everything the page used to keep in globals: the board, the move
// counter, the stopwatch, and the persisted score and streak state. All
// mutation happens synchronously inside the call that triggered it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PuzzleConfig;
use crate::daily::{DailyChallengeTracker, StreakRecord};
use crate::puzzle::{BoardSnapshot, PuzzleState};
use crate::scores::{ScoreRecord, ScoreStore};
use crate::storage::KeyValueStore;
use crate::timer::Stopwatch;
use crate::types::{Direction, PuzzleError, Result, Seed, Timestamp};
use crate::url::UrlParams;
use crate::utils::random_seed;

/// What a click or key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub moved: bool,
    pub solved: bool,
    pub daily_completed: bool,
    /// Move count of the finished game, present only when `solved`
    pub final_moves: Option<u32>,
    /// Elapsed seconds of the finished game, present only when `solved`
    pub final_seconds: Option<u64>,
}

pub struct PuzzleSession {
    config: PuzzleConfig,
    store: Box<dyn KeyValueStore>,
    puzzle: PuzzleState,
    made_first_move: bool,
    finished: bool,
    timer: Stopwatch,
    scores: ScoreStore,
    daily: DailyChallengeTracker,
    url_dirty: bool,
}

impl PuzzleSession {
    /// Start a session from the page's query string
    ///
    /// Uses the `seed`/`size` parameters when present; without a seed a fresh
    /// random one is drawn and the URL is flagged for rewriting.
    pub fn open(
        config: PuzzleConfig,
        mut store: Box<dyn KeyValueStore>,
        query: &str,
        today: NaiveDate,
    ) -> Result<PuzzleSession> {
        config.validate()?;

        let scores = ScoreStore::load(&*store, &config.storage_keys);
        let daily = DailyChallengeTracker::load(&mut *store, &config.storage_keys, today);

        let params = UrlParams::parse(query);
        let size = match params.size {
            Some(size) if config.accepts_size(size) => size,
            Some(size) => {
                log::warn!(
                    "ignoring size {} from URL, using {}x{}",
                    size,
                    config.default_size,
                    config.default_size
                );
                config.default_size
            }
            None => config.default_size,
        };
        let (seed, url_dirty) = match params.seed {
            Some(seed) => (seed, false),
            None => (random_seed(config.random_seed_bound), true),
        };

        let puzzle = PuzzleState::shuffle(seed, size, config.max_shuffle_attempts)?;
        log::info!("loaded puzzle #{} ({}x{})", seed, size, size);

        Ok(PuzzleSession {
            config,
            store,
            puzzle,
            made_first_move: false,
            finished: false,
            timer: Stopwatch::new(),
            scores,
            daily,
            url_dirty,
        })
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    pub fn seed(&self) -> Seed {
        self.puzzle.seed()
    }

    pub fn size(&self) -> usize {
        self.puzzle.size()
    }

    pub fn moves(&self) -> u32 {
        self.puzzle.moves()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.puzzle.snapshot(self.config.tile_px)
    }

    /// Shuffle a new board of the current size from a random seed
    pub fn shuffle(&mut self) -> Result<()> {
        self.shuffle_with_seed(random_seed(self.config.random_seed_bound))
    }

    /// Replace the board with one shuffled from `seed`
    ///
    /// On failure the current board is left untouched.
    pub fn shuffle_with_seed(&mut self, seed: Seed) -> Result<()> {
        self.replace_board(seed, self.size())
    }

    /// Grow the board by one row and column, keeping the seed
    pub fn grow(&mut self) -> Result<()> {
        let size = self.size();
        if size >= self.config.max_size {
            log::warn!("puzzle size limit {}x{} reached", size, size);
            return Err(PuzzleError::SizeLimitReached { max: self.config.max_size });
        }
        self.replace_board(self.seed(), size + 1)
    }

    fn replace_board(&mut self, seed: Seed, size: usize) -> Result<()> {
        self.puzzle = PuzzleState::shuffle(seed, size, self.config.max_shuffle_attempts)?;
        self.made_first_move = false;
        self.finished = false;
        self.timer.reset();
        self.url_dirty = true;
        Ok(())
    }

    /// Handle a click on tile `index`
    pub fn click(&mut self, index: usize, now: Timestamp, today: NaiveDate) -> Result<MoveOutcome> {
        if self.finished {
            return Ok(MoveOutcome::default());
        }
        let moved = self.puzzle.move_tile(index)?;
        self.after_move(moved, now, today)
    }

    /// Handle an arrow-key press by its `KeyboardEvent.key` name
    pub fn key(&mut self, key: &str, now: Timestamp, today: NaiveDate) -> Result<MoveOutcome> {
        if self.finished {
            return Ok(MoveOutcome::default());
        }
        let Some(direction) = Direction::from_key(key) else {
            return Ok(MoveOutcome::default());
        };
        let moved = self.puzzle.slide(direction);
        self.after_move(moved, now, today)
    }

    fn after_move(&mut self, moved: bool, now: Timestamp, today: NaiveDate) -> Result<MoveOutcome> {
        let mut outcome = MoveOutcome { moved, ..MoveOutcome::default() };
        if !moved {
            return Ok(outcome);
        }

        if !self.made_first_move {
            self.timer.start(now);
            self.made_first_move = true;
        }

        if !self.puzzle.is_solved() {
            return Ok(outcome);
        }

        self.timer.stop(now);
        self.finished = true;

        let size = self.size();
        let moves = self.puzzle.moves();
        let seconds = self.timer.elapsed_seconds(now);
        log::info!("puzzle #{} solved in {} moves, {}s", self.seed(), moves, seconds);

        // A failed write loses persistence only; the solve still counts
        if let Err(e) = self.scores.record_result(&mut *self.store, size, moves, seconds) {
            log::error!("failed to save best results: {}", e);
        }
        self.puzzle.reset_moves();

        outcome.solved = true;
        outcome.final_moves = Some(moves);
        outcome.final_seconds = Some(seconds);

        self.daily.roll_over(&mut *self.store, today);
        if self.daily.is_challenge_completion_for(&self.seed().to_string()) {
            if let Err(e) = self.daily.mark_solved(&mut *self.store, today) {
                log::error!("failed to save daily challenge: {}", e);
            }
            outcome.daily_completed = true;
        }

        Ok(outcome)
    }

    /// `MM:SS` for the running timer
    pub fn timer_text(&self, now: Timestamp) -> String {
        self.timer.display(now)
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn best(&self) -> ScoreRecord {
        self.scores.best(self.size())
    }

    pub fn streak(&self) -> &StreakRecord {
        self.daily.streak()
    }

    pub fn daily(&self) -> &DailyChallengeTracker {
        &self.daily
    }

    /// Navigation target for the daily challenge link
    pub fn daily_challenge_target(&self) -> String {
        self.daily.target(self.config.daily_size)
    }

    /// Canonical query string for the current board
    pub fn url_query(&self) -> String {
        UrlParams::new(self.seed(), self.size()).to_query()
    }

    /// Give back the store, e.g. to reopen a session over the same data
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    /// New query string if the URL has to be rewritten since the last call
    pub fn take_url_update(&mut self) -> Option<String> {
        if std::mem::take(&mut self.url_dirty) {
            Some(self.url_query())
        } else {
            None
        }
    }
}
