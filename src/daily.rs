// Daily challenge and streak tracking
//
// The daily seed is year + zero-based month + day of month, summed. Distinct
// dates can share a seed (2024-01-06 and 2024-02-05 both give 2030); shared
// links depend on this exact rule, so it stays as is.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::StorageKeys;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::types::{Result, Seed};

/// Page shown once today's challenge is done
pub const COMPLETION_PAGE: &str = "daily-challenge.html";

/// Seed of the daily challenge for `date`
pub fn daily_seed(date: NaiveDate) -> Seed {
    Seed::from(date.year()) + Seed::from(date.month0()) + Seed::from(date.day())
}

/// Today's challenge record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    /// Derived date key; older saves stored it as a bare number
    #[serde(deserialize_with = "string_or_number")]
    pub date: String,
    pub seed: Seed,
    pub is_solved: bool,
}

impl DailyChallenge {
    pub fn for_date(date: NaiveDate) -> DailyChallenge {
        let seed = daily_seed(date);
        DailyChallenge {
            date: seed.to_string(),
            seed,
            is_solved: false,
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid date: {}", other))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub current_streak: u32,
    pub last_solved_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct DailyChallengeTracker {
    daily_key: String,
    streak_key: String,
    challenge: DailyChallenge,
    streak: StreakRecord,
}

impl DailyChallengeTracker {
    /// Load both records, rolling the challenge over to `today` and decaying a
    /// lapsed streak. Anything missing or corrupt is replaced with a default.
    pub fn load(store: &mut dyn KeyValueStore, keys: &StorageKeys, today: NaiveDate) -> DailyChallengeTracker {
        let fresh = DailyChallenge::for_date(today);
        let challenge = match load_json::<DailyChallenge>(store, &keys.daily_seed) {
            Some(stored) if stored.date == fresh.date => stored,
            stored => {
                if stored.is_some() {
                    log::info!("daily challenge rolled over to seed {}", fresh.seed);
                }
                persist(store, &keys.daily_seed, &fresh);
                fresh
            }
        };

        let mut tracker = DailyChallengeTracker {
            daily_key: keys.daily_seed.clone(),
            streak_key: keys.daily_streak.clone(),
            challenge,
            streak: StreakRecord::default(),
        };

        match load_json::<StreakRecord>(store, &keys.daily_streak) {
            Some(streak) => {
                tracker.streak = streak;
                if tracker.decay(today) {
                    persist(store, &tracker.streak_key, &tracker.streak);
                }
            }
            None => persist(store, &tracker.streak_key, &tracker.streak),
        }

        tracker
    }

    pub fn challenge(&self) -> &DailyChallenge {
        &self.challenge
    }

    pub fn streak(&self) -> &StreakRecord {
        &self.streak
    }

    pub fn seed(&self) -> Seed {
        self.challenge.seed
    }

    /// Whether a puzzle played from `seed` counts as today's challenge
    pub fn is_challenge_completion_for(&self, seed: &str) -> bool {
        self.challenge.seed.to_string() == seed
    }

    /// Reset the streak to zero when more than a day has passed since the last solve
    ///
    /// Returns true if the streak changed.
    pub fn decay(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.streak.last_solved_date else {
            return false;
        };
        if (today - last).num_days() > 1 && self.streak.current_streak != 0 {
            log::info!("streak of {} lapsed (last solve {})", self.streak.current_streak, last);
            self.streak.current_streak = 0;
            return true;
        }
        false
    }

    /// Mark today's challenge solved and advance the streak
    ///
    /// Both records are updated in memory before either is written, so a
    /// failed write only loses persistence.
    pub fn mark_solved(&mut self, store: &mut dyn KeyValueStore, today: NaiveDate) -> Result<()> {
        self.challenge.is_solved = true;

        let streak_changed = self.streak.last_solved_date != Some(today);
        if streak_changed {
            match self.streak.last_solved_date {
                Some(last) => {
                    let days = (today - last).num_days();
                    if days == 1 {
                        self.streak.current_streak += 1;
                    } else if days > 1 {
                        self.streak.current_streak = 1;
                    }
                }
                None => self.streak.current_streak = 1,
            }
            self.streak.last_solved_date = Some(today);
            log::info!("daily challenge solved, streak {}", self.streak.current_streak);
        }

        let saved = save_json(store, &self.daily_key, &self.challenge);
        if streak_changed {
            saved.and(save_json(store, &self.streak_key, &self.streak))
        } else {
            saved
        }
    }

    /// Switch to `today`'s challenge if the date moved on since loading
    ///
    /// Returns true if the challenge was replaced.
    pub fn roll_over(&mut self, store: &mut dyn KeyValueStore, today: NaiveDate) -> bool {
        let fresh = DailyChallenge::for_date(today);
        if self.challenge.date == fresh.date {
            return false;
        }
        log::info!("daily challenge rolled over to seed {}", fresh.seed);
        self.challenge = fresh;
        persist(store, &self.daily_key, &self.challenge);
        if self.decay(today) {
            persist(store, &self.streak_key, &self.streak);
        }
        true
    }

    /// Where the daily challenge link should navigate
    pub fn target(&self, daily_size: usize) -> String {
        if self.challenge.is_solved {
            COMPLETION_PAGE.to_string()
        } else {
            format!("index.html?seed={}&size={}", self.challenge.seed, daily_size)
        }
    }
}

fn persist<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save_json(store, key, value) {
        log::error!("failed to persist {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FailingStore, MemoryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker_at(store: &mut dyn KeyValueStore, today: NaiveDate) -> DailyChallengeTracker {
        DailyChallengeTracker::load(store, &StorageKeys::default(), today)
    }

    #[test]
    fn test_daily_seed_sum() {
        assert_eq!(daily_seed(date(2024, 1, 5)), 2029);
        assert_eq!(daily_seed(date(2024, 12, 31)), 2024 + 11 + 31);
    }

    #[test]
    fn test_daily_seed_collisions_are_intended() {
        assert_eq!(daily_seed(date(2024, 1, 5)), daily_seed(date(2023, 2, 5)));
        assert_eq!(daily_seed(date(2024, 1, 6)), daily_seed(date(2024, 2, 5)));
    }

    #[test]
    fn test_fresh_load_writes_defaults() {
        let mut store = MemoryStore::new();
        let tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert_eq!(tracker.seed(), 2024 + 2 + 10);
        assert!(!tracker.challenge().is_solved);
        assert_eq!(tracker.streak(), &StreakRecord::default());
        assert_eq!(
            store.get_item("dailySeed").unwrap().as_deref(),
            Some(r#"{"date":"2036","seed":2036,"isSolved":false}"#)
        );
        assert_eq!(
            store.get_item("dailyStreak").unwrap().as_deref(),
            Some(r#"{"currentStreak":0,"lastSolvedDate":null}"#)
        );
    }

    #[test]
    fn test_same_day_keeps_solved_flag() {
        let mut store = MemoryStore::new();
        let today = date(2024, 3, 10);
        let mut tracker = tracker_at(&mut store, today);
        tracker.mark_solved(&mut store, today).unwrap();

        let reloaded = tracker_at(&mut store, today);
        assert!(reloaded.challenge().is_solved);
    }

    #[test]
    fn test_rollover_replaces_record() {
        let mut store = MemoryStore::new();
        let mut tracker = tracker_at(&mut store, date(2024, 3, 10));
        tracker.mark_solved(&mut store, date(2024, 3, 10)).unwrap();

        let next = tracker_at(&mut store, date(2024, 3, 11));
        assert!(!next.challenge().is_solved);
        assert_eq!(next.seed(), 2037);
    }

    #[test]
    fn test_legacy_numeric_date_accepted() {
        let mut store = MemoryStore::new();
        store
            .set_item("dailySeed", r#"{"date":2036,"seed":2036,"isSolved":true}"#)
            .unwrap();
        let tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert!(tracker.challenge().is_solved);
    }

    #[test]
    fn test_corrupt_records_replaced() {
        let mut store = MemoryStore::new();
        store.set_item("dailySeed", "garbage").unwrap();
        store.set_item("dailyStreak", "{\"currentStreak\":").unwrap();
        let tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert_eq!(tracker.seed(), 2036);
        assert_eq!(tracker.streak().current_streak, 0);
        assert!(load_json::<StreakRecord>(&store, "dailyStreak").is_some());
    }

    #[test]
    fn test_streak_increments_from_yesterday() {
        let mut store = MemoryStore::new();
        let mut tracker = tracker_at(&mut store, date(2024, 3, 9));
        tracker.mark_solved(&mut store, date(2024, 3, 9)).unwrap();
        assert_eq!(tracker.streak().current_streak, 1);

        let mut tracker = tracker_at(&mut store, date(2024, 3, 10));
        tracker.mark_solved(&mut store, date(2024, 3, 10)).unwrap();
        assert_eq!(tracker.streak().current_streak, 2);
        assert_eq!(tracker.streak().last_solved_date, Some(date(2024, 3, 10)));
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let mut store = MemoryStore::new();
        save_json(
            &mut store,
            "dailyStreak",
            &StreakRecord {
                current_streak: 5,
                last_solved_date: Some(date(2024, 3, 7)),
            },
        )
        .unwrap();

        let mut tracker = tracker_at(&mut store, date(2024, 3, 10));
        tracker.mark_solved(&mut store, date(2024, 3, 10)).unwrap();
        assert_eq!(tracker.streak().current_streak, 1);
    }

    #[test]
    fn test_second_solve_same_day_is_noop() {
        let mut store = MemoryStore::new();
        let today = date(2024, 3, 10);
        let mut tracker = tracker_at(&mut store, today);
        tracker.mark_solved(&mut store, today).unwrap();
        tracker.mark_solved(&mut store, today).unwrap();
        assert_eq!(tracker.streak().current_streak, 1);
    }

    #[test]
    fn test_decay_on_load() {
        let mut store = MemoryStore::new();
        save_json(
            &mut store,
            "dailyStreak",
            &StreakRecord {
                current_streak: 4,
                last_solved_date: Some(date(2024, 3, 8)),
            },
        )
        .unwrap();

        let tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert_eq!(tracker.streak().current_streak, 0);
        let stored: StreakRecord = load_json(&store, "dailyStreak").unwrap();
        assert_eq!(stored.current_streak, 0);
        assert_eq!(stored.last_solved_date, Some(date(2024, 3, 8)));
    }

    #[test]
    fn test_no_decay_from_yesterday() {
        let mut store = MemoryStore::new();
        save_json(
            &mut store,
            "dailyStreak",
            &StreakRecord {
                current_streak: 4,
                last_solved_date: Some(date(2024, 3, 9)),
            },
        )
        .unwrap();

        let tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert_eq!(tracker.streak().current_streak, 4);
    }

    #[test]
    fn test_challenge_completion_match() {
        let mut store = MemoryStore::new();
        let tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert!(tracker.is_challenge_completion_for("2036"));
        assert!(!tracker.is_challenge_completion_for("2037"));
        assert!(!tracker.is_challenge_completion_for(""));
    }

    #[test]
    fn test_target() {
        let mut store = MemoryStore::new();
        let today = date(2024, 3, 10);
        let mut tracker = tracker_at(&mut store, today);
        assert_eq!(tracker.target(4), "index.html?seed=2036&size=4");
        tracker.mark_solved(&mut store, today).unwrap();
        assert_eq!(tracker.target(4), COMPLETION_PAGE);
    }

    #[test]
    fn test_mark_solved_keeps_streak_when_write_fails() {
        let mut store = FailingStore::new("dailySeed");
        let today = date(2024, 3, 10);
        let mut tracker = tracker_at(&mut store, today);
        assert!(tracker.mark_solved(&mut store, today).is_err());

        assert!(tracker.challenge().is_solved);
        assert_eq!(tracker.streak().current_streak, 1);
        let stored: StreakRecord = load_json(&store, "dailyStreak").unwrap();
        assert_eq!(stored.current_streak, 1);
    }

    #[test]
    fn test_roll_over_after_midnight() {
        let mut store = MemoryStore::new();
        let mut tracker = tracker_at(&mut store, date(2024, 3, 10));
        assert!(!tracker.roll_over(&mut store, date(2024, 3, 10)));
        tracker.mark_solved(&mut store, date(2024, 3, 10)).unwrap();

        assert!(tracker.roll_over(&mut store, date(2024, 3, 11)));
        assert_eq!(tracker.seed(), 2037);
        assert!(!tracker.challenge().is_solved);
        assert_eq!(tracker.streak().current_streak, 1);
        let stored: DailyChallenge = load_json(&store, "dailySeed").unwrap();
        assert_eq!(stored, DailyChallenge::for_date(date(2024, 3, 11)));
    }

    #[test]
    fn test_roll_over_decays_lapsed_streak() {
        let mut store = MemoryStore::new();
        let mut tracker = tracker_at(&mut store, date(2024, 3, 10));
        tracker.mark_solved(&mut store, date(2024, 3, 10)).unwrap();

        assert!(tracker.roll_over(&mut store, date(2024, 3, 12)));
        assert_eq!(tracker.streak().current_streak, 0);
        let stored: StreakRecord = load_json(&store, "dailyStreak").unwrap();
        assert_eq!(stored.current_streak, 0);
    }
}
