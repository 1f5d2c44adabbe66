// Stopwatch for the elapsed-time display
//
// The page owns the one-second interval and polls `display`; the stopwatch
// only records when it started and stopped, so a stale interval can never
// leak time into the next puzzle.

use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stopwatch {
    started_at: Option<Timestamp>,
    stopped_at: Option<Timestamp>,
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch::default()
    }

    /// Start counting from `now`; restarting a running stopwatch is ignored
    pub fn start(&mut self, now: Timestamp) {
        if self.is_running() {
            return;
        }
        self.started_at = Some(now);
        self.stopped_at = None;
    }

    /// Freeze the elapsed time at `now`
    pub fn stop(&mut self, now: Timestamp) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Stopwatch::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn elapsed_millis(&self, now: Timestamp) -> Timestamp {
        match self.started_at {
            Some(start) => (self.stopped_at.unwrap_or(now) - start).max(0),
            None => 0,
        }
    }

    /// Whole seconds elapsed, rounded down
    pub fn elapsed_seconds(&self, now: Timestamp) -> u64 {
        (self.elapsed_millis(now) / 1000) as u64
    }

    /// `MM:SS` for the on-screen timer
    pub fn display(&self, now: Timestamp) -> String {
        let millis = self.elapsed_millis(now);
        format!("{:02}:{:02}", millis / 60_000, (millis % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_stopwatch() {
        let watch = Stopwatch::new();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed_seconds(50_000), 0);
        assert_eq!(watch.display(50_000), "00:00");
    }

    #[test]
    fn test_running_elapsed() {
        let mut watch = Stopwatch::new();
        watch.start(1_000);
        assert!(watch.is_running());
        assert_eq!(watch.elapsed_seconds(2_999), 1);
        assert_eq!(watch.display(1_000 + 125_000), "02:05");
    }

    #[test]
    fn test_stop_freezes_time() {
        let mut watch = Stopwatch::new();
        watch.start(0);
        watch.stop(97_400);
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed_seconds(500_000), 97);
    }

    #[test]
    fn test_restart_while_running_ignored() {
        let mut watch = Stopwatch::new();
        watch.start(0);
        watch.start(10_000);
        assert_eq!(watch.elapsed_seconds(20_000), 20);
    }

    #[test]
    fn test_reset() {
        let mut watch = Stopwatch::new();
        watch.start(0);
        watch.reset();
        assert!(!watch.is_running());
        assert_eq!(watch.display(99_000), "00:00");
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut watch = Stopwatch::new();
        watch.start(10_000);
        assert_eq!(watch.elapsed_seconds(5_000), 0);
    }
}
