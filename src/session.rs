//! Process-lifetime session state.
//!
//! The counter and last-log timestamp live only as long as the process; nothing
//! is persisted across restarts.

use chrono::{DateTime, Utc};

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Session counter and timestamp of the last successful record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    session_count: u64,
    last_log_time: DateTime<Utc>,
}

impl SessionState {
    /// Fresh state; `started_at` stands in for the last log time until the first record.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            session_count: 0,
            last_log_time: started_at,
        }
    }

    pub fn session_count(&self) -> u64 {
        self.session_count
    }

    pub fn last_log_time(&self) -> DateTime<Utc> {
        self.last_log_time
    }

    /// Count a record attempt and return the new session number.
    ///
    /// Attempts are counted whether or not the record is eventually created.
    pub fn begin_attempt(&mut self) -> u64 {
        self.session_count += 1;
        self.session_count
    }

    /// Mark a record as created at `at`, returning the previous last log time.
    pub fn commit(&mut self, at: DateTime<Utc>) -> DateTime<Utc> {
        std::mem::replace(&mut self.last_log_time, at)
    }
}

/// Page title for a session, e.g. `2026-10-16 session #3`.
pub fn session_title(at: DateTime<Utc>, session_number: u64) -> String {
    format!("{} session #{}", at.format("%Y-%m-%d"), session_number)
}

/// Whole minutes between two instants, rounded to nearest.
pub fn minutes_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let millis = (later - earlier).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}

pub fn format_elapsed(minutes: i64) -> String {
    format!("{} minutes", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, h, m, s).unwrap()
    }

    #[test]
    fn test_counter_starts_at_zero_and_increments() {
        let mut state = SessionState::new(at(9, 0, 0));
        assert_eq!(state.session_count(), 0);
        assert_eq!(state.begin_attempt(), 1);
        assert_eq!(state.begin_attempt(), 2);
        assert_eq!(state.session_count(), 2);
    }

    #[test]
    fn test_commit_returns_previous_time() {
        let mut state = SessionState::new(at(9, 0, 0));
        let previous = state.commit(at(10, 0, 0));
        assert_eq!(previous, at(9, 0, 0));
        assert_eq!(state.last_log_time(), at(10, 0, 0));
    }

    #[test]
    fn test_session_title_uses_utc_date() {
        assert_eq!(session_title(at(23, 59, 59), 7), "2026-10-16 session #7");
    }

    #[test]
    fn test_minutes_between_rounds() {
        let start = at(9, 0, 0);
        assert_eq!(minutes_between(start, start), 0);
        assert_eq!(minutes_between(start, start + Duration::seconds(29)), 0);
        assert_eq!(minutes_between(start, start + Duration::seconds(30)), 1);
        assert_eq!(minutes_between(start, start + Duration::seconds(150)), 3);
        assert_eq!(minutes_between(start, start + Duration::minutes(45)), 45);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(12), "12 minutes");
    }
}
