//! Derived statistics of a goal (aggregate counts and the current streak)

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::day_log::{DayLog, DayStatus};

/// The aggregate counters a goal header displays.
///
/// These are derived from a [`DayLog`] at read time and never persisted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub completed: usize,
    pub missed: usize,
    pub total: usize,
    pub streak: usize,
}

impl Stats {
    /// Computes the stats of a log as of `today` (the local calendar day).
    ///
    /// This is a pure function: same log and same day, same stats.
    pub fn compute(log: &DayLog, today: NaiveDate) -> Self {
        let completed = log.completed_count();
        let missed = log.missed_count();
        Self {
            completed,
            missed,
            total: completed + missed,
            streak: streak(log, today),
        }
    }
}

/// Number of consecutive Completed days ending at `today`, walking backward one day at a
/// time. The first day that is not Completed (Missed or untouched) ends the count, so the
/// streak is 0 whenever `today` itself is not Completed.
pub fn streak(log: &DayLog, today: NaiveDate) -> usize {
    let mut streak = 0;
    let mut current = today;
    while log.status(current) == Some(DayStatus::Completed) {
        streak += 1;
        current = current - Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn empty_log_has_zero_stats() {
        let stats = Stats::compute(&DayLog::new(), today());
        assert_eq!(stats, Stats { completed: 0, missed: 0, total: 0, streak: 0 });
    }

    #[test]
    fn streak_counts_consecutive_completed_days_ending_today() {
        let mut log = DayLog::new();
        log.toggle(days_ago(0));
        log.toggle(days_ago(1));
        log.toggle(days_ago(2));
        // The 4th day back was missed: toggle twice
        log.toggle(days_ago(3));
        log.toggle(days_ago(3));

        let stats = Stats::compute(&log, today());
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.missed, 1);
        assert_eq!(stats.total, 4);
    }

    #[test]
    fn streak_of_a_single_completed_today() {
        let mut log = DayLog::new();
        log.toggle(today());
        assert_eq!(streak(&log, today()), 1);
    }

    #[test]
    fn streak_is_zero_when_today_is_not_completed() {
        let mut log = DayLog::new();
        // Yesterday completed, today untouched
        log.toggle(days_ago(1));
        assert_eq!(streak(&log, today()), 0);

        // Today missed
        log.toggle(today());
        log.toggle(today());
        assert_eq!(streak(&log, today()), 0);
    }

    #[test]
    fn an_untouched_day_breaks_the_streak() {
        let mut log = DayLog::new();
        log.toggle(days_ago(0));
        log.toggle(days_ago(1));
        // days_ago(2) untouched
        log.toggle(days_ago(3));

        assert_eq!(streak(&log, today()), 2);
    }

    #[test]
    fn totals_add_up() {
        let mut log = DayLog::new();
        for n in 0..5 {
            log.toggle(days_ago(n));
        }
        log.toggle(days_ago(0)); // today becomes missed

        let stats = Stats::compute(&log, today());
        assert_eq!(stats.total, stats.completed + stats.missed);
        assert!(stats.total <= log.len());
    }
}
