//! Per-day completion records (the sparse day→status log of a goal)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a given day was a success or a failure.
///
/// A day that is in neither state is simply absent from the [`DayLog`]: "untouched" is
/// represented by the absence of an entry, not by a third variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Completed,
    Missed,
}

/// The sparse per-day log of a goal.
///
/// Keys serialize as `YYYY-MM-DD` dates, so the wire shape is e.g. `{"2026-01-05": "completed"}`.
/// The log is year-agnostic: it holds every date the user has ever touched, regardless of the
/// year a display surface currently shows.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayLog {
    days: BTreeMap<NaiveDate, DayStatus>,
}

impl DayLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status of a day, or `None` if the day is untouched
    pub fn status(&self, day: NaiveDate) -> Option<DayStatus> {
        self.days.get(&day).copied()
    }

    /// Advances a day one step along the cycle untouched → Completed → Missed → untouched,
    /// and returns the new status.
    ///
    /// This is the only mutation path for day cells. The log has no notion of "today":
    /// rejecting clicks on future cells is the interaction layer's responsibility, see
    /// [`crate::app::App::handle`].
    pub fn toggle(&mut self, day: NaiveDate) -> Option<DayStatus> {
        let new_status = match self.days.get(&day) {
            None => Some(DayStatus::Completed),
            Some(DayStatus::Completed) => Some(DayStatus::Missed),
            Some(DayStatus::Missed) => None,
        };
        match new_status {
            Some(status) => {
                self.days.insert(day, status);
            }
            None => {
                self.days.remove(&day);
            }
        }
        new_status
    }

    pub fn completed_count(&self) -> usize {
        self.days.values().filter(|status| **status == DayStatus::Completed).count()
    }

    pub fn missed_count(&self) -> usize {
        self.days.values().filter(|status| **status == DayStatus::Missed).count()
    }

    /// Number of days that carry a status (either Completed or Missed)
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayStatus)> {
        self.days.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn toggle_cycles_through_the_three_states() {
        let mut log = DayLog::new();

        assert_eq!(log.status(some_day()), None);
        assert_eq!(log.toggle(some_day()), Some(DayStatus::Completed));
        assert_eq!(log.status(some_day()), Some(DayStatus::Completed));
        assert_eq!(log.toggle(some_day()), Some(DayStatus::Missed));
        assert_eq!(log.status(some_day()), Some(DayStatus::Missed));
        assert_eq!(log.toggle(some_day()), None);
        assert_eq!(log.status(some_day()), None);

        // A full cycle leaves no entry behind
        assert!(log.is_empty());
    }

    #[test]
    fn toggling_one_day_does_not_touch_others() {
        let mut log = DayLog::new();
        let other = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        log.toggle(some_day());
        assert_eq!(log.status(other), None);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn counts_follow_the_statuses() {
        let mut log = DayLog::new();
        log.toggle(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()); // completed
        log.toggle(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()); // completed
        log.toggle(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()); // completed...
        log.toggle(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()); // ...then missed

        assert_eq!(log.completed_count(), 2);
        assert_eq!(log.missed_count(), 1);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn serde_day_log() {
        let mut log = DayLog::new();
        log.toggle(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());

        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"2026-01-05":"completed"}"#);

        let retrieved: DayLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, retrieved);
    }
}
