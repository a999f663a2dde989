//! Week-aligned calendar grids (the date backbone of a contribution graph)

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Abbreviated month names, as a contribution grid displays them
pub static MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One displayed week: exactly seven consecutive dates, Sunday first
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Week {
    days: [NaiveDate; 7],
}

impl Week {
    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    pub fn sunday(&self) -> NaiveDate {
        self.days[0]
    }
}

/// A month name attached to the week column where that month first appears
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub name: &'static str,
    pub week_index: usize,
}

/// A month label together with the number of week columns it spans.
///
/// Display surfaces size the label row with these, e.g. `width = weeks * cell_width`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    pub name: &'static str,
    pub weeks: usize,
}

/// Returns every date a grid displays for a year: from the Sunday on/before January 1st
/// through the Saturday on/after December 31st, so that every displayed week is complete.
///
/// This is a pure function of the year. The returned length is always a multiple of 7.
pub fn year_dates(year: i32) -> Vec<NaiveDate> {
    let jan_1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("year out of range for a calendar grid");
    let dec_31 = NaiveDate::from_ymd_opt(year, 12, 31).expect("year out of range for a calendar grid");

    let first_sunday = jan_1 - Duration::days(jan_1.weekday().num_days_from_sunday() as i64);

    // 52 weeks plus up to two padding weeks
    let mut dates = Vec::with_capacity(54 * 7);
    let mut current = first_sunday;
    while current <= dec_31 || current.weekday() != Weekday::Sun {
        dates.push(current);
        current = current + Duration::days(1);
    }
    dates
}

/// The [`year_dates`] of a year, partitioned into consecutive weeks
pub fn year_weeks(year: i32) -> Vec<Week> {
    year_dates(year)
        .chunks_exact(7)
        .map(|chunk| {
            let mut days = [chunk[0]; 7];
            days.copy_from_slice(chunk);
            Week { days }
        })
        .collect()
}

/// Finds where months begin: for each week, the first date that belongs to the requested
/// year and starts a month not seen yet gets a label at that week column.
///
/// Padding dates from adjacent years never produce a label.
pub fn month_labels(weeks: &[Week], year: i32) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut last_month = 0; // months are 1-based in chrono, 0 means "none seen yet"

    for (week_index, week) in weeks.iter().enumerate() {
        let transition = week
            .days()
            .iter()
            .find(|day| day.year() == year && day.month() != last_month);
        if let Some(day) = transition {
            last_month = day.month();
            labels.push(MonthLabel {
                name: MONTH_NAMES[(last_month - 1) as usize],
                week_index,
            });
        }
    }

    labels
}

/// Sizes every label: a label spans the week columns up to the next label, the last one
/// spans up to the end of the grid.
pub fn month_spans(labels: &[MonthLabel], week_count: usize) -> Vec<MonthSpan> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let next_start = labels.get(i + 1).map(|next| next.week_index).unwrap_or(week_count);
            MonthSpan {
                name: label.name,
                weeks: next_start - label.week_index,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_are_week_aligned() {
        for year in &[2016, 2020, 2023, 2024, 2025, 2026] {
            let dates = year_dates(*year);
            assert_eq!(dates.len() % 7, 0, "year {}", year);
            assert_eq!(dates[0].weekday(), Weekday::Sun, "year {}", year);

            let last = dates[dates.len() - 1];
            let dec_31 = NaiveDate::from_ymd_opt(*year, 12, 31).unwrap();
            assert_eq!(last.weekday(), Weekday::Sat, "year {}", year);
            assert!(last >= dec_31, "year {}", year);

            // Every day of the year is in there, consecutively
            let jan_1 = NaiveDate::from_ymd_opt(*year, 1, 1).unwrap();
            assert!(dates.contains(&jan_1));
            assert!(dates.contains(&dec_31));
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }
    }

    #[test]
    fn years_starting_on_a_sunday_have_no_leading_padding() {
        // January 1st, 2023 was a Sunday
        let dates = year_dates(2023);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn years_ending_on_a_saturday_have_no_trailing_padding() {
        // December 31st, 2016 was a Saturday
        let dates = year_dates(2016);
        assert_eq!(dates[dates.len() - 1], NaiveDate::from_ymd_opt(2016, 12, 31).unwrap());
    }

    #[test]
    fn weeks_partition_the_dates() {
        let dates = year_dates(2026);
        let weeks = year_weeks(2026);
        assert_eq!(weeks.len() * 7, dates.len());
        assert_eq!(weeks[0].sunday(), dates[0]);
        for week in &weeks {
            assert_eq!(week.days()[0].weekday(), Weekday::Sun);
            assert_eq!(week.days()[6].weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn every_month_gets_exactly_one_label() {
        for year in &[2023, 2024, 2026] {
            let weeks = year_weeks(*year);
            let labels = month_labels(&weeks, *year);

            assert_eq!(labels.len(), 12, "year {}", year);
            assert_eq!(labels[0].name, "Jan");
            assert_eq!(labels[11].name, "Dec");
            for pair in labels.windows(2) {
                assert!(pair[0].week_index < pair[1].week_index);
            }
        }
    }

    #[test]
    fn padding_days_produce_no_label() {
        // The 2026 grid starts on Sunday, December 28th, 2025. That first week must be
        // labeled "Jan" (for January 1st, 2026), not "Dec".
        let weeks = year_weeks(2026);
        assert_eq!(weeks[0].sunday(), NaiveDate::from_ymd_opt(2025, 12, 28).unwrap());

        let labels = month_labels(&weeks, 2026);
        assert_eq!(labels[0], MonthLabel { name: "Jan", week_index: 0 });
    }

    #[test]
    fn spans_cover_the_grid_up_to_its_end() {
        let weeks = year_weeks(2026);
        let labels = month_labels(&weeks, 2026);
        let spans = month_spans(&labels, weeks.len());

        assert_eq!(spans.len(), labels.len());
        let total: usize = spans.iter().map(|span| span.weeks).sum();
        assert_eq!(total, weeks.len() - labels[0].week_index);
        assert!(spans.iter().all(|span| span.weeks > 0));
    }
}
