//! Projection of a goal onto a displayable contribution grid

use bitflags::bitflags;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::day_log::DayStatus;
use crate::goal::Goal;
use crate::grid;
use crate::grid::MonthSpan;
use crate::stats::Stats;

bitflags! {
    /// How a single cell is classified.
    ///
    /// Flags combine additively (a cell can be completed *and* today), which is why this is
    /// not an enum. The one rule display surfaces must honour is that `FUTURE` suppresses
    /// interactivity no matter what else is set, see [`Cell::is_interactive`].
    #[derive(Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        const COMPLETED = 1;
        const MISSED = 2;
        const TODAY = 4;
        const FUTURE = 8;
        /// The cell belongs to a padding week outside the requested year. It is still
        /// rendered (de-emphasized), and it may still carry a status: the day log is
        /// year-agnostic, only the rendering is year-scoped
        const OTHER_YEAR = 16;
    }
}

/// The smallest display/interaction unit: one calendar date of one goal
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub date: NaiveDate,
    pub flags: CellFlags,
}

impl Cell {
    /// Whether a click on this cell may toggle it. Future cells never are, regardless of
    /// any other flag
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(CellFlags::FUTURE) == false
    }

    /// The CSS-like class list of this cell, e.g. `"cell completed today"`
    pub fn class_names(&self) -> String {
        let mut classes = String::from("cell");
        if self.flags.contains(CellFlags::COMPLETED) { classes.push_str(" completed"); }
        if self.flags.contains(CellFlags::MISSED) { classes.push_str(" missed"); }
        if self.flags.contains(CellFlags::TODAY) { classes.push_str(" today"); }
        if self.flags.contains(CellFlags::FUTURE) { classes.push_str(" future"); }
        if self.flags.contains(CellFlags::OTHER_YEAR) { classes.push_str(" other-year"); }
        classes
    }
}

/// Everything a display surface needs to show one goal for one year
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoalView {
    /// The stable local handle of the goal, to carry through interaction events
    pub uid: String,
    pub name: String,
    /// The week/cell matrix: one inner `Vec` of 7 cells per displayed week
    pub weeks: Vec<Vec<Cell>>,
    pub month_spans: Vec<MonthSpan>,
    pub stats: Stats,
}

/// Classifies a single date against the requested year and the local calendar day
pub fn classify(date: NaiveDate, status: Option<DayStatus>, year: i32, today: NaiveDate) -> CellFlags {
    let mut flags = CellFlags::empty();
    match status {
        Some(DayStatus::Completed) => flags.insert(CellFlags::COMPLETED),
        Some(DayStatus::Missed) => flags.insert(CellFlags::MISSED),
        None => {},
    }
    if date == today {
        flags.insert(CellFlags::TODAY);
    }
    if date > today {
        flags.insert(CellFlags::FUTURE);
    }
    if date.year() != year {
        flags.insert(CellFlags::OTHER_YEAR);
    }
    flags
}

/// Renders a goal for a year.
///
/// This is a pure projection of the in-memory state: it has no side effect and can be
/// invoked repeatedly without drift, same goal and same day give the same view.
pub fn render_goal(goal: &Goal, year: i32, today: NaiveDate) -> GoalView {
    let weeks = grid::year_weeks(year);
    let labels = grid::month_labels(&weeks, year);
    let month_spans = grid::month_spans(&labels, weeks.len());

    let weeks = weeks
        .iter()
        .map(|week| {
            week.days()
                .iter()
                .map(|&date| Cell {
                    date,
                    flags: classify(date, goal.days().status(date), year, today),
                })
                .collect()
        })
        .collect();

    GoalView {
        uid: goal.uid().to_string(),
        name: goal.name().to_string(),
        weeks,
        month_spans,
        stats: Stats::compute(goal.days(), today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    fn some_goal() -> Goal {
        let mut goal = Goal::new("Run".to_string(), Uuid::new_v4());
        goal.toggle_day(today()); // completed
        goal.toggle_day(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()); // completed...
        goal.toggle_day(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()); // ...then missed
        goal
    }

    #[test]
    fn other_year_is_set_exactly_on_padding_cells() {
        let view = render_goal(&some_goal(), 2026, today());
        for week in &view.weeks {
            for cell in week {
                assert_eq!(
                    cell.flags.contains(CellFlags::OTHER_YEAR),
                    cell.date.year() != 2026,
                    "{}", cell.date
                );
            }
        }
    }

    #[test]
    fn statuses_and_day_markers_combine() {
        let view = render_goal(&some_goal(), 2026, today());
        let cells: Vec<Cell> = view.weeks.iter().flatten().copied().collect();

        let today_cell = cells.iter().find(|c| c.date == today()).unwrap();
        assert!(today_cell.flags.contains(CellFlags::COMPLETED | CellFlags::TODAY));
        assert!(today_cell.is_interactive());
        assert_eq!(today_cell.class_names(), "cell completed today");

        let yesterday = cells.iter().find(|c| c.date == NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()).unwrap();
        assert!(yesterday.flags.contains(CellFlags::MISSED));
        assert_eq!(yesterday.class_names(), "cell missed");
    }

    #[test]
    fn future_cells_are_never_interactive() {
        let view = render_goal(&some_goal(), 2026, today());
        for cell in view.weeks.iter().flatten() {
            assert_eq!(cell.flags.contains(CellFlags::FUTURE), cell.date > today());
            assert_eq!(cell.is_interactive(), cell.date <= today());
        }
    }

    #[test]
    fn padding_cells_still_show_their_status() {
        // The 2027 grid starts within 2026: a status from a previously-selected year must
        // still show up on the de-emphasized padding cells
        let mut goal = Goal::new("Read".to_string(), Uuid::new_v4());
        let dec_30 = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        goal.toggle_day(dec_30);

        let today = NaiveDate::from_ymd_opt(2027, 1, 10).unwrap();
        let view = render_goal(&goal, 2027, today);
        let cell = view.weeks.iter().flatten().find(|c| c.date == dec_30).unwrap();
        assert!(cell.flags.contains(CellFlags::COMPLETED | CellFlags::OTHER_YEAR));
    }

    #[test]
    fn rendering_is_idempotent() {
        let goal = some_goal();
        assert_eq!(render_goal(&goal, 2026, today()), render_goal(&goal, 2026, today()));
    }

    #[test]
    fn views_carry_the_goal_stats() {
        let view = render_goal(&some_goal(), 2026, today());
        assert_eq!(view.stats, Stats { completed: 1, missed: 1, total: 2, streak: 1 });
        assert_eq!(view.name, "Run");
    }
}
