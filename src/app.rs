//! The dispatch layer between a display surface and the stores
//!
//! Every user gesture maps to exactly one [`Command`], and every command to one named
//! operation: the mapping is explicit, and testable without any display surface.

use chrono::{Datelike, NaiveDate};

use crate::errors::StoreError;
use crate::prefs::{Prefs, Theme};
use crate::render::{render_goal, GoalView};
use crate::store::GoalStore;
use crate::traits::RecordSource;

/// The first year the year selector offers
pub const FIRST_TRACKED_YEAR: i32 = 2026;

/// One user gesture. Goals are referenced by their stable local handle ([`Goal::uid`](crate::Goal::uid)),
/// which stays valid across deletions of other goals
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    CreateGoal { name: String },
    RenameGoal { goal: String, name: String },
    ToggleDay { goal: String, date: NaiveDate },
    DeleteGoal { goal: String },
    SelectYear { year: i32 },
    SetTheme { theme: Theme },
}

/// One user's session: the goal collection, the selected year, and the preferences.
///
/// Remote failures come back as `Err(StoreError)` for the surface to show as a notice;
/// they are never retried automatically and never end the session. Validation failures
/// (empty names, clicks on future days) are resolved locally and are not errors
pub struct App<S: RecordSource> {
    store: GoalStore<S>,
    prefs: Prefs,
    selected_year: i32,
}

impl<S: RecordSource> App<S> {
    pub fn new(store: GoalStore<S>, prefs: Prefs, today: NaiveDate) -> Self {
        let selected_year = std::cmp::max(today.year(), FIRST_TRACKED_YEAR);
        Self { store, prefs, selected_year }
    }

    pub fn store(&self) -> &GoalStore<S> { &self.store }
    pub fn selected_year(&self) -> i32 { self.selected_year }
    pub fn theme(&self) -> Theme { self.prefs.theme() }

    /// Fetches the goal collection. On failure the collection is left empty: the session
    /// proceeds with zero goals, see [`GoalStore::load`]
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.store.load().await
    }

    /// Applies one command: the local mutation first (instant), then the per-action save
    pub async fn handle(&mut self, command: Command, today: NaiveDate) -> Result<(), StoreError> {
        match command {
            Command::CreateGoal { name } => {
                match self.store.create(&name).await {
                    Err(StoreError::InvalidName) => {
                        log::info!("Ignoring a goal creation with an empty name");
                        Ok(())
                    },
                    Err(err) => Err(err),
                    Ok(_uid) => Ok(()),
                }
            },
            Command::RenameGoal { goal, name } => {
                match self.store.rename(&goal, &name) {
                    Err(StoreError::InvalidName) => {
                        // The previous name was never overwritten: this *is* the revert
                        log::info!("Ignoring a rename to an empty name");
                        Ok(())
                    },
                    Err(err) => Err(err),
                    Ok(false) => Ok(()),
                    Ok(true) => self.store.save_goal(&goal).await,
                }
            },
            Command::ToggleDay { goal, date } => {
                if date > today {
                    log::info!("Ignoring a click on the future day {}", date);
                    return Ok(());
                }
                self.store.toggle_day(&goal, date)?;
                self.store.save_goal(&goal).await
            },
            Command::DeleteGoal { goal } => self.store.delete(&goal).await,
            Command::SelectYear { year } => {
                self.selected_year = year;
                Ok(())
            },
            Command::SetTheme { theme } => {
                self.prefs.set_theme(theme);
                Ok(())
            },
        }
    }

    /// Renders every goal for the selected year. A pure projection of the in-memory state:
    /// repeated calls return the same views
    pub fn views(&self, today: NaiveDate) -> Vec<GoalView> {
        self.store
            .goals()
            .iter()
            .map(|goal| render_goal(goal, self.selected_year, today))
            .collect()
    }

    /// The years a year selector offers: the current one and the next, never before 2026
    pub fn year_choices(today: NaiveDate) -> Vec<i32> {
        [today.year(), today.year() + 1]
            .iter()
            .copied()
            .filter(|year| *year >= FIRST_TRACKED_YEAR)
            .collect()
    }

    /// Re-attempts every save that previously failed. Returns whether everything is
    /// persisted now
    pub async fn retry_saves(&mut self) -> bool {
        self.store.save().await
    }
}
