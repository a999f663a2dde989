//! This module owns the ordered goal collection and keeps it persisted
//!
//! Every mutation is applied to the in-memory collection first, so edits feel instant;
//! durability comes from the save operations, which push full-state snapshots to the
//! [`RecordSource`] one at a time.

use chrono::NaiveDate;

use crate::day_log::DayStatus;
use crate::errors::StoreError;
use crate::goal::{Goal, SyncStatus, UserId};
use crate::traits::RecordSource;

pub mod save_progress;
use save_progress::SaveProgress;
use save_progress::{FeedbackSender, SaveEvent};

/// The ordered collection of the goals of one user, backed by a [`RecordSource`].
///
/// Goals are addressed by their stable local handle ([`Goal::uid`]), never by their index
/// in the displayed list: indices go stale as soon as another goal is deleted.
///
/// Dirtiness is tracked per goal (see [`SyncStatus`]): rapid repeated edits to the same
/// goal coalesce into a single pending snapshot, and each save writes at most once per
/// goal. A failed save keeps the goal pending, so nothing is silently lost: running
/// another save retries it.
pub struct GoalStore<S: RecordSource> {
    source: S,
    owner: UserId,
    goals: Vec<Goal>,
}

impl<S: RecordSource> GoalStore<S> {
    /// Create a store for this user's goals. This does not fetch anything yet, see [`Self::load`]
    pub fn new(source: S, owner: UserId) -> Self {
        Self { source, owner, goals: Vec::new() }
    }

    pub fn owner(&self) -> UserId { self.owner }
    /// The goals, ordered by creation time ascending
    pub fn goals(&self) -> &[Goal] { &self.goals }
    /// The backing source.
    ///
    /// Apart from tests (e.g. to inspect operation counters on a mocked source), there are
    /// very few reasons to access it directly
    pub fn source(&self) -> &S { &self.source }

    pub fn goal(&self, uid: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.uid() == uid)
    }

    fn goal_mut(&mut self, uid: &str) -> Result<&mut Goal, StoreError> {
        match self.goals.iter_mut().find(|goal| goal.uid() == uid) {
            None => Err(StoreError::UnknownGoal(uid.to_string())),
            Some(goal) => Ok(goal),
        }
    }

    /// Replaces the collection with the goals the source holds.
    ///
    /// On failure the collection is left empty: this is not fatal, the session proceeds
    /// with zero goals and the error is surfaced to the user
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.goals.clear();
        let stored = self.source.list(self.owner).await.map_err(StoreError::Load)?;
        log::debug!("Loaded {} goals from the record store", stored.len());
        self.goals = stored.into_iter().map(Goal::from_stored).collect();
        Ok(())
    }

    /// Appends a brand new goal and inserts it into the source, returning its local handle.
    ///
    /// If the insert fails, the goal stays in the collection without a remote identity
    /// (`Err(StoreError::Save)` is returned); the next [`Self::save`] retries the insert
    pub async fn create(&mut self, name: &str) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }

        let goal = Goal::new(name.to_string(), self.owner);
        let uid = goal.uid().to_string();
        self.goals.push(goal);

        self.save_goal(&uid).await?;
        Ok(uid)
    }

    /// Renames a goal in place, and reports whether anything changed (i.e. whether there is
    /// something to persist).
    ///
    /// Empty or whitespace-only names are rejected without touching the goal: the previous
    /// name simply stays, which is the "revert" the interaction layer relies on. Renaming
    /// to the current name is a no-op and must not trigger any persistence call
    pub fn rename(&mut self, uid: &str, new_name: &str) -> Result<bool, StoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::InvalidName);
        }

        let goal = self.goal_mut(uid)?;
        if goal.name() == new_name {
            return Ok(false);
        }
        goal.set_name(new_name.to_string());
        Ok(true)
    }

    /// Cycles the status of a day (untouched → Completed → Missed → untouched) and returns
    /// the new status.
    ///
    /// This only mutates the in-memory goal and marks it pending; persist with
    /// [`Self::save_goal`]. Callers must have rejected future dates already, the store has
    /// no notion of "today"
    pub fn toggle_day(&mut self, uid: &str, day: NaiveDate) -> Result<Option<DayStatus>, StoreError> {
        let goal = self.goal_mut(uid)?;
        Ok(goal.toggle_day(day))
    }

    /// Deletes a goal: from the record store first, then from the local collection.
    ///
    /// If the remote delete fails, the local goal is kept (and the error surfaced), so the
    /// collection never claims a deletion the store does not know about. Goals that were
    /// never inserted are removed locally right away
    pub async fn delete(&mut self, uid: &str) -> Result<(), StoreError> {
        let index = match self.goals.iter().position(|goal| goal.uid() == uid) {
            None => return Err(StoreError::UnknownGoal(uid.to_string())),
            Some(index) => index,
        };

        if let Some(id) = self.goals[index].id() {
            if let Err(source) = self.source.delete(id).await {
                return Err(StoreError::Delete {
                    name: self.goals[index].name().to_string(),
                    source,
                });
            }
        }

        self.goals.remove(index);
        Ok(())
    }

    /// Persists one goal if it has pending changes: an insert if it has no remote identity
    /// yet, a full-snapshot update otherwise. Does nothing for an already-synced goal.
    ///
    /// On failure the goal stays pending and will be retried by the next save
    pub async fn save_goal(&mut self, uid: &str) -> Result<(), StoreError> {
        // Look the goal up on the field directly: `self.source` stays borrowable
        let goal = match self.goals.iter_mut().find(|goal| goal.uid() == uid) {
            None => return Err(StoreError::UnknownGoal(uid.to_string())),
            Some(goal) => goal,
        };

        match (goal.id(), goal.sync_status()) {
            (_, SyncStatus::Synced) => Ok(()),
            (None, _) => {
                log::debug!("Inserting goal \"{}\" into the record store", goal.name());
                match self.source.insert(goal.to_record()).await {
                    Ok(stored) => {
                        goal.assign_identity(stored.id, stored.created_at);
                        Ok(())
                    },
                    Err(source) => Err(StoreError::Save { name: goal.name().to_string(), source }),
                }
            },
            (Some(id), _) => {
                log::debug!("Updating goal \"{}\" in the record store", goal.name());
                match self.source.update(id, goal.to_record()).await {
                    Ok(()) => {
                        goal.set_sync_status(SyncStatus::Synced);
                        Ok(())
                    },
                    Err(source) => Err(StoreError::Save { name: goal.name().to_string(), source }),
                }
            },
        }
    }

    /// Whether any goal still has changes the record store has not seen
    pub fn has_pending_saves(&self) -> bool {
        self.goals.iter().any(|goal| goal.sync_status() != &SyncStatus::Synced)
    }

    /// Persists every pending goal, and provides feedback to the user about the progress.
    ///
    /// Goals are written one at a time (there is at most one in-flight request), each as
    /// the latest full-state snapshot. It returns whether everything persisted (details
    /// about errors are logged using the `log::*` macros). Goals that failed stay pending:
    /// simply run this function again, it will pick up where it failed
    pub async fn save_with_feedback(&mut self, feedback_sender: FeedbackSender) -> bool {
        let mut progress = SaveProgress::new_with_feedback_channel(feedback_sender);
        self.run_save(&mut progress).await
    }

    /// Persists every pending goal, without giving any feedback.
    ///
    /// See [`Self::save_with_feedback`]
    pub async fn save(&mut self) -> bool {
        let mut progress = SaveProgress::new();
        self.run_save(&mut progress).await
    }

    async fn run_save(&mut self, progress: &mut SaveProgress) -> bool {
        progress.info("Starting a save sweep.");
        progress.feedback(SaveEvent::Started);

        let pending: Vec<(String, String)> = self.goals
            .iter()
            .filter(|goal| goal.sync_status() != &SyncStatus::Synced)
            .map(|goal| (goal.uid().to_string(), goal.name().to_string()))
            .collect();

        let mut saved = 0;
        for (uid, name) in pending {
            progress.feedback(SaveEvent::InProgress {
                goal: name.clone(),
                saved_already: saved,
            });

            match self.save_goal(&uid).await {
                Err(err) => {
                    progress.warn(&format!("Unable to save goal \"{}\": {}. Skipping it this time.", name, err));
                },
                Ok(()) => {
                    saved += 1;
                },
            }
        }

        progress.info("Save sweep ended");
        progress.feedback(SaveEvent::Finished { success: progress.is_success() });
        progress.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uuid::Uuid;

    use crate::memory_source::MemorySource;

    fn new_store() -> GoalStore<MemorySource> {
        GoalStore::new(MemorySource::new(), Uuid::new_v4())
    }

    #[tokio::test]
    async fn created_goals_get_an_identity_from_the_source() {
        let mut store = new_store();
        let uid = store.create("Run").await.unwrap();

        let goal = store.goal(&uid).unwrap();
        assert!(goal.id().is_some());
        assert_eq!(goal.sync_status(), &SyncStatus::Synced);
        assert_eq!(store.source().counters().insert, 1);
    }

    #[tokio::test]
    async fn whitespace_names_are_rejected() {
        let mut store = new_store();
        assert!(matches!(store.create("   ").await, Err(StoreError::InvalidName)));
        assert!(store.goals().is_empty());

        let uid = store.create("Run").await.unwrap();
        assert!(matches!(store.rename(&uid, "\t "), Err(StoreError::InvalidName)));
        assert_eq!(store.goal(&uid).unwrap().name(), "Run");
    }

    #[tokio::test]
    async fn unchanged_renames_have_nothing_to_persist() {
        let mut store = new_store();
        let uid = store.create("Run").await.unwrap();

        assert_eq!(store.rename(&uid, "Run").unwrap(), false);
        assert_eq!(store.goal(&uid).unwrap().sync_status(), &SyncStatus::Synced);

        assert_eq!(store.rename(&uid, "Run farther").unwrap(), true);
        assert!(store.has_pending_saves());
    }

    #[tokio::test]
    async fn unknown_handles_are_reported() {
        let mut store = new_store();
        assert!(matches!(store.toggle_day("nope", chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            Err(StoreError::UnknownGoal(_))));
        assert!(matches!(store.delete("nope").await, Err(StoreError::UnknownGoal(_))));
    }
}
