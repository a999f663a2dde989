//! Tracked goals (a display name plus its per-day log)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day_log::{DayLog, DayStatus};

/// The remote identity of a goal, assigned by the record store on the first insert
pub type GoalId = Uuid;
/// The identity of the signed-in user owning the goals
pub type UserId = Uuid;

/// Describes whether a goal has been persisted already, or modified since the last time
/// it was.
///
/// There are no version tags to compare against the remote state: the record store is
/// last-write-wins, the next save simply overwrites whatever it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    /// Created locally and never inserted into the record store yet (no remote identity)
    NotSynced,
    /// The record store holds this exact state
    Synced,
    /// Persisted at some point, and modified locally since then
    LocallyModified,
}

/// A tracked habit
#[derive(Clone, Debug)]
pub struct Goal {
    /// The record-store identity. `None` until the first successful insert
    id: Option<GoalId>,

    /// Stable local handle, picked at creation time. Interaction events refer to goals by
    /// this handle, which never goes stale the way an index into the displayed list does
    uid: String,

    /// The user owning this goal
    owner: UserId,
    /// The display name. Never empty: [`crate::GoalStore`] rejects empty names
    name: String,
    /// The sparse per-day log
    days: DayLog,

    /// When the record store created the row. `None` until the first successful insert
    creation_date: Option<DateTime<Utc>>,
    /// The last time this goal was modified
    last_modified: DateTime<Utc>,
    /// The sync state of this goal
    sync_status: SyncStatus,
}

impl Goal {
    /// Create a brand new goal that is not in the record store yet.
    /// It starts with an empty day log, and will receive its remote identity on the first
    /// successful insert.
    pub fn new(name: String, owner: UserId) -> Self {
        let uid = Uuid::new_v4().to_hyphenated().to_string();
        Self {
            id: None,
            uid,
            owner,
            name,
            days: DayLog::new(),
            creation_date: None,
            last_modified: Utc::now(),
            sync_status: SyncStatus::NotSynced,
        }
    }

    /// Re-create a goal from a row the record store returned
    pub fn from_stored(stored: StoredGoal) -> Self {
        Self {
            id: Some(stored.id),
            uid: Uuid::new_v4().to_hyphenated().to_string(),
            owner: stored.record.user_id,
            name: stored.record.name,
            days: stored.record.days,
            creation_date: stored.created_at,
            last_modified: stored.record.updated_at,
            sync_status: SyncStatus::Synced,
        }
    }

    pub fn id(&self) -> Option<GoalId> { self.id }
    pub fn uid(&self) -> &str { &self.uid }
    pub fn owner(&self) -> UserId { self.owner }
    pub fn name(&self) -> &str { &self.name }
    pub fn days(&self) -> &DayLog { &self.days }
    pub fn creation_date(&self) -> Option<&DateTime<Utc>> { self.creation_date.as_ref() }
    pub fn last_modified(&self) -> &DateTime<Utc> { &self.last_modified }
    pub fn sync_status(&self) -> &SyncStatus { &self.sync_status }

    /// Snapshot this goal as the full-state record the store persists.
    /// Every save writes this wholesale, there are no diffs.
    pub fn to_record(&self) -> GoalRecord {
        GoalRecord {
            user_id: self.owner,
            name: self.name.clone(),
            days: self.days.clone(),
            updated_at: self.last_modified,
        }
    }

    /// Rename the goal. This updates its "last modified" field.
    /// Callers validate the name first, see [`crate::GoalStore::rename`]
    pub fn set_name(&mut self, new_name: String) {
        self.update_sync_status();
        self.update_last_modified();
        self.name = new_name;
    }

    /// Cycle the status of a day (see [`DayLog::toggle`]) and return the new status.
    /// This updates the "last modified" field
    pub fn toggle_day(&mut self, day: NaiveDate) -> Option<DayStatus> {
        self.update_sync_status();
        self.update_last_modified();
        self.days.toggle(day)
    }

    pub fn set_sync_status(&mut self, new_status: SyncStatus) {
        self.sync_status = new_status;
    }

    /// Adopt the identity the record store assigned on the first successful insert
    pub fn assign_identity(&mut self, id: GoalId, creation_date: Option<DateTime<Utc>>) {
        self.id = Some(id);
        self.creation_date = creation_date;
        self.sync_status = SyncStatus::Synced;
    }

    fn update_sync_status(&mut self) {
        match &self.sync_status {
            SyncStatus::NotSynced => return,
            SyncStatus::LocallyModified => return,
            SyncStatus::Synced => {
                self.sync_status = SyncStatus::LocallyModified;
            }
        }
    }

    fn update_last_modified(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Compares two goals by what the record store can observe.
    ///
    /// Local handles, timestamps and sync metadata are ignored. Mostly useful for tests
    pub fn has_same_observable_content_as(&self, other: &Goal) -> bool {
        self.owner == other.owner
            && self.name == other.name
            && self.days == other.days
    }
}

/// The full-state snapshot of a goal, as the record store persists it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub user_id: UserId,
    pub name: String,
    pub days: DayLog,
    pub updated_at: DateTime<Utc>,
}

/// A record together with the metadata the record store assigned to it
#[derive(Clone, Debug, PartialEq)]
pub struct StoredGoal {
    pub id: GoalId,
    pub created_at: Option<DateTime<Utc>>,
    pub record: GoalRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        Uuid::new_v4()
    }

    #[test]
    fn new_goals_have_no_identity() {
        let goal = Goal::new("Run".to_string(), owner());
        assert_eq!(goal.id(), None);
        assert_eq!(goal.sync_status(), &SyncStatus::NotSynced);
        assert!(goal.days().is_empty());
    }

    #[test]
    fn mutations_escalate_the_sync_status() {
        let stored = StoredGoal {
            id: Uuid::new_v4(),
            created_at: Some(Utc::now()),
            record: GoalRecord {
                user_id: owner(),
                name: "Read".to_string(),
                days: DayLog::new(),
                updated_at: Utc::now(),
            },
        };
        let mut goal = Goal::from_stored(stored);
        assert_eq!(goal.sync_status(), &SyncStatus::Synced);

        goal.set_name("Read more".to_string());
        assert_eq!(goal.sync_status(), &SyncStatus::LocallyModified);

        // A goal that was never inserted stays NotSynced through further edits
        let mut local = Goal::new("Stretch".to_string(), owner());
        local.toggle_day(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
        assert_eq!(local.sync_status(), &SyncStatus::NotSynced);
    }

    #[test]
    fn records_snapshot_the_current_state() {
        let mut goal = Goal::new("Swim".to_string(), owner());
        goal.toggle_day(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());

        let record = goal.to_record();
        assert_eq!(record.name, "Swim");
        assert_eq!(record.user_id, goal.owner());
        assert_eq!(&record.days, goal.days());
        assert_eq!(&record.updated_at, goal.last_modified());
    }
}
