use std::error::Error;

use async_trait::async_trait;

use crate::goal::{GoalId, GoalRecord, StoredGoal, UserId};

/// A place where goals are durably stored, usually a hosted record store
/// (see [`Client`](crate::client::Client)), or an in-memory one for tests
/// (see [`MemorySource`](crate::memory_source::MemorySource)).
///
/// Writes are full-state snapshots, never diffs. There is no version checking either:
/// the last write wins.
#[async_trait]
pub trait RecordSource {
    /// Returns every goal of this owner, ordered by creation time ascending
    async fn list(&self, owner: UserId) -> Result<Vec<StoredGoal>, Box<dyn Error + Send + Sync>>;
    /// Stores a brand new goal, and returns it along with its store-assigned identity
    async fn insert(&mut self, record: GoalRecord) -> Result<StoredGoal, Box<dyn Error + Send + Sync>>;
    /// Overwrites the whole state of an existing goal
    async fn update(&mut self, id: GoalId, record: GoalRecord) -> Result<(), Box<dyn Error + Send + Sync>>;
    /// Removes a goal for good
    async fn delete(&mut self, id: GoalId) -> Result<(), Box<dyn Error + Send + Sync>>;
}
