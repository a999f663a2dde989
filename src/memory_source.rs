//! An in-memory record source, used by integration tests and offline runs

use std::error::Error;
use std::sync::Mutex;
#[cfg(feature = "memory_mocks_remote_store")]
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::goal::{GoalId, GoalRecord, StoredGoal, UserId};
#[cfg(feature = "memory_mocks_remote_store")]
use crate::mock_behaviour::MockBehaviour;
use crate::traits::RecordSource;

/// How many times each operation ran (successfully or not), so that tests can assert e.g.
/// that an unchanged rename performs no call at all
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationCounters {
    pub list: u32,
    pub insert: u32,
    pub update: u32,
    pub delete: u32,
}

/// A [`RecordSource`] that holds everything in memory.
///
/// Rows are kept in insertion order, which is also creation-time order: listing honours the
/// same "ordered by creation time ascending" contract as the hosted store
#[derive(Default)]
pub struct MemorySource {
    rows: Vec<StoredGoal>,
    counters: Mutex<OperationCounters>,

    #[cfg(feature = "memory_mocks_remote_store")]
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tweak the behaviour of this source, so that it returns errors on some tests
    #[cfg(feature = "memory_mocks_remote_store")]
    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    pub fn counters(&self) -> OperationCounters {
        *self.counters.lock().unwrap()
    }

    /// The raw stored rows, in insertion order
    pub fn rows(&self) -> &[StoredGoal] {
        &self.rows
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn list(&self, owner: UserId) -> Result<Vec<StoredGoal>, Box<dyn Error + Send + Sync>> {
        self.counters.lock().unwrap().list += 1;
        #[cfg(feature = "memory_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_list()?;
        }

        Ok(self.rows
            .iter()
            .filter(|row| row.record.user_id == owner)
            .cloned()
            .collect())
    }

    async fn insert(&mut self, record: GoalRecord) -> Result<StoredGoal, Box<dyn Error + Send + Sync>> {
        self.counters.lock().unwrap().insert += 1;
        #[cfg(feature = "memory_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_insert()?;
        }

        let stored = StoredGoal {
            id: Uuid::new_v4(),
            created_at: Some(Utc::now()),
            record,
        };
        self.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&mut self, id: GoalId, record: GoalRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.counters.lock().unwrap().update += 1;
        #[cfg(feature = "memory_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_update()?;
        }

        match self.rows.iter_mut().find(|row| row.id == id) {
            None => Err(format!("No stored goal with id {}", id).into()),
            Some(row) => {
                row.record = record;
                Ok(())
            },
        }
    }

    async fn delete(&mut self, id: GoalId) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.counters.lock().unwrap().delete += 1;
        #[cfg(feature = "memory_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_delete()?;
        }

        match self.rows.iter().position(|row| row.id == id) {
            None => Err(format!("No stored goal with id {}", id).into()),
            Some(index) => {
                self.rows.remove(index);
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::day_log::DayLog;

    fn some_record(owner: UserId, name: &str) -> GoalRecord {
        GoalRecord {
            user_id: owner,
            name: name.to_string(),
            days: DayLog::new(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn rows_are_listed_per_owner_in_insertion_order() {
        let mut source = MemorySource::new();
        let owner = Uuid::new_v4();
        let other_owner = Uuid::new_v4();

        source.insert(some_record(owner, "Run")).await.unwrap();
        source.insert(some_record(other_owner, "Their goal")).await.unwrap();
        source.insert(some_record(owner, "Read")).await.unwrap();

        let listed = source.list(owner).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].record.name, "Run");
        assert_eq!(listed[1].record.name, "Read");
    }

    #[tokio::test]
    async fn operations_on_unknown_ids_fail() {
        let mut source = MemorySource::new();
        let owner = Uuid::new_v4();
        let ghost = Uuid::new_v4();

        assert!(source.update(ghost, some_record(owner, "Run")).await.is_err());
        assert!(source.delete(ghost).await.is_err());

        let counters = source.counters();
        assert_eq!(counters.update, 1);
        assert_eq!(counters.delete, 1);
        assert_eq!(counters.insert, 0);
    }
}
