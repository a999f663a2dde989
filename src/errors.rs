//! The errors a goal store can report to its user

use std::error::Error;

use thiserror::Error as ThisError;

/// What went wrong during a goal store operation.
///
/// None of these are fatal to the running session: the in-memory collection stays usable,
/// even if it has diverged from the record store. Remote variants keep the transport error
/// as their source.
#[derive(ThisError, Debug)]
pub enum StoreError {
    /// The goal list could not be fetched. The collection is left empty
    #[error("Unable to load the goal list")]
    Load(#[source] Box<dyn Error + Send + Sync>),

    /// A goal could not be persisted. It stays pending locally and will be retried by the
    /// next save
    #[error("Unable to save goal \"{name}\"")]
    Save {
        name: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// A goal could not be deleted remotely. It is kept in the local collection
    #[error("Unable to delete goal \"{name}\"")]
    Delete {
        name: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// Goal names cannot be empty or whitespace-only
    #[error("Goal names cannot be empty")]
    InvalidName,

    /// No goal in the collection carries this handle
    #[error("No goal with handle \"{0}\"")]
    UnknownGoal(String),
}
