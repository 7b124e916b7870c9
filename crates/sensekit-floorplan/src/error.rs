//! Error types for floor plan persistence.
//!
//! Edit operations never error (structurally impossible edits are
//! rejected with a `bool`/`Option` result); only the calls that talk to
//! the storage collaborator can fail.

use thiserror::Error;
use uuid::Uuid;

/// Errors from a [`PlanStore`](crate::storage::PlanStore) collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The requested plan does not exist.
    #[error("floor plan {id} not found")]
    NotFound {
        /// Id of the missing plan.
        id: Uuid,
    },

    /// Underlying I/O failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be (de)serialized.
    #[error("malformed floor plan document: {0}")]
    Malformed(#[from] serde_json::Error),
}
