//! Events emitted by the edit store.
//!
//! Published on the [`EventBus`](sensekit_core::EventBus) injected into
//! the store, so independent stores never cross-talk and tests can
//! observe transitions without polling.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::autosave::AutoSaveStatus;

/// Lifecycle notifications from an [`EditorState`](crate::EditorState).
#[derive(Debug, Clone)]
pub enum PlanEvent {
    /// The auto-save state machine changed state.
    AutoSaveStatus(AutoSaveStatus),
    /// An auto-save cycle failed; the dirty flag is kept for retry.
    AutoSaveFailed { message: String },
    /// The plan was persisted (manually or by auto-save).
    PlanSaved { id: Uuid, at: DateTime<Utc> },
    /// A plan was loaded from storage, replacing the in-memory state.
    PlanLoaded { id: Uuid },
    FloorAdded { id: Uuid },
    FloorRemoved { id: Uuid },
    /// A `remove_floor` call was rejected because it would have removed
    /// the last floor.
    FloorRemoveRejected { id: Uuid },
}
