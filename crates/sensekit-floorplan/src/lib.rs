//! # SenseKit Floor Plan
//!
//! The in-memory edit store behind the dashboard's floor plan editor.
//! It holds one [`FloorPlan`] document at a time, applies edit operations
//! as atomic state transitions, keeps a capped undo/redo history, and
//! drives a debounced auto-save pipeline against an injected storage
//! collaborator.
//!
//! ## Architecture
//!
//! ```text
//! EditorState (operations, history, dirty tracking)
//!   ├── FloorPlan model (floors, elements, placed sensors)
//!   ├── AutoSave (debounce state machine, injectable clock)
//!   ├── PlanStore (storage collaborator: memory or JSON files)
//!   └── EventBus<PlanEvent> (injected observer bus)
//!
//! hit_test (pointer lookup against floor geometry)
//! serialization (JSON documents + legacy single-floor migration)
//! ```
//!
//! View fitting lives in `sensekit-viewfit`; this crate only produces the
//! geometry (`Floor::bounds`) that the fit engine consumes.

pub mod autosave;
pub mod editor_state;
pub mod error;
pub mod events;
pub mod model;
pub mod serialization;
pub mod storage;

pub use autosave::{AutoSaveStatus, Clock, ManualClock, SystemClock};
pub use editor_state::{EditorState, Selection, Tool};
pub use error::StorageError;
pub use events::PlanEvent;
pub use model::{
    Element, ElementKind, ElementStyle, ElementUpdate, Floor, FloorPlan, PlacedSensor,
    StyleUpdate, ViewSettings,
};
pub use storage::{FileStore, MemoryStore, PlanStore};
