//! # SenseKit Core
//!
//! Shared foundations for the SenseKit floor plan crates: normalized
//! geometry primitives, the constants that keep editor, viewer, and kiosk
//! layouts pixel-identical, and a small in-process event bus for store
//! observers.

pub mod constants;
pub mod event_bus;
pub mod geometry;

pub use event_bus::{EventBus, SubscriptionId};
pub use geometry::{point_segment_distance, Bounds, Point};
