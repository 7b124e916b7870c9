//! # SenseKit ViewFit
//!
//! Pure geometry for fitting a floor's drawing into a pixel viewport.
//! Given the floor's normalized bounding box and a viewport size, the
//! engine computes a scale, centering offsets, and an optional 90-degree
//! rotation that maximize area usage.
//!
//! Every consumer (the floor plan editor, the read-only dashboard widget,
//! the kiosk display) uses this one implementation so that identical
//! inputs produce pixel-identical layouts.

pub mod transform;
pub mod viewport;

pub use transform::{fit_bounds, Rotation, ViewTransform};
pub use viewport::Viewport;
