//! Viewport state for view-fit consumers.
//!
//! Remembers the pixel size and the last fitted bounds so the transform
//! can be recomputed on resize without the caller re-deriving geometry.

use std::fmt;

use sensekit_core::{Bounds, Point};

use crate::transform::{fit_bounds, ViewTransform};

/// A pixel viewport holding the current fitted transform.
#[derive(Debug, Clone)]
pub struct Viewport {
    width: f64,
    height: f64,
    fill: f64,
    bounds: Option<Bounds>,
    transform: ViewTransform,
}

impl Viewport {
    /// Creates a viewport with an exact fit (no margin).
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_fill(width, height, 1.0)
    }

    /// Creates a viewport that reserves a margin, e.g. `0.9` keeps 5%
    /// of each dimension free around the content.
    pub fn with_fill(width: f64, height: f64, fill: f64) -> Self {
        let transform = fit_bounds(None, width, height, fill);
        Self {
            width,
            height,
            fill,
            bounds: None,
            transform,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The current transform. Recomputed by [`fit`](Self::fit) and
    /// [`resize`](Self::resize).
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Refits the viewport to new floor bounds (`None` for an empty
    /// floor).
    pub fn fit(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
        self.transform = fit_bounds(bounds, self.width, self.height, self.fill);
    }

    /// Updates the pixel size (window resize) and refits the last bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.transform = fit_bounds(self.bounds, width, height, self.fill);
    }

    /// Maps a floor point to viewport pixels.
    pub fn floor_to_screen(&self, p: Point) -> (f64, f64) {
        self.transform.project(p)
    }

    /// Maps viewport pixels (pointer events) back to floor coordinates.
    pub fn screen_to_floor(&self, x: f64, y: f64) -> Point {
        self.transform.unproject(x, y)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} | scale {:.2} | rot {}",
            self.width,
            self.height,
            self.transform.scale,
            self.transform.rotation.degrees()
        )
    }
}
