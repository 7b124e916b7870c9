//! View-fit transform computation and coordinate mapping.
//!
//! Floor geometry is authored in normalized `[0,1]` coordinates on a 4:3
//! logical canvas; the X extent is therefore corrected by
//! [`CANVAS_ASPECT`] before fitting. A 90-degree rotation is chosen only
//! when it improves the fitted scale by at least
//! [`ROTATION_GAIN_THRESHOLD`].

use serde::Serialize;

use sensekit_core::constants::{CANVAS_ASPECT, ROTATION_GAIN_THRESHOLD};
use sensekit_core::{Bounds, Point};

/// Layout rotation applied before scaling. Only the two axis-aligned
/// orientations are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rotation {
    Deg0,
    Deg90,
}

impl Rotation {
    /// Rotation as degrees, for consumers that render with an angle.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }
}

/// Mapping from normalized floor coordinates to viewport pixels.
///
/// Derived, never persisted: recompute whenever the floor geometry or
/// the viewport size changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation: Rotation,
}

impl ViewTransform {
    /// Maps a floor point to viewport pixels.
    pub fn project(&self, p: Point) -> (f64, f64) {
        let (rx, ry) = rotate(p, self.rotation);
        (rx * self.scale + self.offset_x, ry * self.scale + self.offset_y)
    }

    /// Inverse of [`project`](Self::project): maps viewport pixels back
    /// to floor coordinates.
    pub fn unproject(&self, screen_x: f64, screen_y: f64) -> Point {
        let rx = (screen_x - self.offset_x) / self.scale;
        let ry = (screen_y - self.offset_y) / self.scale;
        match self.rotation {
            Rotation::Deg0 => Point::new(rx / CANVAS_ASPECT, ry),
            Rotation::Deg90 => Point::new(ry / CANVAS_ASPECT, 1.0 - rx),
        }
    }
}

/// Applies the layout rotation to a normalized point, yielding
/// aspect-corrected coordinates ready for scaling.
fn rotate(p: Point, rotation: Rotation) -> (f64, f64) {
    match rotation {
        Rotation::Deg0 => (p.x * CANVAS_ASPECT, p.y),
        Rotation::Deg90 => (1.0 - p.y, p.x * CANVAS_ASPECT),
    }
}

/// Zero extents (a single point, an axis-aligned line) would divide by
/// zero; fall back to the full unit extent on that axis, like the
/// empty-floor case.
fn extent_or_unit(extent: f64) -> f64 {
    if extent > 0.0 {
        extent
    } else {
        1.0
    }
}

/// Fits floor geometry into a viewport with maximal scale, preserving
/// aspect ratio and centering the content.
///
/// `bounds` is the normalized bounding box over all element points and
/// sensor positions; `None` (an empty floor) is treated as the full unit
/// square. `fill` shrinks the fitted scale to leave a margin (e.g. `0.9`
/// keeps 5% on each side); pass `1.0` for an exact fit.
///
/// Pure and deterministic: identical inputs give bit-identical results.
pub fn fit_bounds(
    bounds: Option<Bounds>,
    viewport_width: f64,
    viewport_height: f64,
    fill: f64,
) -> ViewTransform {
    let b = bounds.unwrap_or(Bounds::UNIT);
    let width = extent_or_unit(b.width());
    let height = extent_or_unit(b.height());

    let corrected_width = width * CANVAS_ASPECT;
    let corrected_height = height;

    let scale_normal =
        (viewport_width / corrected_width).min(viewport_height / corrected_height);
    let scale_rotated =
        (viewport_width / corrected_height).min(viewport_height / corrected_width);

    let rotation = if scale_rotated > scale_normal * ROTATION_GAIN_THRESHOLD {
        Rotation::Deg90
    } else {
        Rotation::Deg0
    };

    let (eff_width, eff_height, eff_min_x, eff_min_y) = match rotation {
        Rotation::Deg0 => (
            corrected_width,
            corrected_height,
            b.min_x * CANVAS_ASPECT,
            b.min_y,
        ),
        Rotation::Deg90 => (
            corrected_height,
            corrected_width,
            1.0 - b.max_y,
            b.min_x * CANVAS_ASPECT,
        ),
    };

    let scale = (viewport_width / eff_width).min(viewport_height / eff_height) * fill;
    let offset_x = (viewport_width - eff_width * scale) / 2.0 - eff_min_x * scale;
    let offset_y = (viewport_height - eff_height * scale) / 2.0 - eff_min_y * scale;

    tracing::trace!(scale, ?rotation, "view transform fitted");

    ViewTransform {
        scale,
        offset_x,
        offset_y,
        rotation,
    }
}
