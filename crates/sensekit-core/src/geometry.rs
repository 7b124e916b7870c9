//! Geometry primitives for normalized floor coordinates.
//!
//! All points live in the unit square `[0,1] x [0,1]`; pixel mapping is
//! the view-fit engine's job.

use serde::{Deserialize, Serialize};

/// A 2D point in normalized floor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// The full unit square, used when a floor has no geometry.
    pub const UNIT: Bounds = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1.0,
        max_y: 1.0,
    };

    /// Builds a box from two opposite corners, order-independent.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Accumulates a bounding box over a point set. `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for p in points {
            match &mut bounds {
                Some(b) => b.expand(p),
                None => {
                    bounds = Some(Bounds {
                        min_x: p.x,
                        min_y: p.y,
                        max_x: p.x,
                        max_y: p.y,
                    })
                }
            }
        }
        bounds
    }

    /// Grows the box to include `p`.
    pub fn expand(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Distance from `p` to the segment `a`-`b`: the point is projected onto
/// the segment, the projection clamped to the endpoints, and the
/// Euclidean distance to the closest point returned.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    p.distance_to(&closest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_order_independent() {
        let a = Bounds::from_corners(Point::new(0.8, 0.1), Point::new(0.2, 0.6));
        let b = Bounds::from_corners(Point::new(0.2, 0.6), Point::new(0.8, 0.1));
        assert_eq!(a, b);
        assert!(a.contains(Point::new(0.5, 0.3)));
        assert!(!a.contains(Point::new(0.1, 0.3)));
    }

    #[test]
    fn bounds_from_empty_point_set_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn bounds_accumulate_over_points() {
        let b = Bounds::from_points([
            Point::new(0.3, 0.7),
            Point::new(0.1, 0.9),
            Point::new(0.5, 0.2),
        ])
        .unwrap();
        assert_eq!(b.min_x, 0.1);
        assert_eq!(b.max_x, 0.5);
        assert_eq!(b.min_y, 0.2);
        assert_eq!(b.max_y, 0.9);
    }

    #[test]
    fn segment_distance_projects_and_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        // Perpendicular projection inside the segment.
        assert!((point_segment_distance(Point::new(0.5, 0.3), a, b) - 0.3).abs() < 1e-12);
        // Beyond an endpoint: distance to the endpoint itself.
        assert!((point_segment_distance(Point::new(1.4, 0.3), a, b) - 0.5).abs() < 1e-12);
        // Degenerate zero-length segment.
        assert!((point_segment_distance(Point::new(0.0, 0.2), a, a) - 0.2).abs() < 1e-12);
    }
}
