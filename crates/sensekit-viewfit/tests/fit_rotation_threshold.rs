use sensekit_core::{Bounds, Point};
use sensekit_viewfit::{fit_bounds, Rotation};

#[test]
fn tall_narrow_floor_rotates_in_wide_viewport() {
    // width 0.1, height 0.9: the rotated fit beats the unrotated one by
    // well over the 20% threshold in an 800x300 viewport.
    let bounds = Bounds::from_corners(Point::new(0.2, 0.05), Point::new(0.3, 0.95));
    let t = fit_bounds(Some(bounds), 800.0, 300.0, 1.0);
    assert_eq!(t.rotation, Rotation::Deg90);
    assert_eq!(t.rotation.degrees(), 90);

    // The rotated content spans the full viewport width and is centered
    // vertically.
    let (left, _) = t.project(Point::new(0.2, 0.95));
    let (right, _) = t.project(Point::new(0.2, 0.05));
    assert!(left.abs() < 1e-9, "left edge at {left}");
    assert!((right - 800.0).abs() < 1e-9, "right edge at {right}");

    let (_, top) = t.project(Point::new(0.2, 0.5));
    let (_, bottom) = t.project(Point::new(0.3, 0.5));
    assert!((top - (300.0 - bottom)).abs() < 1e-9, "not centered: {top} / {bottom}");
}

#[test]
fn near_square_floor_stays_unrotated() {
    // width 0.5, height 0.55 in a near-square viewport: the rotated gain
    // is under 20%, so the layout must not flip.
    let bounds = Bounds::from_corners(Point::new(0.1, 0.2), Point::new(0.6, 0.75));
    let t = fit_bounds(Some(bounds), 700.0, 600.0, 1.0);
    assert_eq!(t.rotation, Rotation::Deg0);
    assert_eq!(t.rotation.degrees(), 0);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let bounds = Bounds::from_corners(Point::new(0.13, 0.07), Point::new(0.81, 0.66));
    let a = fit_bounds(Some(bounds), 1366.0, 768.0, 0.9);
    let b = fit_bounds(Some(bounds), 1366.0, 768.0, 0.9);
    assert_eq!(a.scale.to_bits(), b.scale.to_bits());
    assert_eq!(a.offset_x.to_bits(), b.offset_x.to_bits());
    assert_eq!(a.offset_y.to_bits(), b.offset_y.to_bits());
    assert_eq!(a.rotation, b.rotation);
}
