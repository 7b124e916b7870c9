use sensekit_core::{Bounds, Point};
use sensekit_viewfit::fit_bounds;

#[test]
fn fill_factor_leaves_symmetric_margin() {
    let bounds = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    let exact = fit_bounds(Some(bounds), 800.0, 600.0, 1.0);
    let padded = fit_bounds(Some(bounds), 800.0, 600.0, 0.9);

    assert!((padded.scale - exact.scale * 0.9).abs() < 1e-9);

    // Content still centered: margins equal on opposite edges.
    let (x0, y0) = padded.project(Point::new(0.0, 0.0));
    let (x1, y1) = padded.project(Point::new(1.0, 1.0));
    assert!((x0 - (800.0 - x1)).abs() < 1e-9);
    assert!((y0 - (600.0 - y1)).abs() < 1e-9);
    assert!(x0 > 0.0 && y0 > 0.0);
}
