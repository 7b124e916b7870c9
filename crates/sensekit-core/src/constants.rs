//! Constants shared across the floor plan crates.

/// Aspect-ratio correction applied to the X axis of normalized floor
/// coordinates. Floor plans are authored on a 4:3 logical canvas
/// regardless of the on-screen pixel aspect.
pub const CANVAS_ASPECT: f64 = 800.0 / 600.0;

/// Normalized distance threshold for line/freehand hit-testing
/// (2% of the unit drawing space).
pub const HIT_TOLERANCE: f64 = 0.02;

/// Maximum number of retained undo/redo snapshots. Oldest entries are
/// evicted first.
pub const HISTORY_LIMIT: usize = 50;

/// Quiet period after the last edit before a dirty plan is auto-saved.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 2_000;

/// A rotated layout is only chosen when it beats the unrotated fit by
/// this factor. Prevents flip-flopping on marginal gains.
pub const ROTATION_GAIN_THRESHOLD: f64 = 1.2;

/// Name of the floor synthesized when loading a legacy single-floor
/// document.
pub const DEFAULT_FLOOR_NAME: &str = "Ground Floor";
