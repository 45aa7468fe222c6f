//! Shared numeric constants and scene defaults.

// ── Placement ───────────────────────────────────────────────────

/// Smallest scale multiplier a furniture item may have.
pub const MIN_SCALE: f64 = 0.1;

/// Half-range of the random horizontal offset applied to newly added items.
pub const PLACEMENT_JITTER: f64 = 0.5;

/// Fallback for a product dimension the catalog leaves blank.
pub const DEFAULT_DIMENSION: f64 = 1.0;

/// Unit label assumed when the catalog gives none.
pub const DEFAULT_DIMENSION_SKU: &str = "m";

// ── Room ────────────────────────────────────────────────────────

pub const DEFAULT_ROOM_WIDTH: f64 = 8.0;
pub const DEFAULT_ROOM_LENGTH: f64 = 8.0;
pub const DEFAULT_ROOM_HEIGHT: f64 = 3.0;
pub const DEFAULT_WALL_COLOR: &str = "#f5f5f5";
pub const DEFAULT_FLOOR_COLOR: &str = "#e0e0e0";

// ── Camera ──────────────────────────────────────────────────────

pub const DEFAULT_CAMERA_POSITION: [f64; 3] = [10.0, 10.0, 10.0];
pub const DEFAULT_CAMERA_TARGET: [f64; 3] = [4.0, 0.0, 4.0];

/// Vertical field of view in degrees.
pub const DEFAULT_VIEW_ANGLE: f64 = 50.0;

// ── Projects ────────────────────────────────────────────────────

/// Name given to a project created without one.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Design";
