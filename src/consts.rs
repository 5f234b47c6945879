//! Shared numeric constants for the trail engine.

// ── Curve ───────────────────────────────────────────────────────

/// Samples taken along the curve when approximating its bounding box.
pub const BOUNDS_SAMPLES: usize = 100;

/// Samples used for polyline length approximation.
pub const LENGTH_SAMPLES: usize = 256;

// ── Projection ──────────────────────────────────────────────────

/// Default number of evenly spaced samples for nearest-point search.
pub const DEFAULT_SAMPLE_COUNT: usize = 400;

/// Lower bound on projector sampling density.
pub const MIN_SAMPLES: usize = 2;

/// Upper bound on projector sampling density.
pub const MAX_SAMPLES: usize = 10_000;

/// Newton refinement iterations applied after the sample scan.
pub const NEWTON_ITERATIONS: usize = 8;

// ── Hit-testing ─────────────────────────────────────────────────

/// World-space pick radius for selecting or dragging an existing waypoint.
pub const DEFAULT_HIT_RADIUS: f64 = 40.0;

/// World-space distance from the path within which a tap adds a waypoint.
pub const DEFAULT_ADD_THRESHOLD: f64 = 60.0;

// ── Viewport ────────────────────────────────────────────────────

/// Default zoom ceiling.
pub const DEFAULT_MAX_SCALE: f64 = 8.0;

/// Screen-space slack, in pixels, that content may be panned past the frame.
pub const DEFAULT_PAN_SLACK: f64 = 0.0;

/// Zoom factors closer to 1.0 than this are treated as no-ops.
pub const ZOOM_EPSILON: f64 = 1e-9;

// ── Travel animation ────────────────────────────────────────────

/// Default duration of a travel-to-waypoint transition, in milliseconds.
pub const DEFAULT_ANIMATION_MS: f64 = 800.0;

/// Scale a travel transition zooms to, relative to the fit scale.
pub const DEFAULT_TRAVEL_SCALE: f64 = 2.0;

/// World distance the camera backs off along the tangent when travelling to the first waypoint.
pub const DEFAULT_FIRST_WAYPOINT_OFFSET: f64 = 80.0;
