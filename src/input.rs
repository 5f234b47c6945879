//! Input model: raw pointer events from the host and the gesture state machine.
//!
//! The host collapses touch and mouse input into [`PointerEvent`]s. Continuous
//! gestures (pan, pinch-zoom, drag) are tracked by [`GestureState`] between a
//! start and an end event so the engine can compute deltas and know which
//! waypoint, if any, a drag is carrying.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::waypoints::WaypointId;

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// Continuous drag-to-pan by `delta` screen pixels.
    Pan,
    /// Pinch or wheel zoom by `zoom_factor` around `screen`.
    Zoom,
    /// Single tap / click at `screen`.
    Tap,
    /// Pointer pressed and dragging began at `screen`.
    DragStart,
    /// Pointer moved to `screen` while dragging.
    DragMove,
    /// Pointer released at `screen`.
    DragEnd,
}

impl PointerKind {
    /// Whether this event starts or continues a gesture that takes the
    /// viewport away from a running animation.
    #[must_use]
    pub fn interrupts_animation(self) -> bool {
        matches!(self, Self::Pan | Self::Zoom | Self::DragStart | Self::DragMove)
    }
}

/// One pointer event in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Pointer position (CSS pixels); the focal point for zoom.
    pub screen: Point,
    /// Pan delta in screen pixels. Zero for non-pan events.
    #[serde(default)]
    pub delta: Point,
    /// Incremental zoom factor. 1.0 for non-zoom events.
    #[serde(default = "unit_factor")]
    pub zoom_factor: f64,
    /// Host timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: f64,
}

fn unit_factor() -> f64 {
    1.0
}

impl PointerEvent {
    fn at(kind: PointerKind, screen: Point, timestamp_ms: f64) -> Self {
        Self { kind, screen, delta: Point::ZERO, zoom_factor: 1.0, timestamp_ms }
    }

    #[must_use]
    pub fn pan(screen: Point, delta: Point, timestamp_ms: f64) -> Self {
        Self { delta, ..Self::at(PointerKind::Pan, screen, timestamp_ms) }
    }

    #[must_use]
    pub fn zoom(focal: Point, zoom_factor: f64, timestamp_ms: f64) -> Self {
        Self { zoom_factor, ..Self::at(PointerKind::Zoom, focal, timestamp_ms) }
    }

    #[must_use]
    pub fn tap(screen: Point, timestamp_ms: f64) -> Self {
        Self::at(PointerKind::Tap, screen, timestamp_ms)
    }

    #[must_use]
    pub fn drag_start(screen: Point, timestamp_ms: f64) -> Self {
        Self::at(PointerKind::DragStart, screen, timestamp_ms)
    }

    #[must_use]
    pub fn drag_move(screen: Point, timestamp_ms: f64) -> Self {
        Self::at(PointerKind::DragMove, screen, timestamp_ms)
    }

    #[must_use]
    pub fn drag_end(screen: Point, timestamp_ms: f64) -> Self {
        Self::at(PointerKind::DragEnd, screen, timestamp_ms)
    }
}

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging empty space to pan. Opened only by a drag start; pan events
    /// carry their own delta and leave the gesture idle.
    Panning {
        /// Screen position of the previous pointer event, used for drag deltas.
        last_screen: Point,
    },
    /// Pinch / wheel zoom in progress.
    Zooming,
    /// Carrying an existing waypoint along the curve.
    DraggingWaypoint {
        /// Waypoint being dragged.
        id: WaypointId,
        /// Parameter at drag start, for hosts that want to revert.
        orig_t: f64,
    },
}

impl GestureState {
    /// Whether a continuous gesture currently owns the viewport or a waypoint.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Waypoint being dragged, if any.
    #[must_use]
    pub fn dragged_waypoint(&self) -> Option<WaypointId> {
        match self {
            Self::DraggingWaypoint { id, .. } => Some(*id),
            _ => None,
        }
    }
}
