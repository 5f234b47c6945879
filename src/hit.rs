#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::curve::CompositeCurve;
use crate::geom::Point;
use crate::waypoints::{WaypointId, WaypointStore};

/// Result of a waypoint hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub waypoint_id: WaypointId,
    /// World distance from the query point to the waypoint's position on the curve.
    pub distance: f64,
}

/// Find the waypoint whose curve position is nearest `world_pt`, within `radius`.
///
/// Ties go to the waypoint inserted first. Nothing is hit on an empty curve.
#[must_use]
pub fn hit_test(world_pt: Point, curve: &CompositeCurve, store: &WaypointStore, radius: f64) -> Option<Hit> {
    if curve.is_empty() {
        return None;
    }
    let mut best: Option<Hit> = None;
    for waypoint in store.all() {
        let distance = curve.point_at(waypoint.t).distance(world_pt);
        if distance > radius {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Hit { waypoint_id: waypoint.id, distance });
        }
    }
    best
}
