//! Waypoint model and the in-memory store that owns every waypoint.
//!
//! Waypoints are anchored to the trail by their curve parameter `t`, never by
//! a world position, so they stay on the path however the view moves. Other
//! layers refer to a waypoint by its [`WaypointId`] only; iteration order is
//! insertion order and carries no meaning, while [`WaypointStore::by_t`]
//! gives the order along the trail.

#[cfg(test)]
#[path = "waypoints_test.rs"]
mod waypoints_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, stable identifier for a waypoint.
pub type WaypointId = Uuid;

/// What a waypoint marks along the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Ordinary progress checkpoint.
    #[default]
    Checkpoint,
    /// Significant goal reached.
    Milestone,
    /// Reward or unlock.
    Reward,
    /// Free-form user note.
    Note,
}

/// A labelled point of interest anchored at parameter `t` on the trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Unique identifier for this waypoint.
    pub id: WaypointId,
    /// Normalized position along the whole composite curve, in `[0, 1]`.
    pub t: f64,
    /// Display label.
    pub label: String,
    /// Kind of waypoint.
    #[serde(default)]
    pub category: Category,
    /// Opaque host data carried alongside the waypoint.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Waypoint {
    /// New waypoint with a fresh id and no metadata. `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(t: f64, label: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            t: clamp_t(t),
            label: label.into(),
            category,
            metadata: serde_json::Value::Null,
        }
    }
}

/// Error returned by store operations that address a waypoint by id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaypointError {
    /// No waypoint with this id exists (it may have been removed concurrently
    /// with a stale UI reference).
    #[error("waypoint not found: {0}")]
    NotFound(WaypointId),
}

/// Ordered collection of waypoints. Single writer: mutated only from the
/// interaction thread, so no internal locking.
#[derive(Debug, Clone, Default)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { waypoints: Vec::new() }
    }

    /// Create a waypoint with a fresh id at `t` (clamped) and append it.
    pub fn add(&mut self, t: f64, label: impl Into<String>, category: Category) -> Waypoint {
        let waypoint = Waypoint::new(t, label, category);
        self.waypoints.push(waypoint.clone());
        waypoint
    }

    /// Insert a fully formed waypoint (initial data). An existing waypoint
    /// with the same id is replaced in place.
    pub fn insert(&mut self, mut waypoint: Waypoint) {
        waypoint.t = clamp_t(waypoint.t);
        match self.position(&waypoint.id) {
            Some(index) => self.waypoints[index] = waypoint,
            None => self.waypoints.push(waypoint),
        }
    }

    /// Replace all waypoints with `waypoints`.
    pub fn load(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints.clear();
        for waypoint in waypoints {
            self.insert(waypoint);
        }
    }

    /// Update only the curve parameter of `id`. `new_t` is clamped to `[0, 1]`.
    pub fn move_to(&mut self, id: &WaypointId, new_t: f64) -> Result<(), WaypointError> {
        let index = self.position(id).ok_or(WaypointError::NotFound(*id))?;
        self.waypoints[index].t = clamp_t(new_t);
        Ok(())
    }

    /// Remove `id`, returning the removed waypoint.
    pub fn remove(&mut self, id: &WaypointId) -> Result<Waypoint, WaypointError> {
        let index = self.position(id).ok_or(WaypointError::NotFound(*id))?;
        Ok(self.waypoints.remove(index))
    }

    /// Look up a waypoint by id.
    #[must_use]
    pub fn get(&self, id: &WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == *id)
    }

    /// All waypoints in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// All waypoints ordered along the trail by `t`; ties keep insertion order.
    #[must_use]
    pub fn by_t(&self) -> Vec<&Waypoint> {
        let mut sorted: Vec<&Waypoint> = self.waypoints.iter().collect();
        sorted.sort_by(|a, b| a.t.total_cmp(&b.t));
        sorted
    }

    /// The waypoint immediately before `id` along the trail, if any.
    ///
    /// `None` both when `id` is first and when `id` is unknown.
    #[must_use]
    pub fn previous_of(&self, id: &WaypointId) -> Option<&Waypoint> {
        let sorted = self.by_t();
        let index = sorted.iter().position(|w| w.id == *id)?;
        index.checked_sub(1).map(|prev| sorted[prev])
    }

    /// Remove every waypoint.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Number of waypoints currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns `true` if the store contains no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    fn position(&self, id: &WaypointId) -> Option<usize> {
        self.waypoints.iter().position(|w| w.id == *id)
    }
}

fn clamp_t(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}
