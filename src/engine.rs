//! Engine core: the context object that owns the trail, the viewport, the
//! waypoints and the animator, and multiplexes pointer events and frame ticks
//! onto them.
//!
//! Every handler returns the [`Action`]s the host should react to. A
//! continuous gesture (pan, zoom, drag) cancels any travel animation before it
//! touches the viewport, so within one frame either the gesture or the
//! animator writes the pose, never both.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;

use crate::animator::{CameraAnimator, CameraPose, Easing, travel_pose};
use crate::config::EngineConfig;
use crate::curve::CompositeCurve;
use crate::geom::Point;
use crate::hit::hit_test;
use crate::input::{GestureState, PointerEvent, PointerKind};
use crate::projector::CurveProjector;
use crate::viewport::Viewport;
use crate::waypoints::{Category, Waypoint, WaypointError, WaypointId, WaypointStore};

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    WaypointAdded(Waypoint),
    WaypointMoved { id: WaypointId, t: f64 },
    WaypointSelected { id: WaypointId },
    WaypointRemoved { id: WaypointId },
    TravelStarted { id: WaypointId, target: CameraPose },
    TravelFinished { id: WaypointId },
    ViewportChanged { scale: f64, pan: Point },
    RenderNeeded,
}

/// Per-waypoint render data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSnapshot {
    pub id: WaypointId,
    pub t: f64,
    pub label: String,
    pub category: Category,
    /// Position on the trail in world space.
    pub world: Point,
    /// Position on screen under the current viewport.
    pub screen: Point,
    /// Direction of travel at the marker, in radians.
    pub heading: f64,
}

/// Read-only view of everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub scale: f64,
    pub pan: Point,
    pub waypoints: Vec<MarkerSnapshot>,
    pub animating: bool,
    pub selected: Option<WaypointId>,
}

/// Trail engine state. Owned by the host screen and driven from its single
/// interaction thread.
#[derive(Debug, Clone)]
pub struct EngineCore {
    curve: CompositeCurve,
    projector: CurveProjector,
    viewport: Viewport,
    store: WaypointStore,
    animator: CameraAnimator,
    gesture: GestureState,
    config: EngineConfig,
    selected: Option<WaypointId>,
    travel_target: Option<WaypointId>,
}

impl EngineCore {
    /// Frame `curve` in a viewport of `viewport_size` screen pixels.
    #[must_use]
    pub fn new(curve: CompositeCurve, viewport_size: Point, config: EngineConfig) -> Self {
        let viewport = Viewport::new(
            curve.bounding_box(),
            viewport_size,
            config.min_scale,
            config.max_scale,
            config.pan_slack,
        );
        tracing::info!(
            segments = curve.segment_count(),
            width = viewport_size.x,
            height = viewport_size.y,
            scale = viewport.scale(),
            "trail engine ready"
        );
        Self {
            projector: config.projector(),
            curve,
            viewport,
            store: WaypointStore::new(),
            animator: CameraAnimator::new(),
            gesture: GestureState::Idle,
            config,
            selected: None,
            travel_target: None,
        }
    }

    // --- Data inputs ---

    /// Hydrate the store from initial data, replacing anything present.
    pub fn load_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        tracing::debug!(count = waypoints.len(), "waypoints loaded");
        self.store.load(waypoints);
        self.selected = None;
        self.gesture = GestureState::Idle;
        self.stop_travel();
    }

    /// Add a waypoint programmatically.
    pub fn add_waypoint(&mut self, t: f64, label: impl Into<String>, category: Category) -> Vec<Action> {
        let waypoint = self.store.add(t, label, category);
        tracing::debug!(id = %waypoint.id, t = waypoint.t, "waypoint added");
        vec![Action::WaypointAdded(waypoint), Action::RenderNeeded]
    }

    /// Move a waypoint to parameter `t` (clamped).
    pub fn move_waypoint(&mut self, id: &WaypointId, t: f64) -> Result<Vec<Action>, WaypointError> {
        self.store.move_to(id, t)?;
        let t = self.store.get(id).map_or(t, |w| w.t);
        tracing::debug!(%id, t, "waypoint moved");
        Ok(vec![Action::WaypointMoved { id: *id, t }, Action::RenderNeeded])
    }

    /// Remove a waypoint, dropping any selection, drag or travel tied to it.
    pub fn remove_waypoint(&mut self, id: &WaypointId) -> Result<Vec<Action>, WaypointError> {
        self.store.remove(id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.gesture.dragged_waypoint().as_ref() == Some(id) {
            self.gesture = GestureState::Idle;
        }
        if self.travel_target.as_ref() == Some(id) {
            self.stop_travel();
        }
        tracing::debug!(%id, "waypoint removed");
        Ok(vec![Action::WaypointRemoved { id: *id }, Action::RenderNeeded])
    }

    /// Replace the trail and re-fit the viewport to it. Waypoints keep their
    /// parameters; any gesture or travel in progress is dropped.
    pub fn set_curve(&mut self, curve: CompositeCurve) -> Vec<Action> {
        self.curve = curve;
        self.viewport.set_content(self.curve.bounding_box(), self.config.min_scale);
        self.gesture = GestureState::Idle;
        self.stop_travel();
        tracing::debug!(segments = self.curve.segment_count(), "trail replaced");
        vec![self.viewport_changed(), Action::RenderNeeded]
    }

    /// Resize the viewport, keeping the world point at its centre fixed.
    pub fn set_viewport_size(&mut self, size: Point) -> Vec<Action> {
        self.viewport.set_size(size, self.config.min_scale);
        tracing::debug!(width = size.x, height = size.y, scale = self.viewport.scale(), "viewport resized");
        vec![self.viewport_changed(), Action::RenderNeeded]
    }

    // --- Input ---

    /// Route one pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<Action> {
        let finishes_drag = event.kind == PointerKind::DragEnd
            && matches!(self.gesture, GestureState::Panning { .. } | GestureState::DraggingWaypoint { .. });
        if (event.kind.interrupts_animation() || finishes_drag) && self.animator.is_animating() {
            tracing::debug!(kind = ?event.kind, "travel interrupted by gesture");
            self.stop_travel();
        }
        let mut actions = Vec::new();
        match event.kind {
            PointerKind::Pan => {
                self.gesture = GestureState::Idle;
                self.pan_by(event.delta, &mut actions);
            }
            PointerKind::Zoom => {
                self.gesture = GestureState::Zooming;
                if self.viewport.apply_zoom(event.zoom_factor, event.screen) {
                    actions.push(self.viewport_changed());
                }
            }
            PointerKind::Tap => {
                self.gesture = GestureState::Idle;
                self.on_tap(event.screen, event.timestamp_ms, &mut actions);
            }
            PointerKind::DragStart => self.on_drag_start(event.screen),
            PointerKind::DragMove => self.on_drag_move(event.screen, &mut actions),
            PointerKind::DragEnd => {
                self.on_drag_move(event.screen, &mut actions);
                self.gesture = GestureState::Idle;
            }
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Advance the travel animation to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let Some(outcome) = self.animator.tick(now_ms, &mut self.viewport) else {
            return Vec::new();
        };
        tracing::trace!(now_ms, eased = outcome.eased, "travel tick");
        let mut actions = vec![self.viewport_changed()];
        if outcome.finished {
            if let Some(id) = self.travel_target.take() {
                tracing::info!(%id, "travel finished");
                actions.push(Action::TravelFinished { id });
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Start travelling to waypoint `id`, replacing any travel in progress.
    pub fn travel_to(&mut self, id: &WaypointId, now_ms: f64) -> Result<Vec<Action>, WaypointError> {
        let target = travel_pose(&self.curve, &self.store, id, &self.viewport, self.config.framing())
            .ok_or(WaypointError::NotFound(*id))?;
        self.animator.start(&self.viewport, target, now_ms, self.config.animation_duration_ms, Easing::EaseInOutCubic);
        self.travel_target = Some(*id);
        self.selected = Some(*id);
        tracing::debug!(%id, scale = target.scale, duration_ms = self.config.animation_duration_ms, "travel started");
        Ok(vec![Action::TravelStarted { id: *id, target }, Action::RenderNeeded])
    }

    // --- Queries ---

    #[must_use]
    pub fn curve(&self) -> &CompositeCurve {
        &self.curve
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn waypoints(&self) -> &WaypointStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub fn animator(&self) -> &CameraAnimator {
        &self.animator
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// The currently selected waypoint, if any.
    #[must_use]
    pub fn selection(&self) -> Option<WaypointId> {
        self.selected
    }

    /// Waypoint the running travel animation is heading to.
    #[must_use]
    pub fn travel_target(&self) -> Option<WaypointId> {
        self.travel_target
    }

    /// Render data for the current frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        let waypoints = self
            .store
            .all()
            .iter()
            .map(|w| {
                let world = self.curve.point_at(w.t);
                MarkerSnapshot {
                    id: w.id,
                    t: w.t,
                    label: w.label.clone(),
                    category: w.category,
                    world,
                    screen: self.viewport.world_to_screen(world),
                    heading: self.curve.heading_at(w.t),
                }
            })
            .collect();
        FrameSnapshot {
            scale: self.viewport.scale(),
            pan: self.viewport.pan(),
            waypoints,
            animating: self.animator.is_animating(),
            selected: self.selected,
        }
    }

    // --- Gesture handling ---

    fn on_tap(&mut self, screen: Point, now_ms: f64, actions: &mut Vec<Action>) {
        if self.curve.is_empty() {
            tracing::debug!("tap ignored: no trail");
            return;
        }
        let world = self.viewport.screen_to_world(screen);
        if let Some(hit) = hit_test(world, &self.curve, &self.store, self.config.hit_radius) {
            let id = hit.waypoint_id;
            self.selected = Some(id);
            tracing::debug!(%id, distance = hit.distance, "waypoint selected");
            actions.push(Action::WaypointSelected { id });
            if self.config.travel_on_select {
                match self.travel_to(&id, now_ms) {
                    Ok(travel) => actions.extend(travel.into_iter().filter(|a| *a != Action::RenderNeeded)),
                    Err(err) => tracing::debug!(%err, "travel skipped"),
                }
            }
            return;
        }
        let projection = self.projector.project(&self.curve, world);
        if !projection.is_within(self.config.add_threshold) {
            tracing::debug!(distance = projection.distance, "tap missed trail");
            return;
        }
        let label = format!("Waypoint {}", self.store.len() + 1);
        let waypoint = self.store.add(projection.t, label, Category::default());
        tracing::debug!(id = %waypoint.id, t = waypoint.t, "waypoint added");
        actions.push(Action::WaypointAdded(waypoint));
    }

    fn on_drag_start(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        self.gesture = match hit_test(world, &self.curve, &self.store, self.config.hit_radius) {
            Some(hit) => {
                let orig_t = self.store.get(&hit.waypoint_id).map_or(0.0, |w| w.t);
                tracing::debug!(id = %hit.waypoint_id, orig_t, "waypoint drag started");
                GestureState::DraggingWaypoint { id: hit.waypoint_id, orig_t }
            }
            None => GestureState::Panning { last_screen: screen },
        };
    }

    fn on_drag_move(&mut self, screen: Point, actions: &mut Vec<Action>) {
        match self.gesture {
            GestureState::DraggingWaypoint { id, .. } => self.drag_waypoint(id, screen, actions),
            GestureState::Panning { last_screen } => {
                self.gesture = GestureState::Panning { last_screen: screen };
                self.pan_by(screen - last_screen, actions);
            }
            GestureState::Idle | GestureState::Zooming => {
                tracing::debug!("drag ignored: no drag start");
            }
        }
    }

    fn drag_waypoint(&mut self, id: WaypointId, screen: Point, actions: &mut Vec<Action>) {
        if self.curve.is_empty() {
            return;
        }
        let world = self.viewport.screen_to_world(screen);
        let projection = self.projector.project(&self.curve, world);
        match self.store.move_to(&id, projection.t) {
            Ok(()) => {
                tracing::debug!(%id, t = projection.t, "waypoint dragged");
                actions.push(Action::WaypointMoved { id, t: projection.t });
            }
            Err(err) => {
                tracing::debug!(%err, "drag target vanished");
                self.gesture = GestureState::Idle;
            }
        }
    }

    fn pan_by(&mut self, delta: Point, actions: &mut Vec<Action>) {
        if self.viewport.apply_pan(delta) {
            actions.push(self.viewport_changed());
        }
    }

    fn stop_travel(&mut self) {
        self.animator.cancel();
        self.travel_target = None;
    }

    fn viewport_changed(&self) -> Action {
        Action::ViewportChanged { scale: self.viewport.scale(), pan: self.viewport.pan() }
    }
}
