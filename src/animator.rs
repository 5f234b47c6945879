//! Travel animation: eases the viewport from its current pose to a target pose.
//!
//! The animator is a two-state machine, `Idle -> Animating -> Idle`. A session
//! is driven entirely by the host's frame ticks (`now_ms` timestamps); there is
//! no internal timer. Starting a new session replaces any in-flight one, and
//! [`CameraAnimator::cancel`] drops the session immediately without blending,
//! so a live gesture never has to fight an animation for the viewport.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use serde::{Deserialize, Serialize};

use crate::curve::CompositeCurve;
use crate::geom::Point;
use crate::viewport::Viewport;
use crate::waypoints::{WaypointId, WaypointStore};

/// Camera placement in world space, convertible to and from a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// World point shown at the centre of the viewport.
    pub position: Point,
    /// World point the camera is oriented towards (the focused waypoint).
    pub look_at: Point,
    /// Viewport scale.
    pub scale: f64,
}

impl CameraPose {
    /// Pose matching the viewport's current framing, looking at its centre.
    #[must_use]
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let center = viewport.center_world();
        Self { position: center, look_at: center, scale: viewport.scale() }
    }

    /// Write this pose into `viewport`; limits and pan bounds still apply.
    pub fn apply_to(&self, viewport: &mut Viewport) {
        viewport.center_on(self.position, self.scale);
    }

    /// Component-wise interpolation.
    #[must_use]
    pub fn lerp(&self, other: &Self, alpha: f64) -> Self {
        Self {
            position: self.position.lerp(other.position, alpha),
            look_at: self.look_at.lerp(other.look_at, alpha),
            scale: self.scale + (other.scale - self.scale) * alpha,
        }
    }
}

/// Easing curve mapping linear progress to eased progress, with `f(0) = 0`, `f(1) = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutCubic => ease_in_out_cubic(t),
        }
    }
}

/// `t < 0.5 ? 4t³ : 1 - (-2t + 2)³ / 2`
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 { 4.0 * t * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0 }
}

/// One travel transition from `start_pose` to `end_pose`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSession {
    pub start_pose: CameraPose,
    pub end_pose: CameraPose,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl AnimationSession {
    /// Linear progress at `now_ms`, clamped to `[0, 1]`. A non-positive or
    /// non-finite duration is complete immediately.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return 1.0;
        }
        let raw = (now_ms - self.start_ms) / self.duration_ms;
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }

    /// Eased progress at `now_ms`.
    #[must_use]
    pub fn eased_progress(&self, now_ms: f64) -> f64 {
        self.easing.apply(self.progress(now_ms))
    }

    /// Interpolated pose at `now_ms`; exactly `end_pose` once complete.
    #[must_use]
    pub fn pose_at(&self, now_ms: f64) -> CameraPose {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.end_pose;
        }
        self.start_pose.lerp(&self.end_pose, self.easing.apply(t))
    }
}

/// Animator state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimatorState {
    /// No session; gestures own the viewport.
    #[default]
    Idle,
    /// A session is writing poses into the viewport each tick.
    Animating(AnimationSession),
}

/// Outcome of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Pose written into the viewport this tick.
    pub pose: CameraPose,
    /// Eased progress in `[0, 1]`.
    pub eased: f64,
    /// Whether this tick completed the session (state is now `Idle`).
    pub finished: bool,
}

/// Drives a single [`AnimationSession`] at a time.
#[derive(Debug, Clone, Default)]
pub struct CameraAnimator {
    state: AnimatorState,
}

impl CameraAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&AnimationSession> {
        match &self.state {
            AnimatorState::Animating(session) => Some(session),
            AnimatorState::Idle => None,
        }
    }

    /// Begin a session from the viewport's current pose, replacing any
    /// session already running.
    pub fn start(&mut self, viewport: &Viewport, end_pose: CameraPose, now_ms: f64, duration_ms: f64, easing: Easing) {
        let mut start_pose = CameraPose::from_viewport(viewport);
        if let AnimatorState::Animating(previous) = &self.state {
            start_pose.look_at = previous.pose_at(now_ms).look_at;
        }
        self.state = AnimatorState::Animating(AnimationSession {
            start_pose,
            end_pose,
            start_ms: now_ms,
            duration_ms,
            easing,
        });
    }

    /// Advance to `now_ms`, writing the interpolated pose into `viewport`.
    ///
    /// Returns `None` when idle. On the tick that reaches full progress the
    /// end pose is written exactly and the animator returns to `Idle`.
    pub fn tick(&mut self, now_ms: f64, viewport: &mut Viewport) -> Option<TickOutcome> {
        let AnimatorState::Animating(session) = self.state else {
            return None;
        };
        let finished = session.progress(now_ms) >= 1.0;
        let pose = session.pose_at(now_ms);
        pose.apply_to(viewport);
        if finished {
            self.state = AnimatorState::Idle;
        }
        Some(TickOutcome { pose, eased: session.eased_progress(now_ms), finished })
    }

    /// Drop the running session, if any. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let was_animating = self.is_animating();
        self.state = AnimatorState::Idle;
        was_animating
    }
}

/// Parameters of the travel-to-waypoint framing policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelFraming {
    /// Target scale as a multiple of the viewport's minimum scale.
    pub scale_factor: f64,
    /// World distance to back off along the tangent for the first waypoint.
    pub first_offset: f64,
}

/// Target pose for travelling to waypoint `id`, or `None` if it is unknown.
///
/// The camera looks at the waypoint. For the first waypoint along the trail it
/// sits `first_offset` behind it along the tangent; for every other waypoint
/// it sits at the curve point halfway, in parameter space, between the
/// previous waypoint and this one, so the previous marker does not hide the
/// view.
#[must_use]
pub fn travel_pose(
    curve: &CompositeCurve,
    store: &WaypointStore,
    id: &WaypointId,
    viewport: &Viewport,
    framing: TravelFraming,
) -> Option<CameraPose> {
    let waypoint = store.get(id)?;
    let look_at = curve.point_at(waypoint.t);
    let position = match store.previous_of(id) {
        Some(previous) => curve.point_at((previous.t + waypoint.t) / 2.0),
        None => look_at - curve.tangent_at(waypoint.t).normalized() * framing.first_offset,
    };
    Some(CameraPose { position, look_at, scale: viewport.min_scale() * framing.scale_factor })
}
