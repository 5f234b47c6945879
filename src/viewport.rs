//! Pan/zoom viewport over the trail content.
//!
//! The transform is `screen = world * scale + pan`. `scale` is always held in
//! `[min_scale, max_scale]`, where `min_scale` is never below the fit scale at
//! which the content exactly fills the viewport on its constraining axis, so
//! the user can never zoom out past the initial framing.
//!
//! Pan is clamped relative to the centred position: along each axis the
//! content may move by at most `max(0, (content * scale - viewport) / 2)` plus
//! the configured slack. When content is smaller than the viewport it stays
//! centred.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::consts::ZOOM_EPSILON;
use crate::geom::{Bounds, Point};

/// Scale and pan state plus the limits that constrain them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    scale: f64,
    pan: Point,
    min_scale: f64,
    max_scale: f64,
    /// Ceiling as configured; `max_scale` is this raised to `min_scale`.
    configured_max: f64,
    content: Bounds,
    size: Point,
    slack: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Point::ZERO,
            min_scale: 1.0,
            max_scale: 1.0,
            configured_max: 1.0,
            content: Bounds::default(),
            size: Point::ZERO,
            slack: 0.0,
        }
    }
}

impl Viewport {
    /// Frame `content` inside a viewport of `size` screen pixels.
    ///
    /// Starts at the lower scale limit with the content centred. `min_scale`
    /// of `None` uses the fit scale; an explicit value below the fit scale is
    /// raised to it. The effective `max_scale` is the configured ceiling raised
    /// to `min_scale` if smaller; the configured value is kept, so the ceiling
    /// drops back when a resize lowers the floor again.
    #[must_use]
    pub fn new(content: Bounds, size: Point, min_scale: Option<f64>, max_scale: f64, slack: f64) -> Self {
        let mut viewport = Self {
            scale: 1.0,
            pan: Point::ZERO,
            min_scale: 1.0,
            max_scale,
            configured_max: max_scale,
            content,
            size: sanitize_size(size),
            slack: slack.max(0.0),
        };
        viewport.recompute_limits(min_scale);
        viewport.scale = viewport.min_scale;
        viewport.pan = viewport.centered_pan(viewport.scale);
        viewport
    }

    // --- Accessors ---

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        self.pan
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    #[must_use]
    pub fn content_bounds(&self) -> Bounds {
        self.content
    }

    /// Viewport width and height in screen pixels.
    #[must_use]
    pub fn size(&self) -> Point {
        self.size
    }

    /// Scale at which the content exactly fits the viewport on its constraining axis.
    #[must_use]
    pub fn fit_scale(&self) -> f64 {
        let w = self.content.width();
        let h = self.content.height();
        let sx = if w > f64::EPSILON { self.size.x / w } else { f64::INFINITY };
        let sy = if h > f64::EPSILON { self.size.y / h } else { f64::INFINITY };
        let fit = sx.min(sy);
        if fit.is_finite() && fit > 0.0 { fit } else { 1.0 }
    }

    // --- Coordinate conversion ---

    /// `(p - pan) / scale`
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        (screen - self.pan) / self.scale
    }

    /// `p * scale + pan`
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        world * self.scale + self.pan
    }

    /// Convert a screen-space distance (pixels) to world units.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// World point currently at the centre of the viewport.
    #[must_use]
    pub fn center_world(&self) -> Point {
        self.screen_to_world(self.size * 0.5)
    }

    /// World-space rectangle currently visible.
    #[must_use]
    pub fn visible_world_bounds(&self) -> Bounds {
        Bounds::new(self.screen_to_world(Point::ZERO), self.screen_to_world(self.size))
    }

    // --- Mutation ---

    /// Translate by a screen-space delta, then clamp. Returns whether the pan changed.
    ///
    /// Non-finite deltas are ignored.
    pub fn apply_pan(&mut self, delta: Point) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let before = self.pan;
        self.pan = self.clamp_pan(self.pan + delta, self.scale);
        self.pan != before
    }

    /// Multiply scale by `factor` around `focal` (screen space), keeping the
    /// world point under `focal` fixed unless pan clamping intervenes.
    /// Returns whether scale or pan changed.
    ///
    /// Non-finite or non-positive factors, and factors within
    /// [`ZOOM_EPSILON`] of 1.0, are ignored.
    pub fn apply_zoom(&mut self, factor: f64, focal: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 || (factor - 1.0).abs() < ZOOM_EPSILON || !focal.is_finite() {
            return false;
        }
        let before = (self.scale, self.pan);
        let anchor = self.screen_to_world(focal);
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        self.scale = new_scale;
        self.pan = self.clamp_pan(focal - anchor * new_scale, new_scale);
        (self.scale, self.pan) != before
    }

    /// Put `world` at the viewport centre at `scale` (clamped to the limits).
    pub fn center_on(&mut self, world: Point, scale: f64) {
        let scale = if scale.is_finite() { scale.clamp(self.min_scale, self.max_scale) } else { self.scale };
        self.scale = scale;
        if world.is_finite() {
            self.pan = self.clamp_pan(self.size * 0.5 - world * scale, scale);
        }
    }

    /// Resize the viewport, re-deriving the fit scale and keeping the world
    /// point at the centre of the view fixed.
    pub fn set_size(&mut self, size: Point, min_scale: Option<f64>) {
        let center = self.center_world();
        self.size = sanitize_size(size);
        self.recompute_limits(min_scale);
        let scale = self.scale;
        self.center_on(center, scale);
    }

    /// Replace the content bounds and re-fit to them.
    pub fn set_content(&mut self, content: Bounds, min_scale: Option<f64>) {
        self.content = content;
        self.recompute_limits(min_scale);
        self.scale = self.min_scale;
        self.pan = self.centered_pan(self.scale);
    }

    // --- Internals ---

    fn recompute_limits(&mut self, min_scale: Option<f64>) {
        let fit = self.fit_scale();
        self.min_scale = min_scale.filter(|s| s.is_finite()).map_or(fit, |s| s.max(fit));
        self.max_scale =
            if self.configured_max.is_finite() { self.configured_max.max(self.min_scale) } else { self.min_scale };
        self.scale = self.scale.clamp(self.min_scale, self.max_scale);
    }

    /// Pan that places the content centre at the viewport centre.
    fn centered_pan(&self, scale: f64) -> Point {
        self.size * 0.5 - self.content.center() * scale
    }

    fn clamp_pan(&self, pan: Point, scale: f64) -> Point {
        let centered = self.centered_pan(scale);
        let reach = Point::new(
            ((self.content.width() * scale - self.size.x) / 2.0).max(0.0) + self.slack,
            ((self.content.height() * scale - self.size.y) / 2.0).max(0.0) + self.slack,
        );
        centered + (pan - centered).clamp(-reach, reach)
    }
}

fn sanitize_size(size: Point) -> Point {
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Point::new(clean(size.x), clean(size.y))
}
