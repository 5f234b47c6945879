//! Composite cubic Bezier path.
//!
//! A [`CompositeCurve`] is an ordered chain of [`CubicSegment`]s addressed by a
//! single normalized parameter `t` in `[0, 1]`. Every segment owns an equal
//! slice of the parameter range regardless of its arc length, so `t` is a
//! *parameter* position, not an arc-length fraction. The curve is built once
//! per screen and never mutated afterwards.

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BOUNDS_SAMPLES, LENGTH_SAMPLES};
use crate::geom::{Bounds, Point};

/// One cubic Bezier piece: start `p0`, handles `p1`/`p2`, end `p3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicSegment {
    #[must_use]
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Straight segment with handles at the thirds, so it evaluates on the chord.
    #[must_use]
    pub fn line(from: Point, to: Point) -> Self {
        Self { p0: from, p1: from.lerp(to, 1.0 / 3.0), p2: from.lerp(to, 2.0 / 3.0), p3: to }
    }

    /// B(u) = (1-u)³·p0 + 3(1-u)²u·p1 + 3(1-u)u²·p2 + u³·p3
    #[must_use]
    pub fn point(&self, u: f64) -> Point {
        let inv = 1.0 - u;
        let inv2 = inv * inv;
        let u2 = u * u;
        self.p0 * (inv2 * inv) + self.p1 * (3.0 * inv2 * u) + self.p2 * (3.0 * inv * u2) + self.p3 * (u2 * u)
    }

    /// B'(u) with respect to the local parameter.
    #[must_use]
    pub fn derivative(&self, u: f64) -> Point {
        let inv = 1.0 - u;
        (self.p1 - self.p0) * (3.0 * inv * inv) + (self.p2 - self.p1) * (6.0 * inv * u) + (self.p3 - self.p2) * (3.0 * u * u)
    }

    /// B''(u) with respect to the local parameter.
    #[must_use]
    pub fn second_derivative(&self, u: f64) -> Point {
        let a = self.p2 - self.p1 * 2.0 + self.p0;
        let b = self.p3 - self.p2 * 2.0 + self.p1;
        a * (6.0 * (1.0 - u)) + b * (6.0 * u)
    }
}

/// Ordered chain of cubic segments evaluated by a global parameter.
///
/// Segment `i`'s `p3` is expected to equal segment `i + 1`'s `p0`; this is not
/// enforced, but every consumer assumes a continuous path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeCurve {
    segments: Vec<CubicSegment>,
}

impl CompositeCurve {
    #[must_use]
    pub fn new(segments: Vec<CubicSegment>) -> Self {
        Self { segments }
    }

    /// Build from a flat control-point list where consecutive segments share
    /// endpoints: `[p0, p1, p2, p3, p1', p2', p3', ...]`.
    ///
    /// Trailing points that do not complete a segment are ignored.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        if points.len() < 4 {
            return Self::default();
        }
        let segments = points
            .windows(4)
            .step_by(3)
            .map(|w| CubicSegment::new(w[0], w[1], w[2], w[3]))
            .collect();
        Self { segments }
    }

    /// Smooth path through `anchors` using Catmull-Rom tangents converted to
    /// cubic handles. `tension` scales handle length (1.0 = uniform Catmull-Rom,
    /// 0.0 = straight polyline).
    ///
    /// Fewer than two anchors yield an empty curve.
    #[must_use]
    pub fn through(anchors: &[Point], tension: f64) -> Self {
        if anchors.len() < 2 {
            return Self::default();
        }
        let last = anchors.len() - 1;
        let k = tension / 6.0;
        let segments = (0..last)
            .map(|i| {
                let prev = anchors[i.saturating_sub(1)];
                let start = anchors[i];
                let end = anchors[i + 1];
                let next = anchors[(i + 2).min(last)];
                CubicSegment::new(start, start + (end - prev) * k, end - (next - start) * k, end)
            })
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Map a global parameter to `(segment index, local parameter)`.
    ///
    /// `t` is clamped to `[0, 1]`; NaN is treated as 0. Returns `None` for an
    /// empty curve.
    #[must_use]
    pub fn locate(&self, t: f64) -> Option<(usize, f64)> {
        if self.segments.is_empty() {
            return None;
        }
        let count = self.segments.len();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * count as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (scaled.floor() as usize).min(count - 1);
        let local = (scaled - index as f64).clamp(0.0, 1.0);
        Some((index, local))
    }

    /// Global parameter for a local position within segment `index`.
    #[must_use]
    pub fn global_t(&self, index: usize, local: f64) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        ((index as f64 + local.clamp(0.0, 1.0)) / self.segments.len() as f64).clamp(0.0, 1.0)
    }

    /// Position at parameter `t`. Origin for an empty curve.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.locate(t)
            .map_or(Point::ZERO, |(index, local)| self.segments[index].point(local))
    }

    /// Tangent (local-parameter derivative) at `t`. Zero vector for an empty curve.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Point {
        self.locate(t)
            .map_or(Point::ZERO, |(index, local)| self.segments[index].derivative(local))
    }

    /// Heading angle in radians of the tangent at `t`, for orienting markers.
    #[must_use]
    pub fn heading_at(&self, t: f64) -> f64 {
        let tangent = self.tangent_at(t);
        tangent.y.atan2(tangent.x)
    }

    /// First point of the path (`point_at(0)`).
    #[must_use]
    pub fn start(&self) -> Point {
        self.segments.first().map_or(Point::ZERO, |s| s.p0)
    }

    /// Last point of the path (`point_at(1)`).
    #[must_use]
    pub fn end(&self) -> Point {
        self.segments.last().map_or(Point::ZERO, |s| s.p3)
    }

    /// Approximate bounds from [`BOUNDS_SAMPLES`] evenly spaced samples.
    ///
    /// Not exact: only used for fit-to-screen framing. An empty curve yields a
    /// zero-size box at the origin.
    #[must_use]
    pub fn bounding_box(&self) -> Bounds {
        if self.segments.is_empty() {
            return Bounds::default();
        }
        Bounds::from_points(self.sample(BOUNDS_SAMPLES).map(|(_, p)| p)).unwrap_or_default()
    }

    /// Polyline length approximation over `samples` chords.
    #[must_use]
    pub fn approx_length(&self, samples: usize) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        let samples = samples.max(1);
        let mut prev = self.start();
        let mut length = 0.0;
        for (_, p) in self.sample(samples).skip(1) {
            length += prev.distance(p);
            prev = p;
        }
        length
    }

    /// [`approx_length`](Self::approx_length) at the default density.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.approx_length(LENGTH_SAMPLES)
    }

    /// `samples + 1` evenly spaced `(t, point)` pairs from `t = 0` to `t = 1` inclusive.
    pub fn sample(&self, samples: usize) -> impl Iterator<Item = (f64, Point)> + '_ {
        let samples = samples.max(1);
        (0..=samples).map(move |i| {
            let t = i as f64 / samples as f64;
            (t, self.point_at(t))
        })
    }
}
