//! Nearest-point projection onto a [`CompositeCurve`].
//!
//! The search is a brute-force scan over evenly spaced parameter samples. It is
//! an approximation whose precision is one sample step (`1 / (sample_count - 1)`
//! in `t`). With `refine` enabled the winning sample seeds a few Newton
//! iterations on the squared-distance function; the refined answer replaces the
//! sample only when it is strictly closer, so refinement can never make a
//! result worse.
//!
//! Whether a projection counts as "on the path" is a caller policy: compare
//! [`Projection::distance`] against a threshold with [`Projection::is_within`].

#[cfg(test)]
#[path = "projector_test.rs"]
mod projector_test;

use crate::consts::{DEFAULT_SAMPLE_COUNT, MAX_SAMPLES, MIN_SAMPLES, NEWTON_ITERATIONS};
use crate::curve::CompositeCurve;
use crate::geom::Point;

/// Result of projecting a point onto the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Curve parameter of the nearest point found.
    pub t: f64,
    /// The nearest point on the curve.
    pub point: Point,
    /// Euclidean distance from the query point to `point`.
    pub distance: f64,
}

impl Projection {
    /// Whether the query point lay within `threshold` of the curve.
    #[must_use]
    pub fn is_within(&self, threshold: f64) -> bool {
        self.distance <= threshold
    }
}

/// Sampling nearest-point search with optional Newton refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveProjector {
    sample_count: usize,
    refine: bool,
}

impl Default for CurveProjector {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_COUNT)
    }
}

impl CurveProjector {
    /// Projector scanning `sample_count` parameter values, clamped to
    /// `[MIN_SAMPLES, MAX_SAMPLES]`.
    #[must_use]
    pub fn new(sample_count: usize) -> Self {
        Self { sample_count: sample_count.clamp(MIN_SAMPLES, MAX_SAMPLES), refine: false }
    }

    /// Enable or disable Newton refinement of the sampled minimum.
    #[must_use]
    pub fn with_refinement(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    #[must_use]
    pub fn refines(&self) -> bool {
        self.refine
    }

    /// Parameter distance between adjacent samples.
    #[must_use]
    pub fn sample_step(&self) -> f64 {
        1.0 / (self.sample_count - 1) as f64
    }

    /// Nearest point on `curve` to `point`.
    ///
    /// Scans `t_i = i / (n - 1)` for `i in 0..n`; the first sample reaching the
    /// minimum distance wins. An empty curve yields `t = 0` at the origin with
    /// an infinite distance, so no threshold ever accepts it.
    #[must_use]
    pub fn project(&self, curve: &CompositeCurve, point: Point) -> Projection {
        if curve.is_empty() {
            return Projection { t: 0.0, point: Point::ZERO, distance: f64::INFINITY };
        }

        let last = (self.sample_count - 1) as f64;
        let mut best_t = 0.0;
        let mut best_point = curve.point_at(0.0);
        let mut best_d2 = best_point.distance_squared(point);
        for i in 1..self.sample_count {
            let t = i as f64 / last;
            let candidate = curve.point_at(t);
            let d2 = candidate.distance_squared(point);
            if d2 < best_d2 {
                best_t = t;
                best_point = candidate;
                best_d2 = d2;
            }
        }

        if self.refine {
            if let Some((t, p, d2)) = refine(curve, point, best_t)
                && d2 < best_d2
            {
                best_t = t;
                best_point = p;
                best_d2 = d2;
            }
        }

        Projection { t: best_t, point: best_point, distance: best_d2.sqrt() }
    }
}

/// Newton iterations on `f(u) = (B(u) - P) · B'(u)` within the segment holding
/// `seed_t`, and within the previous segment when the seed sits on a boundary.
fn refine(curve: &CompositeCurve, target: Point, seed_t: f64) -> Option<(f64, Point, f64)> {
    let (index, local) = curve.locate(seed_t)?;
    let mut starts = vec![(index, local)];
    if local <= f64::EPSILON && index > 0 {
        starts.push((index - 1, 1.0));
    }

    starts
        .into_iter()
        .map(|(index, local)| {
            let segment = &curve.segments()[index];
            let mut u = local;
            for _ in 0..NEWTON_ITERATIONS {
                let offset = segment.point(u) - target;
                let d1 = segment.derivative(u);
                let numerator = offset.dot(d1);
                let denominator = d1.dot(d1) + offset.dot(segment.second_derivative(u));
                if denominator.abs() <= f64::EPSILON {
                    break;
                }
                let next = (u - numerator / denominator).clamp(0.0, 1.0);
                if (next - u).abs() <= 1e-12 {
                    u = next;
                    break;
                }
                u = next;
            }
            let p = segment.point(u);
            (curve.global_t(index, u), p, p.distance_squared(target))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))
}
