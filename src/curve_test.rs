#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Two straight-line-equivalent segments: (0,0) -> (100,0) -> (100,100).
fn elbow() -> CompositeCurve {
    CompositeCurve::new(vec![
        CubicSegment::line(pt(0.0, 0.0), pt(100.0, 0.0)),
        CubicSegment::line(pt(100.0, 0.0), pt(100.0, 100.0)),
    ])
}

/// A single S-shaped segment.
fn s_curve() -> CompositeCurve {
    CompositeCurve::new(vec![CubicSegment::new(pt(0.0, 0.0), pt(50.0, 100.0), pt(50.0, -100.0), pt(100.0, 0.0))])
}

// --- CubicSegment ---

#[test]
fn segment_endpoints() {
    let seg = CubicSegment::new(pt(1.0, 2.0), pt(3.0, 7.0), pt(8.0, -1.0), pt(9.0, 4.0));
    assert!(point_approx_eq(seg.point(0.0), seg.p0));
    assert!(point_approx_eq(seg.point(1.0), seg.p3));
}

#[test]
fn segment_line_midpoint_on_chord() {
    let seg = CubicSegment::line(pt(0.0, 0.0), pt(30.0, 60.0));
    assert!(point_approx_eq(seg.point(0.5), pt(15.0, 30.0)));
}

#[test]
fn segment_derivative_matches_finite_difference() {
    let seg = s_curve().segments()[0];
    let h = 1e-6;
    for &u in &[0.1, 0.35, 0.5, 0.8] {
        let numeric = (seg.point(u + h) - seg.point(u - h)) / (2.0 * h);
        let analytic = seg.derivative(u);
        assert!((numeric - analytic).length() < 1e-4, "u={u}");
    }
}

#[test]
fn segment_second_derivative_matches_finite_difference() {
    let seg = s_curve().segments()[0];
    let h = 1e-5;
    let u = 0.3;
    let numeric = (seg.derivative(u + h) - seg.derivative(u - h)) / (2.0 * h);
    assert!((numeric - seg.second_derivative(u)).length() < 1e-3);
}

// --- point_at ---

#[test]
fn point_at_endpoints_match_first_p0_and_last_p3() {
    let curve = elbow();
    assert!(point_approx_eq(curve.point_at(0.0), pt(0.0, 0.0)));
    assert!(point_approx_eq(curve.point_at(1.0), pt(100.0, 100.0)));
}

#[test]
fn point_at_quarter_lies_on_first_segment_line() {
    let p = elbow().point_at(0.25);
    assert!(approx_eq(p.y, 0.0));
    assert!(p.x > 0.0 && p.x < 100.0);
    assert!(approx_eq(p.x, 50.0));
}

#[test]
fn point_at_segment_boundary() {
    assert!(point_approx_eq(elbow().point_at(0.5), pt(100.0, 0.0)));
}

#[test]
fn point_at_clamps_out_of_range() {
    let curve = elbow();
    assert!(point_approx_eq(curve.point_at(-3.0), curve.point_at(0.0)));
    assert!(point_approx_eq(curve.point_at(7.5), curve.point_at(1.0)));
}

#[test]
fn point_at_nan_is_start() {
    assert!(point_approx_eq(elbow().point_at(f64::NAN), pt(0.0, 0.0)));
}

#[test]
fn point_at_empty_curve_is_origin() {
    let curve = CompositeCurve::default();
    assert_eq!(curve.point_at(0.3), Point::ZERO);
}

#[test]
fn point_at_is_continuous_across_boundaries() {
    let curve = elbow();
    let eps = 1e-7;
    for &t in &[0.5 - eps, 0.5] {
        let gap = curve.point_at(t + eps).distance(curve.point_at(t));
        assert!(gap < 1e-3, "gap {gap} at t={t}");
    }
}

// --- tangent_at ---

#[test]
fn tangent_at_empty_curve_is_zero() {
    assert_eq!(CompositeCurve::default().tangent_at(0.5), Point::ZERO);
}

#[test]
fn tangent_follows_segment_direction() {
    let curve = elbow();
    let first = curve.tangent_at(0.2).normalized();
    let second = curve.tangent_at(0.8).normalized();
    assert!(point_approx_eq(first, pt(1.0, 0.0)));
    assert!(point_approx_eq(second, pt(0.0, 1.0)));
}

#[test]
fn heading_of_downward_segment_is_quarter_turn() {
    assert!(approx_eq(elbow().heading_at(0.75), std::f64::consts::FRAC_PI_2));
}

// --- locate / global_t ---

#[test]
fn locate_last_parameter_maps_to_last_segment_end() {
    assert_eq!(elbow().locate(1.0), Some((1, 1.0)));
}

#[test]
fn locate_empty_is_none() {
    assert_eq!(CompositeCurve::default().locate(0.5), None);
}

#[test]
fn global_t_inverts_locate() {
    let curve = elbow();
    let (index, local) = curve.locate(0.7).expect("non-empty curve");
    assert!(approx_eq(curve.global_t(index, local), 0.7));
}

// --- constructors ---

#[test]
fn from_points_chains_shared_endpoints() {
    let points = [pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0), pt(4.0, 0.0), pt(5.0, 0.0), pt(6.0, 0.0)];
    let curve = CompositeCurve::from_points(&points);
    assert_eq!(curve.segment_count(), 2);
    assert_eq!(curve.segments()[1].p0, pt(3.0, 0.0));
    assert_eq!(curve.end(), pt(6.0, 0.0));
}

#[test]
fn from_points_ignores_incomplete_tail() {
    let points = [pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0), pt(4.0, 0.0)];
    assert_eq!(CompositeCurve::from_points(&points).segment_count(), 1);
}

#[test]
fn from_too_few_points_is_empty() {
    assert!(CompositeCurve::from_points(&[pt(0.0, 0.0), pt(1.0, 1.0)]).is_empty());
}

#[test]
fn through_passes_every_anchor() {
    let anchors = [pt(0.0, 0.0), pt(100.0, 50.0), pt(200.0, -20.0), pt(300.0, 10.0)];
    let curve = CompositeCurve::through(&anchors, 1.0);
    assert_eq!(curve.segment_count(), 3);
    for (i, anchor) in anchors.iter().enumerate() {
        let t = i as f64 / 3.0;
        assert!(curve.point_at(t).distance(*anchor) < 1e-6, "anchor {i}");
    }
}

#[test]
fn through_is_tangent_continuous() {
    let anchors = [pt(0.0, 0.0), pt(100.0, 50.0), pt(200.0, -20.0)];
    let curve = CompositeCurve::through(&anchors, 1.0);
    let left = curve.segments()[0].derivative(1.0).normalized();
    let right = curve.segments()[1].derivative(0.0).normalized();
    assert!(point_approx_eq(left, right));
}

#[test]
fn through_zero_tension_is_polyline() {
    let curve = CompositeCurve::through(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)], 0.0);
    assert!(approx_eq(curve.point_at(0.25).y, 0.0));
}

#[test]
fn through_single_anchor_is_empty() {
    assert!(CompositeCurve::through(&[pt(5.0, 5.0)], 1.0).is_empty());
}

// --- bounds / length ---

#[test]
fn bounding_box_of_elbow() {
    let b = elbow().bounding_box();
    assert!(point_approx_eq(b.min, pt(0.0, 0.0)));
    assert!(point_approx_eq(b.max, pt(100.0, 100.0)));
}

#[test]
fn bounding_box_empty_is_zero() {
    assert_eq!(CompositeCurve::default().bounding_box(), Bounds::default());
}

#[test]
fn length_of_straight_segments_is_exact() {
    assert!((elbow().length() - 200.0).abs() < 1e-6);
}

#[test]
fn length_of_empty_curve_is_zero() {
    assert_eq!(CompositeCurve::default().length(), 0.0);
}

#[test]
fn sample_includes_both_ends() {
    let samples: Vec<_> = elbow().sample(4).collect();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0].0, 0.0);
    assert_eq!(samples[4].0, 1.0);
}
