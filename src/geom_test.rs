#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point arithmetic ---

#[test]
fn point_add_sub() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(3.0, -4.0);
    assert_eq!(a + b, Point::new(4.0, -2.0));
    assert_eq!(b - a, Point::new(2.0, -6.0));
}

#[test]
fn point_scalar_mul_both_sides() {
    let p = Point::new(1.5, -2.0);
    assert_eq!(p * 2.0, Point::new(3.0, -4.0));
    assert_eq!(2.0 * p, Point::new(3.0, -4.0));
}

#[test]
fn point_length_and_distance() {
    assert!(approx_eq(Point::new(3.0, 4.0).length(), 5.0));
    assert!(approx_eq(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0));
    assert!(approx_eq(Point::new(1.0, 1.0).distance_squared(Point::new(4.0, 5.0)), 25.0));
}

#[test]
fn normalized_zero_vector_stays_zero() {
    assert_eq!(Point::ZERO.normalized(), Point::ZERO);
}

#[test]
fn normalized_has_unit_length() {
    let n = Point::new(10.0, -7.0).normalized();
    assert!(approx_eq(n.length(), 1.0));
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 20.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 10.0));
}

#[test]
fn clamp_is_component_wise() {
    let p = Point::new(-5.0, 50.0).clamp(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    assert_eq!(p, Point::new(0.0, 10.0));
}

// --- Bounds ---

#[test]
fn bounds_from_no_points_is_none() {
    assert!(Bounds::from_points(std::iter::empty()).is_none());
}

#[test]
fn bounds_from_points_spans_extremes() {
    let b = Bounds::from_points([Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)])
        .expect("non-empty input");
    assert_eq!(b.min, Point::new(-2.0, -1.0));
    assert_eq!(b.max, Point::new(4.0, 5.0));
    assert!(approx_eq(b.width(), 6.0));
    assert!(approx_eq(b.height(), 6.0));
    assert_eq!(b.center(), Point::new(1.0, 2.0));
}

#[test]
fn bounds_contains_edges() {
    let b = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    assert!(b.contains(Point::new(0.0, 10.0)));
    assert!(!b.contains(Point::new(10.1, 5.0)));
}
