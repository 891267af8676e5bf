#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn distance_sq_is_squared_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance_sq(b), 25.0);
    assert_eq!(a.distance(b), 5.0);
}

#[test]
fn center_truncates_toward_zero() {
    let r = Rect::new(10.0, 20.0, 5.0, 7.0);
    assert_eq!(r.center(), Point::new(12.0, 23.0));
}

#[test]
fn right_and_bottom() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
}

#[test]
fn zero_sized_rect_is_empty() {
    assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
    assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
    assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
}

#[test]
fn at_moves_origin_and_keeps_size() {
    let r = Rect::new(0.0, 0.0, 30.0, 40.0).at(Point::new(5.0, 6.0));
    assert_eq!(r, Rect::new(5.0, 6.0, 30.0, 40.0));
    assert_eq!(r.origin(), Point::new(5.0, 6.0));
}

#[test]
fn clamp_keeps_rect_inside_bounds() {
    let helper = Rect::new(0.0, 0.0, 20.0, 10.0);
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(helper.clamp_origin_within(Point::new(95.0, 95.0), &bounds), Point::new(80.0, 90.0));
    assert_eq!(helper.clamp_origin_within(Point::new(-5.0, -5.0), &bounds), Point::new(0.0, 0.0));
    assert_eq!(helper.clamp_origin_within(Point::new(40.0, 40.0), &bounds), Point::new(40.0, 40.0));
}

#[test]
fn clamp_prefers_top_left_when_rect_exceeds_bounds() {
    let helper = Rect::new(0.0, 0.0, 200.0, 200.0);
    let bounds = Rect::new(10.0, 10.0, 100.0, 100.0);
    assert_eq!(helper.clamp_origin_within(Point::new(50.0, 50.0), &bounds), Point::new(10.0, 10.0));
}
