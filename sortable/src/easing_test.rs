#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn thirteen_curves_with_distinct_names() {
    let mut names: Vec<&str> = Easing::ALL.iter().map(|e| e.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 13);
}

#[test]
fn every_curve_starts_at_zero_and_ends_at_one() {
    for easing in Easing::ALL {
        assert_eq!(easing.apply(0.0), 0.0, "{easing} at 0");
        assert_eq!(easing.apply(1.0), 1.0, "{easing} at 1");
    }
}

#[test]
fn every_curve_is_monotonic() {
    for easing in Easing::ALL {
        let mut prev = easing.apply(0.0);
        for step in 1..=200 {
            let value = easing.apply(f64::from(step) / 200.0);
            assert!(value >= prev - 1e-12, "{easing} decreased at step {step}");
            prev = value;
        }
    }
}

#[test]
fn input_is_clamped() {
    for easing in Easing::ALL {
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }
}

#[test]
fn in_out_curves_pass_through_midpoint() {
    for easing in [Easing::EaseInOutQuad, Easing::EaseInOutCubic, Easing::EaseInOutQuart, Easing::EaseInOutQuint] {
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-12, "{easing}");
    }
}

#[test]
fn default_is_ease_in_out_quart() {
    assert_eq!(Easing::default(), Easing::EaseInOutQuart);
}

#[test]
fn parse_round_trips_every_name() {
    for easing in Easing::ALL {
        assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
    }
}

#[test]
fn parse_unknown_name_is_an_error() {
    assert_eq!("bounce".parse::<Easing>(), Err(SortableError::UnknownEasing("bounce".into())));
}

#[test]
fn serde_uses_attribute_spelling() {
    assert_eq!(serde_json::to_string(&Easing::EaseOutCubic).unwrap(), "\"easeOutCubic\"");
    let back: Easing = serde_json::from_str("\"easeInQuint\"").unwrap();
    assert_eq!(back, Easing::EaseInQuint);
}

// =============================================================
// Tween
// =============================================================

#[test]
fn tween_reaches_target_after_duration() {
    let mut tween = Tween::new(100.0, 300.0, 160.0, Easing::Linear);
    assert_eq!(tween.value(), 100.0);
    assert_eq!(tween.advance(80.0), 200.0);
    assert!(!tween.is_done());
    assert_eq!(tween.advance(80.0), 300.0);
    assert!(tween.is_done());
}

#[test]
fn tween_saturates_past_duration() {
    let mut tween = Tween::new(0.0, 10.0, 50.0, Easing::EaseInQuad);
    tween.advance(500.0);
    assert_eq!(tween.progress(), 1.0);
    assert_eq!(tween.value(), 10.0);
    assert_eq!(tween.elapsed(), 500.0);
}

#[test]
fn zero_duration_tween_is_complete() {
    let tween = Tween::new(0.0, 10.0, 0.0, Easing::Linear);
    assert!(tween.is_done());
    assert_eq!(tween.value(), 10.0);
}

#[test]
fn negative_time_does_not_rewind() {
    let mut tween = Tween::new(0.0, 10.0, 100.0, Easing::Linear);
    tween.advance(50.0);
    tween.advance(-30.0);
    assert_eq!(tween.elapsed(), 50.0);
}
