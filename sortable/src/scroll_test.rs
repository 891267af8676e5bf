#![allow(clippy::float_cmp)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move || handle.set(handle.get() + 1))
}

#[test]
fn end_location_sums_offset_chain() {
    assert_eq!(end_location([40.0, 300.0, 12.0], 0.0), 352.0);
    assert_eq!(end_location([40.0, 300.0, 12.0], 52.0), 300.0);
}

#[test]
fn end_location_is_never_negative() {
    assert_eq!(end_location([10.0], 50.0), 0.0);
    assert_eq!(end_location(std::iter::empty(), 0.0), 0.0);
}

#[test]
fn plan_converges_on_target() {
    let mut host = VirtualScroll::new(500.0, 5000.0);
    let positions = plan(&mut host, 1000.0, &ScrollOptions::default());
    let last = *positions.last().unwrap();
    assert!((last - 1000.0).abs() < 0.5);
    assert!(positions.len() <= 50);
    assert!(positions.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn plan_scrolls_upward() {
    let mut host = VirtualScroll::new(500.0, 5000.0);
    host.set_scroll_top(2000.0);
    let positions = plan(&mut host, 0.0, &ScrollOptions { easing: Easing::Linear, ..ScrollOptions::default() });
    assert!(positions.windows(2).all(|w| w[1] <= w[0]));
    assert!(*positions.last().unwrap() < 0.5);
}

#[test]
fn plan_stops_at_bottom_of_content() {
    let mut host = VirtualScroll::new(500.0, 1200.0);
    let positions = plan(&mut host, 1000.0, &ScrollOptions { easing: Easing::Linear, ..ScrollOptions::default() });
    assert_eq!(*positions.last().unwrap(), 700.0);
    assert!(positions.len() < 50);
}

#[test]
fn linear_step_advances_one_tick() {
    let mut host = VirtualScroll::new(100.0, 10_000.0);
    let mut anim = ScrollAnimation::new(0.0, 1600.0, 160.0, Easing::Linear);
    assert!(!anim.step(&mut host));
    assert_eq!(anim.position(), 160.0);
    assert_eq!(host.scroll_top(), 160.0);
    assert_eq!(anim.progress(), 0.1);
}

#[test]
fn animator_runs_hooks_once() {
    let (started, on_start) = counter();
    let (ended, on_end) = counter();
    let mut host = VirtualScroll::new(500.0, 5000.0);
    let mut animator = ScrollAnimator::new(&host, 800.0, &ScrollOptions::default()).on_start(on_start).on_end(on_end);

    assert!(!animator.is_running());
    animator.start();
    assert_eq!(started.get(), 1);
    let mut ticks = 0;
    while animator.tick(&mut host) {
        ticks += 1;
        assert!(ticks < 100, "animation never finished");
    }
    assert_eq!(ended.get(), 1);
    assert!(animator.is_finished());

    animator.stop();
    animator.start();
    assert!(!animator.tick(&mut host));
    assert_eq!(started.get(), 1);
    assert_eq!(ended.get(), 1);
}

#[test]
fn stop_ends_early_and_fires_end_once() {
    let (ended, on_end) = counter();
    let mut host = VirtualScroll::new(500.0, 5000.0);
    let mut animator = ScrollAnimator::new(&host, 3000.0, &ScrollOptions::default()).on_end(on_end);
    animator.start();
    assert!(animator.tick(&mut host));
    animator.stop();
    animator.stop();
    assert_eq!(ended.get(), 1);
    assert!(!animator.tick(&mut host));
    assert!(host.scroll_top() < 3000.0);
}

#[test]
fn tick_before_start_does_nothing() {
    let mut host = VirtualScroll::new(500.0, 5000.0);
    let mut animator = ScrollAnimator::new(&host, 300.0, &ScrollOptions::default());
    assert!(!animator.tick(&mut host));
    assert_eq!(host.scroll_top(), 0.0);
}

// =============================================================
// animate
// =============================================================

#[test]
fn animate_targets_offset_chain_less_offset() {
    let (ended, on_end) = counter();
    let options = ScrollOptions { offset: 80.0, ..ScrollOptions::default() };
    let mut run = animate(VirtualScroll::new(500.0, 5000.0), [600.0, 120.0], &options).on_end(on_end);
    assert_eq!(run.animator().animation().end(), 640.0);

    run.start();
    let mut ticks = 0;
    while run.tick() {
        ticks += 1;
        assert!(ticks < 100, "animation never finished");
    }
    assert!((run.host().scroll_top() - 640.0).abs() < 0.5);
    assert_eq!(ended.get(), 1);
}

#[test]
fn animate_never_targets_above_top() {
    let options = ScrollOptions { offset: 500.0, ..ScrollOptions::default() };
    let mut host = VirtualScroll::new(500.0, 5000.0);
    host.set_scroll_top(900.0);
    let run = animate(host, [100.0], &options);
    assert_eq!(run.animator().animation().start(), 900.0);
    assert_eq!(run.animator().animation().end(), 0.0);
}

#[test]
fn animate_stop_fires_end_once() {
    let (ended, on_end) = counter();
    let mut run = animate(VirtualScroll::new(500.0, 5000.0), [3000.0], &ScrollOptions::default()).on_end(on_end);
    run.start();
    assert!(run.tick());
    run.stop();
    run.stop();
    assert!(!run.tick());
    assert_eq!(ended.get(), 1);
}
