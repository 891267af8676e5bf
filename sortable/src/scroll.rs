//! Eased smooth scrolling.
//!
//! A `ScrollAnimation` moves a scroll position from its current value to the
//! top of a target element in fixed 16ms ticks. The host owns the timer and
//! calls `tick` until it reports completion; `stop` ends an animation early.
//! Either way the end callback runs exactly once.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use tracing::debug;

use crate::config::ScrollOptions;
use crate::consts::SCROLL_TICK_MS;
use crate::easing::{Easing, Tween};

/// A scrollable surface: the window or a container element.
pub trait ScrollHost {
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&mut self, top: f64);
    /// Height of the visible area.
    fn client_height(&self) -> f64;
    /// Height of the full scrollable content, if known.
    fn scroll_height(&self) -> Option<f64>;
}

/// An in-memory scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VirtualScroll {
    pub top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl VirtualScroll {
    #[must_use]
    pub fn new(client_height: f64, scroll_height: f64) -> Self {
        Self { top: 0.0, client_height, scroll_height }
    }
}

impl ScrollHost for VirtualScroll {
    fn scroll_top(&self) -> f64 {
        self.top
    }

    fn set_scroll_top(&mut self, top: f64) {
        let max = (self.scroll_height - self.client_height).max(0.0);
        self.top = top.clamp(0.0, max);
    }

    fn client_height(&self) -> f64 {
        self.client_height
    }

    fn scroll_height(&self) -> Option<f64> {
        Some(self.scroll_height)
    }
}

/// Scroll target for an element given the `offsetTop` of it and each of its
/// offset parents, minus `offset`, never negative.
pub fn end_location(offset_tops: impl IntoIterator<Item = f64>, offset: f64) -> f64 {
    (offset_tops.into_iter().sum::<f64>() - offset).max(0.0)
}

/// Positions closer than half a pixel are the same scroll offset.
fn reached(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.5
}

/// One scroll from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    tween: Tween,
    position: f64,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(start: f64, end: f64, duration: f64, easing: Easing) -> Self {
        Self { tween: Tween::new(start, end, duration, easing), position: start }
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.tween.from
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.tween.to
    }

    /// Last position written to the host.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.tween.progress()
    }

    /// Advance one tick, write the new position, and report whether the
    /// animation has converged.
    pub fn step(&mut self, host: &mut dyn ScrollHost) -> bool {
        self.position = self.tween.advance(SCROLL_TICK_MS);
        host.set_scroll_top(self.position);

        let current = host.scroll_top();
        let at_bottom = host
            .scroll_height()
            .is_some_and(|height| host.client_height() + current >= height);
        reached(self.position, self.end()) || reached(current, self.end()) || at_bottom || self.tween.is_done()
    }
}

type Callback = Box<dyn FnOnce()>;

/// A scroll animation with start and end hooks.
pub struct ScrollAnimator {
    animation: ScrollAnimation,
    on_start: Option<Callback>,
    on_end: Option<Callback>,
    running: bool,
    finished: bool,
}

impl ScrollAnimator {
    /// Prepare a scroll from the host's current position to `end`.
    #[must_use]
    pub fn new(host: &dyn ScrollHost, end: f64, options: &ScrollOptions) -> Self {
        let animation = ScrollAnimation::new(host.scroll_top(), end, options.duration, options.easing);
        Self { animation, on_start: None, on_end: None, running: false, finished: false }
    }

    #[must_use]
    pub fn on_start(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_end(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn animation(&self) -> &ScrollAnimation {
        &self.animation
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run the start hook and begin ticking. No-op once finished.
    pub fn start(&mut self) {
        if self.finished || self.running {
            return;
        }
        if let Some(callback) = self.on_start.take() {
            callback();
        }
        self.running = true;
        debug!(from = self.animation.start(), to = self.animation.end(), "scroll started");
    }

    /// Advance one tick. Returns `true` while the animation should keep running.
    pub fn tick(&mut self, host: &mut dyn ScrollHost) -> bool {
        if !self.running {
            return false;
        }
        if self.animation.step(host) {
            self.stop();
        }
        self.running
    }

    /// End the animation now. The end hook runs if it has not already.
    pub fn stop(&mut self) {
        self.running = false;
        self.finished = true;
        if let Some(callback) = self.on_end.take() {
            debug!(position = self.animation.position(), "scroll finished");
            callback();
        }
    }
}

/// A scroll animator together with the surface it moves.
pub struct ScrollRun<H: ScrollHost> {
    host: H,
    animator: ScrollAnimator,
}

impl<H: ScrollHost> ScrollRun<H> {
    #[must_use]
    pub fn new(host: H, end: f64, options: &ScrollOptions) -> Self {
        let animator = ScrollAnimator::new(&host, end, options);
        Self { host, animator }
    }

    #[must_use]
    pub fn on_start(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.animator = self.animator.on_start(callback);
        self
    }

    #[must_use]
    pub fn on_end(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.animator = self.animator.on_end(callback);
        self
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn start(&mut self) {
        self.animator.start();
    }

    /// Advance one tick. Returns `true` while more ticks are needed.
    pub fn tick(&mut self) -> bool {
        self.animator.tick(&mut self.host)
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }
}

/// Prepare a scroll of `host` to the element whose offset-parent chain has
/// the given `offset_tops`, less `options.offset`.
pub fn animate<H: ScrollHost>(
    host: H,
    offset_tops: impl IntoIterator<Item = f64>,
    options: &ScrollOptions,
) -> ScrollRun<H> {
    let end = end_location(offset_tops, options.offset);
    ScrollRun::new(host, end, options)
}

/// Every position a scroll would pass through on `host`, one per tick.
pub fn plan(host: &mut dyn ScrollHost, end: f64, options: &ScrollOptions) -> Vec<f64> {
    let mut animation = ScrollAnimation::new(host.scroll_top(), end, options.duration, options.easing);
    let mut positions = Vec::new();
    loop {
        let done = animation.step(host);
        positions.push(host.scroll_top());
        if done {
            return positions;
        }
    }
}
