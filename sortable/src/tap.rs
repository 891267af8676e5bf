//! Tap tracking: turn a touch sequence into at most one logical click.
//!
//! Mobile browsers deliver a synthetic `click` some time after `touchend`.
//! [`TapTracker`] follows each touch from start to end, decides whether it
//! was a tap or a pan, synthesizes the click itself when it was a tap, and
//! swallows the browser's late duplicate. Elements that need native click
//! behavior are left alone.

#[cfg(test)]
#[path = "tap_test.rs"]
mod tap_test;

use tracing::trace;

use crate::caps::Capabilities;
use crate::consts::{FOCUS_TAP_LIMIT_MS, TAP_DELAY_MS, TAP_TIMEOUT_MS, TOUCH_BOUNDARY_PX};
use crate::geometry::Point;
use crate::pointer::{EventKind, EventLayer, TouchPoint};

/// Tap thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapConfig {
    /// Pixels a touch may travel and still be a tap.
    pub touch_boundary: f64,
    /// Minimum ms between two resolved taps; closer taps are phantoms.
    pub tap_delay: f64,
    /// Longest press in ms that still counts as a tap.
    pub tap_timeout: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self { touch_boundary: TOUCH_BOUNDARY_PX, tap_delay: TAP_DELAY_MS, tap_timeout: TAP_TIMEOUT_MS }
    }
}

/// The parts of a DOM element the tracker inspects.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Host-assigned identity; equal ids mean the same node.
    pub id: u64,
    /// Lowercase tag name.
    pub tag: String,
    /// `type` attribute of inputs.
    pub input_type: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    pub classes: Vec<String>,
}

impl Element {
    #[must_use]
    pub fn new(id: u64, tag: &str) -> Self {
        Self { id, tag: tag.to_ascii_lowercase(), ..Default::default() }
    }

    #[must_use]
    pub fn with_type(mut self, input_type: &str) -> Self {
        self.input_type = Some(input_type.to_owned());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn input_type(&self) -> &str {
        self.input_type.as_deref().unwrap_or("text")
    }

    /// Whether the element must receive the browser's own click.
    #[must_use]
    pub fn needs_click(&self, caps: &Capabilities) -> bool {
        match self.tag.as_str() {
            "button" | "select" | "textarea" if self.disabled => return true,
            "input" if self.disabled || (caps.ios && self.input_type() == "file") => return true,
            "label" | "iframe" | "video" => return true,
            _ => {}
        }
        self.has_class("needsclick")
    }

    /// Whether a tap should focus the element before clicking it.
    #[must_use]
    pub fn needs_focus(&self, caps: &Capabilities) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "select" => !caps.android,
            "input" => {
                !matches!(self.input_type(), "button" | "checkbox" | "file" | "image" | "radio" | "submit")
                    && !self.disabled
                    && !self.read_only
            }
            _ => self.has_class("needsfocus"),
        }
    }
}

/// A touch event as seen by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchSample {
    pub target: Element,
    /// `targetTouches` on start, `changedTouches` on move and end.
    pub touches: Vec<TouchPoint>,
    pub timestamp: f64,
}

/// A mouse or click event as seen by the tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MouseSample {
    /// Set on clicks the tracker synthesized itself.
    pub forwarded: bool,
    pub cancelable: bool,
    /// Keyboard-triggered submit (`type=submit`, `detail == 0`).
    pub keyboard_submit: bool,
}

/// Decision for a touch-start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchStart {
    /// Not tracked: multi-touch or a repeated iOS identifier.
    Ignored,
    /// Tracked. `prevent_default` is set for a phantom double tap.
    Tracking { prevent_default: bool },
}

/// Result of a touch-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// The touch was never a tap candidate (moved, cancelled, or untracked).
    NotTracking,
    /// Too soon after the previous tap; the next click is cancelled.
    DoubleTap,
    /// Held longer than the tap timeout.
    Held,
    /// A focusable target held too long; left to the browser.
    FocusTimedOut,
    /// Synthesize a click on `target`, focusing it first when `focus` is set.
    Click { target: u64, focus: bool },
    /// The target needs the browser's own click.
    Native { target: u64 },
}

/// One DOM event, as delivered to [`TapTracker::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum TapEvent {
    TouchStart(TouchSample),
    TouchMove(TouchSample),
    TouchEnd(TouchSample),
    TouchCancel,
    /// `mouseover`, `mousedown` or `mouseup`.
    Mouse(MouseSample),
    Click(MouseSample),
}

/// What the host does with the event it just delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapEffects {
    pub prevent_default: bool,
    /// Keep the event from every other listener.
    pub stop_propagation: bool,
    /// Focus this target before the synthetic click.
    pub focus: Option<u64>,
    /// Dispatch a synthetic click on this target.
    pub click: Option<u64>,
}

impl TapEffects {
    fn swallow() -> Self {
        Self { prevent_default: true, stop_propagation: true, ..Self::default() }
    }
}

/// Listener set attached to the root layer: `(kind, capture)`.
fn listener_set(caps: &Capabilities) -> Vec<(EventKind, bool)> {
    let mut set = Vec::with_capacity(8);
    if caps.android {
        set.push((EventKind::MouseOver, true));
        set.push((EventKind::MouseDown, true));
        set.push((EventKind::MouseUp, true));
    }
    set.push((EventKind::Click, true));
    set.push((EventKind::TouchStart, false));
    set.push((EventKind::TouchMove, false));
    set.push((EventKind::TouchEnd, false));
    set.push((EventKind::TouchCancel, false));
    set
}

/// Per-layer tap state machine.
#[derive(Debug, Clone)]
pub struct TapTracker {
    config: TapConfig,
    caps: Capabilities,
    tracking: bool,
    tracking_start: f64,
    target: Option<Element>,
    start: Point,
    last_click_time: f64,
    last_touch_identifier: i64,
    cancel_next_click: bool,
    attached: bool,
}

impl TapTracker {
    #[must_use]
    pub fn new(config: TapConfig, caps: Capabilities) -> Self {
        Self {
            config,
            caps,
            tracking: false,
            tracking_start: 0.0,
            target: None,
            start: Point::default(),
            last_click_time: f64::NEG_INFINITY,
            last_touch_identifier: 0,
            cancel_next_click: false,
            attached: false,
        }
    }

    /// Whether a touch is currently a tap candidate.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Register the tracker's listeners on `layer`. Idempotent.
    pub fn attach(&mut self, layer: &mut dyn EventLayer) {
        if self.attached {
            return;
        }
        for (kind, capture) in listener_set(&self.caps) {
            layer.add_listener(kind, capture);
        }
        self.attached = true;
    }

    /// Remove every listener [`attach`](Self::attach) added.
    pub fn destroy(&mut self, layer: &mut dyn EventLayer) {
        if !self.attached {
            return;
        }
        for (kind, capture) in listener_set(&self.caps) {
            layer.remove_listener(kind, capture);
        }
        self.attached = false;
        self.reset();
    }

    pub fn on_touch_start(&mut self, ev: &TouchSample) -> TouchStart {
        if ev.touches.len() != 1 {
            return TouchStart::Ignored;
        }
        let touch = ev.touches[0];

        if self.caps.ios && !self.caps.ios4 {
            if touch.identifier != 0 && touch.identifier == self.last_touch_identifier {
                return TouchStart::Ignored;
            }
            self.last_touch_identifier = touch.identifier;
        }

        self.tracking = true;
        self.tracking_start = ev.timestamp;
        self.target = Some(ev.target.clone());
        self.start = touch.page;

        let prevent_default = ev.timestamp - self.last_click_time < self.config.tap_delay;
        TouchStart::Tracking { prevent_default }
    }

    fn touch_has_moved(&self, ev: &TouchSample) -> bool {
        let Some(touch) = ev.touches.first() else {
            return false;
        };
        let boundary = self.config.touch_boundary;
        (touch.page.x - self.start.x).abs() > boundary || (touch.page.y - self.start.y).abs() > boundary
    }

    /// Returns whether the touch is still a tap candidate.
    pub fn on_touch_move(&mut self, ev: &TouchSample) -> bool {
        if !self.tracking {
            return false;
        }
        let same_target = self.target.as_ref().is_some_and(|t| t.id == ev.target.id);
        if !same_target || self.touch_has_moved(ev) {
            trace!(target_id = ev.target.id, "tap: touch moved, tracking cancelled");
            self.tracking = false;
            self.target = None;
        }
        self.tracking
    }

    pub fn on_touch_end(&mut self, ev: &TouchSample) -> TapOutcome {
        if !self.tracking {
            return TapOutcome::NotTracking;
        }
        if ev.timestamp - self.last_click_time < self.config.tap_delay {
            self.cancel_next_click = true;
            return TapOutcome::DoubleTap;
        }
        if ev.timestamp - self.tracking_start > self.config.tap_timeout {
            return TapOutcome::Held;
        }

        self.cancel_next_click = false;
        self.last_click_time = ev.timestamp;
        let tracking_start = self.tracking_start;
        self.tracking = false;
        self.tracking_start = 0.0;

        let Some(target) = self.target.clone() else {
            return TapOutcome::NotTracking;
        };

        if target.tag != "label" && target.needs_focus(&self.caps) {
            if ev.timestamp - tracking_start > FOCUS_TAP_LIMIT_MS {
                self.target = None;
                return TapOutcome::FocusTimedOut;
            }
            if !self.caps.ios || target.tag != "select" {
                self.target = None;
            }
            return TapOutcome::Click { target: target.id, focus: true };
        }

        if target.needs_click(&self.caps) {
            return TapOutcome::Native { target: target.id };
        }
        TapOutcome::Click { target: target.id, focus: false }
    }

    pub fn on_touch_cancel(&mut self) {
        self.tracking = false;
        self.target = None;
    }

    /// Filter a mouse event. Returns whether it may propagate.
    pub fn on_mouse(&mut self, ev: &MouseSample) -> bool {
        let Some(target) = &self.target else {
            return true;
        };
        if ev.forwarded || !ev.cancelable {
            return true;
        }
        target.needs_click(&self.caps) && !self.cancel_next_click
    }

    /// Filter a click event. Returns whether it may propagate.
    pub fn on_click(&mut self, ev: &MouseSample) -> bool {
        if self.tracking {
            self.target = None;
            self.tracking = false;
            return true;
        }
        if ev.keyboard_submit {
            return true;
        }
        let permitted = self.on_mouse(ev);
        if !permitted {
            self.target = None;
        }
        permitted
    }

    /// Run one event through the tracker and say what the host must do.
    pub fn handle(&mut self, event: &TapEvent) -> TapEffects {
        match event {
            TapEvent::TouchStart(ev) => match self.on_touch_start(ev) {
                TouchStart::Tracking { prevent_default } => TapEffects { prevent_default, ..TapEffects::default() },
                TouchStart::Ignored => TapEffects::default(),
            },
            TapEvent::TouchMove(ev) => {
                self.on_touch_move(ev);
                TapEffects::default()
            }
            TapEvent::TouchEnd(ev) => match self.on_touch_end(ev) {
                TapOutcome::Click { target, focus } => TapEffects {
                    // An iOS select keeps its target and its default action.
                    prevent_default: !(focus && self.target.is_some()),
                    stop_propagation: false,
                    focus: focus.then_some(target),
                    click: Some(target),
                },
                _ => TapEffects::default(),
            },
            TapEvent::TouchCancel => {
                self.on_touch_cancel();
                TapEffects::default()
            }
            TapEvent::Mouse(ev) => {
                if self.on_mouse(ev) { TapEffects::default() } else { TapEffects::swallow() }
            }
            TapEvent::Click(ev) => {
                if self.on_click(ev) { TapEffects::default() } else { TapEffects::swallow() }
            }
        }
    }

    fn reset(&mut self) {
        self.tracking = false;
        self.tracking_start = 0.0;
        self.target = None;
        self.cancel_next_click = false;
    }
}
