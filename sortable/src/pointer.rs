//! Input model: mouse buttons, touch points, and coordinate normalization.
//!
//! Raw DOM mouse and touch events are translated by the host into
//! [`PointerEvent`]s. [`PointerEvent::position`] is the single place that
//! turns either kind into one client-space reading for the drag engine.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use crate::geometry::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Browser-assigned contact identifier.
    pub identifier: i64,
    /// Position relative to the viewport.
    pub client: Point,
    /// Position relative to the document.
    pub page: Point,
}

impl TouchPoint {
    #[must_use]
    pub fn at(identifier: i64, x: f64, y: f64) -> Self {
        let p = Point::new(x, y);
        Self { identifier, client: p, page: p }
    }
}

/// Device-specific payload of a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse {
        client: Point,
        button: Button,
    },
    /// `touches` are the contacts still on the surface; empty on touch-end.
    Touch {
        touches: Vec<TouchPoint>,
    },
}

/// A pointer event with its timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub input: PointerInput,
    pub timestamp: f64,
}

impl PointerEvent {
    #[must_use]
    pub fn mouse(x: f64, y: f64, button: Button, timestamp: f64) -> Self {
        Self { input: PointerInput::Mouse { client: Point::new(x, y), button }, timestamp }
    }

    #[must_use]
    pub fn touch(touches: Vec<TouchPoint>, timestamp: f64) -> Self {
        Self { input: PointerInput::Touch { touches }, timestamp }
    }

    /// Normalized client position.
    ///
    /// Mouse events carry their own coordinates; touch events use the first
    /// active contact. A touch event with no contacts is not actionable.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        match &self.input {
            PointerInput::Mouse { client, .. } => Some(*client),
            PointerInput::Touch { touches } => touches.first().map(|t| t.client),
        }
    }

    /// Whether this event may start a drag: the primary mouse button, or a
    /// single touch contact.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        match &self.input {
            PointerInput::Mouse { button, .. } => *button == Button::Primary,
            PointerInput::Touch { touches } => touches.len() == 1,
        }
    }

    #[must_use]
    pub fn is_touch(&self) -> bool {
        matches!(self.input, PointerInput::Touch { .. })
    }
}

/// DOM event types the tap tracker listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseOver,
    MouseDown,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseOver => "mouseover",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
        }
    }
}

/// A surface that listeners can be attached to and detached from.
///
/// Implemented over `web_sys::EventTarget` in [`crate::web`]; tests use a
/// recording implementation.
pub trait EventLayer {
    fn add_listener(&mut self, kind: EventKind, capture: bool);
    fn remove_listener(&mut self, kind: EventKind, capture: bool);
}
