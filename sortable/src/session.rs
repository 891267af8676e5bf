//! Drag session state: the gesture tracked between pointer-down and cleanup.
//!
//! `DragState` moves `Idle → Armed → Dragging → Settling → Idle`. Each active
//! variant carries everything needed to place the helper, relocate the
//! placeholder, and commit or discard the move. A session is never reused;
//! cleanup drops it and the next gesture starts from a fresh `Armed`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Serialize;

use crate::candidate::Candidate;
use crate::config::SortOptions;
use crate::easing::{Easing, Tween};
use crate::geometry::{Point, Rect};
use crate::registry::{ContainerId, ItemId, Templates};

/// Where the dragged item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    pub item: ItemId,
    pub container: ContainerId,
    pub index: usize,
}

/// Document position of the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    Before(ItemId),
    After(ItemId),
    /// Last child of an (empty) container.
    AppendTo(ContainerId),
}

/// Context captured at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub source: Source,
    pub options: SortOptions,
    /// Pointer position at pointer-down.
    pub start: Point,
    pub started_at: f64,
    /// Pointer offset within the source element, as fractions of its size.
    pub offset: Point,
    pub source_rect: Rect,
    /// Bounds of the containment ancestor, if any.
    pub containment: Option<Rect>,
    pub templates: Templates,
}

impl Gesture {
    /// Whether the source was hidden at pointer-down (custom helper).
    #[must_use]
    pub fn hides_source_early(&self) -> bool {
        self.templates.helper.is_some()
    }
}

/// A drag that has moved at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub gesture: Gesture,
    /// Current helper box.
    pub helper: Rect,
    pub placeholder: Anchor,
    /// Candidates from the latest move, nearest first.
    pub candidates: Vec<Candidate>,
    /// Last best non-placeholder candidate.
    pub target: Option<Candidate>,
    /// Item currently carrying the candidate highlight.
    pub highlighted: Option<ItemId>,
    pub grid: bool,
}

impl DragSession {
    #[must_use]
    pub fn new(gesture: Gesture, grid: bool) -> Self {
        let helper = gesture.source_rect;
        let placeholder = Anchor::After(gesture.source.item);
        Self { gesture, helper, placeholder, candidates: Vec::new(), target: None, highlighted: None, grid }
    }

    /// Helper origin for `pointer`: the pointer keeps its fractional offset
    /// inside the helper, and the helper stays inside the containment box.
    #[must_use]
    pub fn helper_origin(&self, pointer: Point) -> Point {
        let origin = Point::new(
            pointer.x - self.gesture.offset.x * self.helper.width,
            pointer.y - self.gesture.offset.y * self.helper.height,
        );
        match &self.gesture.containment {
            Some(bounds) => self.helper.clamp_origin_within(origin, bounds),
            None => origin,
        }
    }
}

/// Helper travelling from its drop position to the placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Revert {
    x: Tween,
    y: Tween,
}

impl Revert {
    #[must_use]
    pub fn new(from: Point, to: Point, duration: f64) -> Self {
        Self {
            x: Tween::new(from.x, to.x, duration, Easing::EaseInOutQuad),
            y: Tween::new(from.y, to.y, duration, Easing::EaseInOutQuad),
        }
    }

    /// Advance by `dt` ms and return the helper origin.
    pub fn advance(&mut self, dt: f64) -> Point {
        Point::new(self.x.advance(dt), self.y.advance(dt))
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.x.is_done() && self.y.is_done()
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.x.duration
    }
}

/// Phase of one sortable group's gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Pointer is down on an item but has not moved.
    Armed(Gesture),
    /// Placeholder inserted; the helper follows the pointer.
    Dragging(DragSession),
    /// Dropped; the helper is animating back to the placeholder.
    Settling { session: DragSession, revert: Revert },
}

impl DragState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The item being dragged, if any.
    #[must_use]
    pub fn source_item(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Armed(gesture) => Some(gesture.source.item),
            Self::Dragging(session) | Self::Settling { session, .. } => Some(session.gesture.source.item),
        }
    }
}
