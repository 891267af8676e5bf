//! Drop-candidate ranking and grid/list layout detection.
//!
//! On every drag step the engine collects one candidate per visible item in
//! the group, one per empty container, and one for the placeholder itself,
//! then sorts them by squared distance to the pointer. The nearest entry
//! decides where the placeholder goes next. Keeping the placeholder in the
//! set means a pointer resting near it selects it again, so the placeholder
//! does not jitter between neighbours.

#[cfg(test)]
#[path = "candidate_test.rs"]
mod candidate_test;

use std::collections::HashMap;

use crate::geometry::Point;
use crate::layout::{Layout, Node};
use crate::registry::{ContainerId, Group, ItemId, Member};

/// What a candidate refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A registered item; `after` places the drop behind it.
    Item { item: ItemId, after: bool },
    /// A container with no items of its own.
    EmptyContainer,
    /// The placeholder's current position.
    Placeholder,
}

/// One possible drop location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub kind: CandidateKind,
    /// Owning container; `None` for the placeholder.
    pub container: Option<ContainerId>,
    /// Index of the candidate within its container at ranking time.
    pub target_index: usize,
    /// Squared distance from the candidate center to the pointer.
    pub distance_sq: f64,
}

impl Candidate {
    /// The candidate that may become the drop target (not the placeholder).
    #[must_use]
    pub fn is_target(&self) -> bool {
        !matches!(self.kind, CandidateKind::Placeholder)
    }

    /// Item to highlight, if this candidate is an item.
    #[must_use]
    pub fn item(&self) -> Option<ItemId> {
        match self.kind {
            CandidateKind::Item { item, .. } => Some(item),
            _ => None,
        }
    }
}

/// Whether a drop near `center` should land after it.
///
/// Grids compare along x, lists along y.
#[must_use]
pub fn should_be_after(center: Point, pointer: Point, grid: bool) -> bool {
    if grid { center.x < pointer.x } else { center.y < pointer.y }
}

/// Everything the ranking needs besides the group itself.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub pointer: Point,
    pub grid: bool,
    /// Selector candidates must match or sit within.
    pub containment: Option<&'a str>,
    /// The dragged item; hidden while dragging and never a candidate.
    pub source: Option<ItemId>,
}

/// Rank the drop candidates of `group` for `query`, nearest first.
///
/// Ties keep registration order; the placeholder is ranked last among equals.
#[must_use]
pub fn compute_candidates(group: &Group, layout: &dyn Layout, query: &Query<'_>) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(group.len() + 1);

    for member in group.members() {
        let node = match *member {
            Member::Item(id) => Node::Item(id),
            Member::Container(id) => Node::Container(id),
        };
        if let Some(selector) = query.containment {
            if !layout.within(node, selector) {
                continue;
            }
        }
        let Some(rect) = layout.bounds(node) else {
            continue;
        };
        let center = rect.center();
        let distance_sq = center.distance_sq(query.pointer);

        match *member {
            Member::Item(item) => {
                if Some(item) == query.source || !layout.is_visible(node) {
                    continue;
                }
                let (Some(container), Some(target_index)) = (group.container_of(item), group.index_of(item)) else {
                    continue;
                };
                candidates.push(Candidate {
                    kind: CandidateKind::Item { item, after: should_be_after(center, query.pointer, query.grid) },
                    container: Some(container),
                    target_index,
                    distance_sq,
                });
            }
            Member::Container(container) => {
                if rect.is_empty() || !group.items(container).is_some_and(<[ItemId]>::is_empty) {
                    continue;
                }
                candidates.push(Candidate {
                    kind: CandidateKind::EmptyContainer,
                    container: Some(container),
                    target_index: 0,
                    distance_sq,
                });
            }
        }
    }

    if let Some(rect) = layout.bounds(Node::Placeholder) {
        candidates.push(Candidate {
            kind: CandidateKind::Placeholder,
            container: None,
            target_index: 0,
            distance_sq: rect.center().distance_sq(query.pointer),
        });
    }

    candidates.sort_by(|a, b| a.distance_sq.total_cmp(&b.distance_sq));
    candidates
}

/// Detect a multi-column layout.
///
/// Items are grouped by container and their top edges sorted; two items of
/// one container whose tops are within `tolerance` of each other sit side by
/// side, which makes the whole group a grid. Hidden items report a zero top
/// and are skipped.
#[must_use]
pub fn detect_grid(group: &Group, layout: &dyn Layout, tolerance: f64) -> bool {
    let mut tops: HashMap<ContainerId, Vec<f64>> = HashMap::new();
    for member in group.members() {
        let Member::Item(item) = *member else {
            continue;
        };
        let (Some(container), Some(rect)) = (group.container_of(item), layout.bounds(Node::Item(item))) else {
            continue;
        };
        tops.entry(container).or_default().push(rect.top);
    }

    tops.values_mut().any(|column| {
        column.sort_by(f64::total_cmp);
        column
            .windows(2)
            .any(|pair| pair[0] > 0.0 && (pair[1] - pair[0]).abs() <= tolerance)
    })
}
