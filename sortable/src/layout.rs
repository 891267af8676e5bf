//! Geometry queries the host answers on behalf of the engine.
//!
//! Bounding boxes are read on demand for every drag step and never cached by
//! the engine beyond one step.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::{HashMap, HashSet};

use crate::geometry::Rect;
use crate::registry::{ContainerId, ItemId};

/// Something the engine can ask the layout about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Item(ItemId),
    Container(ContainerId),
    /// The live placeholder of the active drag, wherever it currently sits.
    Placeholder,
}

pub trait Layout {
    /// Client-space bounding box, or `None` if the node is not in the document.
    fn bounds(&self, node: Node) -> Option<Rect>;

    /// Visibility heuristic: a node with no scroll extent is hidden.
    fn is_visible(&self, node: Node) -> bool {
        self.bounds(node).is_some_and(|r| !r.is_empty())
    }

    /// Whether `node` matches `selector` or sits inside an element that does.
    fn within(&self, node: Node, selector: &str) -> bool;

    /// Bounds of the closest ancestor of `item` matching `selector`.
    fn containment_bounds(&self, item: ItemId, selector: &str) -> Option<Rect>;
}

/// A layout backed by plain maps.
///
/// Useful for hosts that lay out items themselves (canvas renderers, native
/// shells) and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    bounds: HashMap<Node, Rect>,
    hidden: HashSet<Node>,
    regions: HashMap<String, (Rect, HashSet<Node>)>,
}

impl StaticLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: Node, rect: Rect) {
        self.bounds.insert(node, rect);
    }

    pub fn remove(&mut self, node: Node) {
        self.bounds.remove(&node);
    }

    pub fn hide(&mut self, node: Node) {
        self.hidden.insert(node);
    }

    pub fn show(&mut self, node: Node) {
        self.hidden.remove(&node);
    }

    /// Declare a containment region named by `selector` holding `members`.
    pub fn region(&mut self, selector: &str, rect: Rect, members: impl IntoIterator<Item = Node>) {
        self.regions.insert(selector.to_owned(), (rect, members.into_iter().collect()));
    }
}

impl Layout for StaticLayout {
    fn bounds(&self, node: Node) -> Option<Rect> {
        self.bounds.get(&node).copied()
    }

    fn is_visible(&self, node: Node) -> bool {
        !self.hidden.contains(&node) && self.bounds(node).is_some_and(|r| !r.is_empty())
    }

    /// Undeclared selectors contain everything, like `html`.
    fn within(&self, node: Node, selector: &str) -> bool {
        self.regions.get(selector).is_none_or(|(_, members)| members.contains(&node))
    }

    fn containment_bounds(&self, item: ItemId, selector: &str) -> Option<Rect> {
        let (rect, members) = self.regions.get(selector)?;
        members.contains(&Node::Item(item)).then_some(*rect)
    }
}
