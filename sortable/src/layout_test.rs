use uuid::Uuid;

use super::*;

#[test]
fn bounds_of_unknown_node_is_none() {
    let layout = StaticLayout::new();
    assert_eq!(layout.bounds(Node::Placeholder), None);
    assert!(!layout.is_visible(Node::Placeholder));
}

#[test]
fn hidden_and_empty_nodes_are_invisible() {
    let mut layout = StaticLayout::new();
    let a = Node::Item(Uuid::new_v4());
    let b = Node::Item(Uuid::new_v4());
    layout.set(a, Rect::new(0.0, 0.0, 10.0, 10.0));
    layout.set(b, Rect::new(0.0, 0.0, 0.0, 10.0));
    assert!(layout.is_visible(a));
    assert!(!layout.is_visible(b));

    layout.hide(a);
    assert!(!layout.is_visible(a));
    assert!(layout.bounds(a).is_some());
    layout.show(a);
    assert!(layout.is_visible(a));
}

#[test]
fn undeclared_selector_contains_everything() {
    let layout = StaticLayout::new();
    assert!(layout.within(Node::Item(Uuid::new_v4()), "html"));
}

#[test]
fn regions_restrict_membership() {
    let mut layout = StaticLayout::new();
    let inside = Uuid::new_v4();
    let outside = Uuid::new_v4();
    let board = Rect::new(0.0, 0.0, 300.0, 300.0);
    layout.region(".board", board, [Node::Item(inside)]);

    assert!(layout.within(Node::Item(inside), ".board"));
    assert!(!layout.within(Node::Item(outside), ".board"));
    assert_eq!(layout.containment_bounds(inside, ".board"), Some(board));
    assert_eq!(layout.containment_bounds(outside, ".board"), None);
    assert_eq!(layout.containment_bounds(inside, ".missing"), None);
}

#[test]
fn removed_node_has_no_bounds() {
    let mut layout = StaticLayout::new();
    let node = Node::Container(Uuid::new_v4());
    layout.set(node, Rect::new(1.0, 2.0, 3.0, 4.0));
    layout.remove(node);
    assert_eq!(layout.bounds(node), None);
}
