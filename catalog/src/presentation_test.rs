use uuid::Uuid;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn tree() -> ContentTree {
    ContentTree::from_json(
        r#"{"sections": [
            {"section": "General", "subsections": [
                {"subsection": "Welcome"}, {"subsection": "Our team"}
            ]},
            {"section": "Advertising", "subsections": [
                {"subsection": "Print"}, {"subsection": "Digital"}
            ]}
        ]}"#,
    )
    .unwrap()
}

fn sorted(from_container: Uuid, to_container: Uuid, index_from: usize, index_to: usize) -> SortCompleted {
    SortCompleted { item: Uuid::new_v4(), from_container, to_container, index_from, index_to }
}

// =============================================================
// Add / remove
// =============================================================

#[test]
fn starts_empty_with_default_title() {
    let p = Presentation::default();
    assert_eq!(p.title(), DEFAULT_TITLE);
    assert!(p.is_empty());
}

#[test]
fn add_disables_card_and_appends() {
    let mut t = tree();
    let mut p = Presentation::default();
    assert_eq!(p.add(&mut t, "Print").unwrap(), 0);
    assert_eq!(p.add(&mut t, "Welcome").unwrap(), 1);
    assert_eq!(p.slides(), ["Print", "Welcome"]);
    assert!(t.find("Print").unwrap().disabled);
    assert!(!t.find("Digital").unwrap().disabled);
}

#[test]
fn add_twice_is_rejected() {
    let mut t = tree();
    let mut p = Presentation::default();
    p.add(&mut t, "Print").unwrap();
    let err = p.add(&mut t, "Print").unwrap_err();
    assert!(matches!(err, CatalogError::AlreadyAdded(_)));
    assert_eq!(p.len(), 1);
}

#[test]
fn add_unknown_is_rejected() {
    let mut t = tree();
    let mut p = Presentation::default();
    let err = p.add(&mut t, "Radio").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownSubsection(_)));
    assert!(p.is_empty());
}

#[test]
fn remove_reenables_card() {
    let mut t = tree();
    let mut p = Presentation::default();
    p.add(&mut t, "Print").unwrap();
    p.add(&mut t, "Digital").unwrap();
    assert_eq!(p.remove(&mut t, "Print").unwrap(), 0);
    assert_eq!(p.slides(), ["Digital"]);
    assert!(!t.find("Print").unwrap().disabled);
    // The card can be picked again.
    assert_eq!(p.add(&mut t, "Print").unwrap(), 1);
}

#[test]
fn remove_absent_fails() {
    let mut t = tree();
    let mut p = Presentation::default();
    let err = p.remove(&mut t, "Print").unwrap_err();
    assert!(matches!(err, CatalogError::NotInPresentation(_)));
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn apply_sort_within_list_reorders() {
    let mut t = tree();
    let mut p = Presentation::default();
    for name in ["Welcome", "Print", "Digital"] {
        p.add(&mut t, name).unwrap();
    }
    let list = Uuid::new_v4();
    assert!(p.apply_sort(&sorted(list, list, 2, 0)));
    assert_eq!(p.slides(), ["Digital", "Welcome", "Print"]);
}

#[test]
fn apply_sort_across_lists_is_ignored() {
    let mut t = tree();
    let mut p = Presentation::default();
    p.add(&mut t, "Welcome").unwrap();
    p.add(&mut t, "Print").unwrap();
    assert!(!p.apply_sort(&sorted(Uuid::new_v4(), Uuid::new_v4(), 0, 1)));
    assert_eq!(p.slides(), ["Welcome", "Print"]);
}

#[test]
fn reorder_out_of_range_is_noop() {
    let mut t = tree();
    let mut p = Presentation::default();
    p.add(&mut t, "Welcome").unwrap();
    assert!(!p.reorder(3, 0));
    assert_eq!(p.slides(), ["Welcome"]);
}

// =============================================================
// Links
// =============================================================

#[test]
fn share_link_hyphenates_names_and_title() {
    let mut t = tree();
    let mut p = Presentation::new("Quarterly review");
    p.add(&mut t, "Our team").unwrap();
    p.add(&mut t, "Print").unwrap();
    assert_eq!(
        p.share_link("localhost:9898"),
        "http://localhost:9898/custom.html?custom=Our-team,Print&title=Quarterly-review"
    );
}

#[test]
fn empty_presentation_link_has_empty_custom() {
    let p = Presentation::default();
    assert_eq!(p.share_link("h"), "http://h/custom.html?custom=&title=Custom-presentation");
}

#[test]
fn unsafe_characters_are_percent_encoded() {
    assert_eq!(hyphenate("R&D, Q1"), "R%26D%2C-Q1");
}

#[test]
fn save_snapshots_with_relative_link() {
    let mut t = tree();
    let mut p = Presentation::default();
    p.add(&mut t, "Digital").unwrap();
    p.set_title("Pitch");
    let saved = p.save();
    assert_eq!(saved.title, "Pitch");
    assert_eq!(saved.slides, ["Digital"]);
    assert_eq!(saved.link, "custom.html?custom=Digital&title=Pitch");
    let json = serde_json::to_string(&saved).unwrap();
    assert_eq!(serde_json::from_str::<UserCollection>(&json).unwrap(), saved);
}
