use super::*;

// =============================================================
// Helpers
// =============================================================

const TREE: &str = r#"{
  "sections": [
    { "section": "General", "subsections": [
      { "subsection": "Welcome", "content": "<p>hi</p>", "notes": "smile" },
      { "subsection": "Agenda", "content": "<ol></ol>" }
    ]},
    { "section": "Advertising", "subsections": [
      { "subsection": "Print", "content": "<img>" },
      { "subsection": "Digital", "content": "<video>" }
    ]},
    { "section": "Empty" }
  ]
}"#;

fn tree() -> ContentTree {
    ContentTree::from_json(TREE).unwrap()
}

// =============================================================
// Loading
// =============================================================

#[test]
fn loads_sections_in_order() {
    let t = tree();
    let names: Vec<_> = t.sections.iter().map(|s| s.section.as_str()).collect();
    assert_eq!(names, ["General", "Advertising", "Empty"]);
    assert!(t.section("Empty").unwrap().subsections.is_empty());
}

#[test]
fn missing_fields_default() {
    let t = tree();
    let agenda = t.find("Agenda").unwrap();
    assert_eq!(agenda.notes, "");
    assert!(!agenda.disabled);
}

#[test]
fn malformed_json_is_an_error() {
    let err = ContentTree::from_json("{\"sections\": 3}").unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}

#[test]
fn disabled_flag_only_serialized_when_set() {
    let mut t = tree();
    assert!(!t.to_json().unwrap().contains("disabled"));
    t.set_disabled("Print", true).unwrap();
    let json = t.to_json().unwrap();
    assert_eq!(json.matches("\"disabled\": true").count(), 1);
    assert_eq!(ContentTree::from_json(&json).unwrap(), t);
}

// =============================================================
// Lookups
// =============================================================

#[test]
fn subsections_flatten_in_tree_order() {
    let t = tree();
    let names: Vec<_> = t.subsections().map(|s| s.subsection.as_str()).collect();
    assert_eq!(names, ["Welcome", "Agenda", "Print", "Digital"]);
    assert_eq!(t.len(), 4);
    assert!(!t.is_empty());
    assert!(ContentTree::default().is_empty());
}

#[test]
fn parent_and_section_index() {
    let t = tree();
    assert_eq!(t.section_index("Advertising"), Some(1));
    assert_eq!(t.section_index("Nope"), None);
    assert_eq!(t.parent_of("Digital"), Some(1));
    assert_eq!(t.parent_of("Welcome"), Some(0));
    assert_eq!(t.parent_of("Nope"), None);
}

#[test]
fn set_disabled_unknown_name_fails() {
    let mut t = tree();
    let err = t.set_disabled("Nope", true).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownSubsection(name) if name == "Nope"));
}
