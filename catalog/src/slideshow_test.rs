use super::*;

// =============================================================
// Helpers
// =============================================================

/// Content order is the reverse of the order the tests request.
fn tree() -> ContentTree {
    ContentTree::from_json(
        r#"{"sections": [
            {"section": "Advertising", "subsections": [
                {"subsection": "Print", "content": "<p>print</p>"},
                {"subsection": "Digital", "content": "<p>digital</p>"},
                {"subsection": "Out of home", "content": "<p>ooh</p>"}
            ]}
        ]}"#,
    )
    .unwrap()
}

fn names(show: &Slideshow) -> Vec<&str> {
    show.slides.iter().map(|s| s.subsection.as_str()).collect()
}

// =============================================================
// Query parsing
// =============================================================

#[test]
fn parses_with_and_without_question_mark() {
    let a = SlideshowQuery::parse("?custom=Print,Digital&title=Pitch").unwrap();
    let b = SlideshowQuery::parse("custom=Print,Digital&title=Pitch").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.ids, ["Print", "Digital"]);
}

#[test]
fn parses_full_link() {
    let q = SlideshowQuery::parse("http://localhost:9898/custom.html?title=Big-deck&custom=Out-of-home#top").unwrap();
    assert_eq!(q.title, "Big deck");
    assert_eq!(q.ids, ["Out of home"]);
}

#[test]
fn decodes_percent_escapes() {
    let q = SlideshowQuery::parse("custom=R%26D%2C-Q1,Print&title=A%2BB").unwrap();
    assert_eq!(q.ids, ["R&D, Q1", "Print"]);
    assert_eq!(q.title, "A+B");
}

#[test]
fn skips_empty_ids() {
    let q = SlideshowQuery::parse("custom=Print,,Digital,&title=x").unwrap();
    assert_eq!(q.ids, ["Print", "Digital"]);
}

#[test]
fn missing_params_are_errors() {
    assert!(matches!(
        SlideshowQuery::parse("title=x").unwrap_err(),
        CatalogError::MissingParam("custom")
    ));
    assert!(matches!(
        SlideshowQuery::parse("custom=Print").unwrap_err(),
        CatalogError::MissingParam("title")
    ));
}

#[test]
fn bad_escape_is_an_error() {
    let err = SlideshowQuery::parse("custom=%FF&title=x").unwrap_err();
    assert!(matches!(err, CatalogError::Encoding { .. }));
}

// =============================================================
// Apply order
// =============================================================

#[test]
fn slides_follow_query_order() {
    let show = Slideshow::from_query("custom=Digital,Print&title=t", &tree()).unwrap();
    assert_eq!(names(&show), ["Digital", "Print"]);
}

#[test]
fn unknown_ids_skipped_and_duplicates_kept() {
    let show = Slideshow::from_query("custom=Print,Radio,Print&title=t", &tree()).unwrap();
    assert_eq!(names(&show), ["Print", "Print"]);
}

#[test]
fn presentation_link_round_trips() {
    let mut t = tree();
    let mut p = crate::presentation::Presentation::new("Client pitch");
    p.add(&mut t, "Out of home").unwrap();
    p.add(&mut t, "Print").unwrap();
    let show = Slideshow::from_query(&p.share_link("h"), &tree()).unwrap();
    assert_eq!(show.title, "Client pitch");
    assert_eq!(names(&show), ["Out of home", "Print"]);
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn starts_on_first_slide() {
    let show = Slideshow::from_query("custom=Digital,Print&title=t", &tree()).unwrap();
    assert_eq!(show.index(), 1);
    assert_eq!(show.current().unwrap().subsection, "Digital");
}

#[test]
fn navigation_clamps_at_both_ends() {
    let mut show = Slideshow::from_query("custom=Print,Digital,Out-of-home&title=t", &tree()).unwrap();
    show.go_prev();
    assert_eq!(show.index(), 1);
    show.go_next();
    show.go_next();
    show.go_next();
    assert_eq!(show.index(), 3);
    assert_eq!(show.current().unwrap().subsection, "Out of home");
}

#[test]
fn arrow_keys_navigate() {
    let mut show = Slideshow::from_query("custom=Print,Digital&title=t", &tree()).unwrap();
    assert!(show.key(KEY_RIGHT));
    assert_eq!(show.index(), 2);
    assert!(show.key(KEY_LEFT));
    assert_eq!(show.index(), 1);
    assert!(!show.key(13));
    assert_eq!(show.index(), 1);
}

#[test]
fn go_to_checks_range() {
    let mut show = Slideshow::from_query("custom=Print,Digital&title=t", &tree()).unwrap();
    show.go_to(2).unwrap();
    assert_eq!(show.index(), 2);
    assert!(matches!(show.go_to(0).unwrap_err(), CatalogError::OutOfRange { index: 0, len: 2 }));
    assert!(matches!(show.go_to(3).unwrap_err(), CatalogError::OutOfRange { index: 3, len: 2 }));
}

#[test]
fn empty_show_has_no_current_slide() {
    let mut show = Slideshow::from_query("custom=&title=t", &tree()).unwrap();
    assert!(show.is_empty());
    assert_eq!(show.index(), 1);
    assert!(show.current().is_none());
    show.go_next();
    show.go_prev();
    assert_eq!(show.index(), 1);
}
