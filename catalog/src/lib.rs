//! Presentation catalog: the content tree, custom presentations assembled
//! from it, and the slideshow that replays one from its share link.
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Sections and subsections, loaded from JSON |
//! | [`presentation`] | Ordered custom subset, share links, saved collections |
//! | [`slideshow`] | Share-link query parsing, apply-order, slide navigation |
//! | [`browser`] | Catalog browsing state: selected section, expanded card |

pub mod browser;
pub mod content;
pub mod error;
pub mod presentation;
pub mod slideshow;

pub use error::CatalogError;
