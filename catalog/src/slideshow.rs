//! Slideshow viewer: replays a presentation from its share-link query.
//!
//! The query carries `custom`, a comma-separated list of hyphenated
//! subsection names, and `title`, a hyphenated display title. Slides come
//! out in query order, not content order.

#[cfg(test)]
#[path = "slideshow_test.rs"]
mod slideshow_test;

use serde::Serialize;
use tracing::{debug, warn};

use crate::CatalogError;
use crate::content::{ContentTree, Subsection};

pub const KEY_LEFT: u32 = 37;
pub const KEY_RIGHT: u32 = 39;

fn dehyphenate(raw: &str) -> String {
    raw.replace('-', " ")
}

fn decode(param: &str, raw: &str) -> Result<String, CatalogError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| CatalogError::Encoding { param: param.to_owned(), message: e.to_string() })
}

/// Parsed share-link query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideshowQuery {
    /// Subsection names, in presentation order.
    pub ids: Vec<String>,
    pub title: String,
}

impl SlideshowQuery {
    /// Parse a query string, with or without the leading `?`, or a full link.
    ///
    /// # Errors
    ///
    /// `MissingParam` when `custom` or `title` is absent, `Encoding` on bad
    /// percent-escapes.
    pub fn parse(input: &str) -> Result<Self, CatalogError> {
        let query = input.split_once('?').map_or(input, |(_, q)| q);
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let mut custom = None;
        let mut title = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "custom" => custom = Some(value),
                "title" => title = Some(decode(key, value)?),
                _ => {}
            }
        }

        let custom = custom.ok_or(CatalogError::MissingParam("custom"))?;
        let title = title.ok_or(CatalogError::MissingParam("title"))?;
        // Split before decoding so an escaped comma stays inside its name.
        let ids = custom
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|raw| decode("custom", raw).map(|id| dehyphenate(&id)))
            .collect::<Result<_, _>>()?;
        Ok(Self { ids, title: dehyphenate(&title) })
    }

    /// Look every id up in `tree`, in query order.
    ///
    /// Unknown ids are skipped; repeated ids repeat the slide.
    #[must_use]
    pub fn resolve<'a>(&self, tree: &'a ContentTree) -> Vec<&'a Subsection> {
        self.ids
            .iter()
            .filter_map(|id| {
                let found = tree.find(id);
                if found.is_none() {
                    warn!(subsection = %id, "unknown subsection in slideshow query; skipped");
                }
                found
            })
            .collect()
    }
}

/// Slide navigation over a resolved presentation. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slideshow {
    pub title: String,
    pub slides: Vec<Subsection>,
    index: usize,
}

impl Slideshow {
    #[must_use]
    pub fn new(title: &str, slides: Vec<Subsection>) -> Self {
        Self { title: title.to_owned(), slides, index: 1 }
    }

    /// Parse `query` and resolve it against `tree`.
    ///
    /// # Errors
    ///
    /// Propagates query parse errors.
    pub fn from_query(query: &str, tree: &ContentTree) -> Result<Self, CatalogError> {
        let parsed = SlideshowQuery::parse(query)?;
        let slides: Vec<Subsection> = parsed.resolve(tree).into_iter().cloned().collect();
        debug!(title = %parsed.title, requested = parsed.ids.len(), resolved = slides.len(), "slideshow loaded");
        Ok(Self::new(&parsed.title, slides))
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The slide at `index`, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Subsection> {
        self.slides.get(self.index.checked_sub(1)?)
    }

    pub fn go_prev(&mut self) {
        self.index = self.index.saturating_sub(1).max(1);
    }

    pub fn go_next(&mut self) {
        self.index = (self.index + 1).min(self.len().max(1));
    }

    /// Jump to slide `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` outside `1..=len`.
    pub fn go_to(&mut self, index: usize) -> Result<(), CatalogError> {
        if index == 0 || index > self.len() {
            return Err(CatalogError::OutOfRange { index, len: self.len() });
        }
        self.index = index;
        Ok(())
    }

    /// Handle a key code. Returns whether it was a navigation key.
    pub fn key(&mut self, code: u32) -> bool {
        match code {
            KEY_RIGHT => self.go_next(),
            KEY_LEFT => self.go_prev(),
            _ => return false,
        }
        true
    }
}
