//! Custom presentations: an ordered pick of subsections with a title.
//!
//! Adding a subsection disables its card in the content tree so it cannot be
//! picked twice; removing it enables the card again. Order changes arrive
//! from the sortable engine as `SortCompleted` notifications.

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;

use serde::{Deserialize, Serialize};
use sortable::engine::SortCompleted;
use sortable::reorder;
use tracing::debug;

use crate::CatalogError;
use crate::content::ContentTree;

pub const DEFAULT_TITLE: &str = "Custom presentation";

/// Page that replays a presentation.
pub const SLIDESHOW_PAGE: &str = "custom.html";

/// Share-link encoding of one name: spaces become hyphens, then anything
/// unsafe in a query value is percent-encoded.
#[must_use]
pub fn hyphenate(name: &str) -> String {
    urlencoding::encode(&name.replace(' ', "-")).into_owned()
}

/// Query string (without `?`) for `slides` under `title`.
#[must_use]
pub fn share_query(slides: &[String], title: &str) -> String {
    let custom: Vec<String> = slides.iter().map(|s| hyphenate(s)).collect();
    format!("custom={}&title={}", custom.join(","), hyphenate(title))
}

/// A saved presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCollection {
    pub title: String,
    pub slides: Vec<String>,
    /// Relative slideshow link.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    title: String,
    slides: Vec<String>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl Presentation {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self { title: title.to_owned(), slides: Vec::new() }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    /// Subsection names in presentation order.
    #[must_use]
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slides.iter().any(|s| s == name)
    }

    /// Append subsection `name` and disable its card. Returns its index.
    ///
    /// # Errors
    ///
    /// `UnknownSubsection` if the tree has no such card, `AlreadyAdded` if it
    /// is already part of the presentation.
    pub fn add(&mut self, tree: &mut ContentTree, name: &str) -> Result<usize, CatalogError> {
        let card = tree.find(name).ok_or_else(|| CatalogError::UnknownSubsection(name.to_owned()))?;
        if card.disabled || self.contains(name) {
            return Err(CatalogError::AlreadyAdded(name.to_owned()));
        }
        tree.set_disabled(name, true)?;
        self.slides.push(name.to_owned());
        debug!(subsection = name, len = self.slides.len(), "added to presentation");
        Ok(self.slides.len() - 1)
    }

    /// Remove subsection `name` and enable its card again. Returns the index
    /// it was removed from.
    ///
    /// # Errors
    ///
    /// `NotInPresentation` if `name` was never added.
    pub fn remove(&mut self, tree: &mut ContentTree, name: &str) -> Result<usize, CatalogError> {
        let index = self
            .slides
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| CatalogError::NotInPresentation(name.to_owned()))?;
        self.slides.remove(index);
        if let Err(e) = tree.set_disabled(name, false) {
            debug!(subsection = name, error = %e, "removed slide has no card");
        }
        debug!(subsection = name, index, "removed from presentation");
        Ok(index)
    }

    /// Move the slide at `from` to `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        reorder::move_item(&mut self.slides, from, to)
    }

    /// Mirror a completed drag within the presentation list.
    ///
    /// Moves between different lists are not ours to apply and are ignored.
    pub fn apply_sort(&mut self, done: &SortCompleted) -> bool {
        if done.from_container != done.to_container {
            debug!(item = %done.item, "cross-list sort ignored by presentation");
            return false;
        }
        self.reorder(done.index_from, done.index_to)
    }

    /// Absolute share link on `host`.
    #[must_use]
    pub fn share_link(&self, host: &str) -> String {
        format!("http://{host}/{SLIDESHOW_PAGE}?{}", share_query(&self.slides, &self.title))
    }

    /// Snapshot as a saved collection with a relative link.
    #[must_use]
    pub fn save(&self) -> UserCollection {
        UserCollection {
            title: self.title.clone(),
            slides: self.slides.clone(),
            link: format!("{SLIDESHOW_PAGE}?{}", share_query(&self.slides, &self.title)),
        }
    }
}
