//! Catalog browsing state.
//!
//! One section is shown at a time; within it at most one card is expanded.
//! The browser also owns the custom presentation being assembled and the
//! collections saved from it.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use tracing::debug;

use crate::CatalogError;
use crate::content::{ContentTree, Section};
use crate::presentation::{Presentation, UserCollection};

#[derive(Debug, Clone, Default)]
pub struct Browser {
    tree: ContentTree,
    section: Option<usize>,
    expanded: Option<String>,
    menu_open: bool,
    presentation: Presentation,
    collections: Vec<UserCollection>,
}

impl Browser {
    #[must_use]
    pub fn new(tree: ContentTree) -> Self {
        Self { tree, ..Self::default() }
    }

    #[must_use]
    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    /// The section shown in the main area, if any.
    #[must_use]
    pub fn section(&self) -> Option<&Section> {
        self.tree.sections.get(self.section?)
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    #[must_use]
    pub fn collections(&self) -> &[UserCollection] {
        &self.collections
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Show section `name` with every card collapsed.
    ///
    /// # Errors
    ///
    /// `UnknownSection` if there is no such section.
    pub fn show_section(&mut self, name: &str) -> Result<(), CatalogError> {
        let index = self
            .tree
            .section_index(name)
            .ok_or_else(|| CatalogError::UnknownSection(name.to_owned()))?;
        self.section = Some(index);
        self.expanded = None;
        self.menu_open = false;
        debug!(section = name, "section shown");
        Ok(())
    }

    /// Show the section holding `name` with that card expanded.
    ///
    /// # Errors
    ///
    /// `UnknownSubsection` if no section holds it.
    pub fn show_subsection(&mut self, name: &str) -> Result<(), CatalogError> {
        let index = self
            .tree
            .parent_of(name)
            .ok_or_else(|| CatalogError::UnknownSubsection(name.to_owned()))?;
        self.section = Some(index);
        self.expanded = Some(name.to_owned());
        self.menu_open = false;
        Ok(())
    }

    /// Expand card `name` in the current section.
    ///
    /// # Errors
    ///
    /// `UnknownSubsection` if the shown section has no such card.
    pub fn show_details(&mut self, name: &str) -> Result<(), CatalogError> {
        if self.position_in_section(name).is_none() {
            return Err(CatalogError::UnknownSubsection(name.to_owned()));
        }
        self.expanded = Some(name.to_owned());
        Ok(())
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    /// Expand the card before the expanded one. Stays put on the first card.
    pub fn go_prev(&mut self) -> bool {
        self.step(|i, _| i.checked_sub(1))
    }

    /// Expand the card after the expanded one. Stays put on the last card.
    pub fn go_next(&mut self) -> bool {
        self.step(|i, len| (i + 1 < len).then_some(i + 1))
    }

    fn step(&mut self, next: impl Fn(usize, usize) -> Option<usize>) -> bool {
        let Some(section) = self.section() else {
            return false;
        };
        let Some(current) = self.expanded.as_deref().and_then(|name| self.position_in_section(name)) else {
            return false;
        };
        let Some(sub) = next(current, section.subsections.len()).and_then(|i| section.subsections.get(i)) else {
            return false;
        };
        let name = sub.subsection.clone();
        self.expanded = Some(name);
        true
    }

    fn position_in_section(&self, name: &str) -> Option<usize> {
        self.section()?.subsections.iter().position(|s| s.subsection == name)
    }

    /// # Errors
    ///
    /// See [`Presentation::add`].
    pub fn add_to_custom(&mut self, name: &str) -> Result<usize, CatalogError> {
        self.presentation.add(&mut self.tree, name)
    }

    /// # Errors
    ///
    /// See [`Presentation::remove`].
    pub fn remove_from_custom(&mut self, name: &str) -> Result<usize, CatalogError> {
        self.presentation.remove(&mut self.tree, name)
    }

    #[must_use]
    pub fn share_link(&self, host: &str) -> String {
        self.presentation.share_link(host)
    }

    /// Save the current presentation. Returns the saved entry.
    pub fn save_collection(&mut self) -> UserCollection {
        let saved = self.presentation.save();
        debug!(title = %saved.title, slides = saved.slides.len(), "collection saved");
        self.collections.push(saved.clone());
        saved
    }
}
