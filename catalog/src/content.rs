//! The content tree: sections of subsections, each an opaque markup card.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// One card. `content` and `notes` are markup the catalog never parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// Display name; also the identifier used in share links.
    pub subsection: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub notes: String,
    /// Set while the card sits in the custom presentation.
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl Subsection {
    #[must_use]
    pub fn new(name: &str, content: &str) -> Self {
        Self { subsection: name.to_owned(), content: content.to_owned(), notes: String::new(), disabled: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentTree {
    pub sections: Vec<Section>,
}

impl ContentTree {
    /// # Errors
    ///
    /// Returns `Json` if `raw` is not a content tree.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns `Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every subsection in tree order.
    pub fn subsections(&self) -> impl Iterator<Item = &Subsection> {
        self.sections.iter().flat_map(|s| s.subsections.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subsections().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subsections().next().is_none()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.section == name)
    }

    #[must_use]
    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.section == name)
    }

    /// Index of the section holding subsection `name`.
    #[must_use]
    pub fn parent_of(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.subsections.iter().any(|sub| sub.subsection == name))
    }

    /// First subsection called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Subsection> {
        self.subsections().find(|s| s.subsection == name)
    }

    /// Flag every subsection called `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSubsection` if no subsection matches.
    pub fn set_disabled(&mut self, name: &str, disabled: bool) -> Result<(), CatalogError> {
        let mut found = false;
        for sub in self.sections.iter_mut().flat_map(|s| s.subsections.iter_mut()) {
            if sub.subsection == name {
                sub.disabled = disabled;
                found = true;
            }
        }
        if found { Ok(()) } else { Err(CatalogError::UnknownSubsection(name.to_owned())) }
    }
}
