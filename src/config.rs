//! Binary configuration, read from the environment after `.env` is loaded.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use catalog::presentation::DEFAULT_TITLE;

pub const DEFAULT_HOST: &str = "localhost:9898";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckConfig {
    /// Content JSON path; the bundled demo tree is used when unset.
    pub content: Option<PathBuf>,
    /// Host written into share links.
    pub host: String,
    /// Title for presentations built from the command line.
    pub title: String,
}

impl DeckConfig {
    /// Load from `DECK_CONTENT`, `DECK_HOST`, `DECK_TITLE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            content: env_value("DECK_CONTENT").map(PathBuf::from),
            host: env_or("DECK_HOST", DEFAULT_HOST),
            title: env_or("DECK_TITLE", DEFAULT_TITLE),
        }
    }
}

/// Value of `key`, treating blank as unset.
pub(crate) fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env_value(key).unwrap_or_else(|| default.to_owned())
}
