//! Sorting and scrolling options.
//!
//! Options arrive from host markup as attribute strings. Parsing is strict:
//! any malformed value is a setup error returned to the integrator rather
//! than a silent fallback.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::SortableError;
use crate::consts::{DEFAULT_CONTAINMENT, REVERT_MS, SCROLL_DURATION_MS};
use crate::easing::Easing;

/// Which point is compared against candidates while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    /// The pointer position.
    #[default]
    Pointer,
    /// The center of the helper element.
    Element,
}

/// Grid-vs-list layout selection for a sortable group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Detect from item positions whenever membership changes.
    #[default]
    Auto,
    /// Multi-column: "after" compares x.
    Grid,
    /// Single column: "after" compares y.
    List,
}

impl GridMode {
    /// Parse the `grid` attribute. Only `"true"` and `"false"` are accepted.
    pub fn from_attr(raw: &str) -> Result<Self, SortableError> {
        match raw {
            "true" => Ok(Self::Grid),
            "false" => Ok(Self::List),
            other => Err(SortableError::InvalidGrid(other.to_owned())),
        }
    }
}

/// Per-item drag options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOptions {
    pub tolerance: Tolerance,
    /// Maximum revert animation length in ms; `None` drops without animating.
    pub revert: Option<f64>,
    /// Selector the candidates and the helper must stay within.
    pub containment: Option<String>,
    pub grid: GridMode,
    /// Vertical distance in px under which two tops count as one row.
    pub grid_tolerance: f64,
    /// Pointer travel in px before an armed gesture becomes a drag.
    pub drag_threshold: f64,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::Pointer,
            revert: Some(REVERT_MS),
            containment: Some(DEFAULT_CONTAINMENT.to_owned()),
            grid: GridMode::Auto,
            grid_tolerance: 0.0,
            drag_threshold: 0.0,
        }
    }
}

impl SortOptions {
    /// Build options from attribute key/value pairs, starting from defaults.
    ///
    /// Recognized keys: `tolerance`, `revert`, `containment`, `grid`,
    /// `gridTolerance`, `dragThreshold`. Unknown keys are ignored.
    pub fn from_attrs<'a, I>(attrs: I) -> Result<Self, SortableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut opts = Self::default();
        for (key, value) in attrs {
            match key {
                "tolerance" => {
                    opts.tolerance = match value {
                        "pointer" => Tolerance::Pointer,
                        "element" => Tolerance::Element,
                        other => return Err(SortableError::InvalidTolerance(other.to_owned())),
                    };
                }
                "revert" => opts.revert = parse_revert(value)?,
                "containment" => {
                    let trimmed = value.trim();
                    opts.containment = if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) };
                }
                "grid" => opts.grid = GridMode::from_attr(value)?,
                "gridTolerance" => opts.grid_tolerance = parse_non_negative("gridTolerance", value)?,
                "dragThreshold" => opts.drag_threshold = parse_non_negative("dragThreshold", value)?,
                _ => {}
            }
        }
        Ok(opts)
    }

    /// Revert duration for a helper that has `distance` px left to travel.
    ///
    /// Constant speed, capped at the configured maximum.
    #[must_use]
    pub fn revert_duration(&self, distance: f64) -> Option<f64> {
        let max = self.revert?;
        Some((max * distance / crate::consts::REVERT_DISTANCE_PX).min(max))
    }
}

fn parse_revert(raw: &str) -> Result<Option<f64>, SortableError> {
    if raw == "false" {
        return Ok(None);
    }
    let ms = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| SortableError::InvalidRevert(raw.to_owned()))?;
    if !ms.is_finite() || ms < 0.0 {
        return Err(SortableError::InvalidRevert(raw.to_owned()));
    }
    Ok(if ms <= 0.0 { None } else { Some(ms) })
}

fn parse_non_negative(field: &'static str, raw: &str) -> Result<f64, SortableError> {
    let invalid = || SortableError::InvalidNumber { field, value: raw.to_owned() };
    let value = raw.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// Options for one smooth-scroll invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollOptions {
    /// Element id of the scroll container; the window scrolls when absent.
    pub container_id: Option<String>,
    pub duration: f64,
    /// Pixels subtracted from the target position.
    pub offset: f64,
    pub easing: Easing,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self { container_id: None, duration: SCROLL_DURATION_MS, offset: 0.0, easing: Easing::default() }
    }
}

impl ScrollOptions {
    /// Build options from attribute key/value pairs, starting from defaults.
    ///
    /// Recognized keys: `containerId`, `duration`, `offset`, `easing`.
    /// Empty values keep the default, matching unset attributes.
    pub fn from_attrs<'a, I>(attrs: I) -> Result<Self, SortableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut opts = Self::default();
        for (key, value) in attrs {
            if value.trim().is_empty() {
                continue;
            }
            match key {
                "containerId" => opts.container_id = Some(value.trim().to_owned()),
                "duration" => {
                    let duration = parse_non_negative("duration", value)?;
                    if duration > 0.0 {
                        opts.duration = duration;
                    }
                }
                "offset" => {
                    opts.offset = value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| SortableError::InvalidNumber { field: "offset", value: value.to_owned() })?;
                }
                "easing" => opts.easing = value.trim().parse()?,
                _ => {}
            }
        }
        Ok(opts)
    }
}
