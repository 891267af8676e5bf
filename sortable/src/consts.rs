//! Shared numeric constants for the sortable crate.

// ── Tap tracking ────────────────────────────────────────────────

/// Pixels a touch may travel before it stops counting as a tap.
pub const TOUCH_BOUNDARY_PX: f64 = 10.0;

/// Minimum gap in milliseconds between two resolved taps.
pub const TAP_DELAY_MS: f64 = 200.0;

/// Longest press in milliseconds that still synthesizes a click.
pub const TAP_TIMEOUT_MS: f64 = 700.0;

/// A focusable target held longer than this is left to the browser.
pub const FOCUS_TAP_LIMIT_MS: f64 = 100.0;

// ── Sorting ─────────────────────────────────────────────────────

/// Default revert animation length in milliseconds.
pub const REVERT_MS: f64 = 200.0;

/// Distance in pixels the helper covers in one `revert` period.
pub const REVERT_DISTANCE_PX: f64 = 200.0;

/// Default containment selector.
pub const DEFAULT_CONTAINMENT: &str = "html";

// ── Scrolling ───────────────────────────────────────────────────

/// Scroll animation tick interval in milliseconds.
pub const SCROLL_TICK_MS: f64 = 16.0;

/// Default scroll animation length in milliseconds.
pub const SCROLL_DURATION_MS: f64 = 800.0;
