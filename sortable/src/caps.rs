//! Platform capability probe.
//!
//! Resolved once from the user-agent string at startup; everything that
//! varies by device reads the resulting [`Capabilities`] instead of sniffing
//! on each event.

#[cfg(test)]
#[path = "caps_test.rs"]
mod caps_test;

/// Device traits that change how taps and clicks are handled.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Android fires its own mouse events after touches; they need capturing.
    pub android: bool,
    /// iOS needs native clicks on file inputs and repeats touch identifiers.
    pub ios: bool,
    /// iOS 4 lacks touch identifiers.
    pub ios4: bool,
    pub windows_phone: bool,
}

impl Capabilities {
    /// Classify a user-agent string.
    #[must_use]
    pub fn from_user_agent(ua: &str) -> Self {
        let windows_phone = ua.contains("Windows Phone");
        let android = !windows_phone && ua.find("Android").is_some_and(|pos| pos > 0);
        let ios = !windows_phone && ["iPad", "iPhone", "iPod"].iter().any(|d| ua.contains(d));
        let ios4 = ios && has_os4_marker(ua);
        Self { android, ios, ios4, windows_phone }
    }
}

/// Matches `OS 4_x` or `OS 4_x_y`.
fn has_os4_marker(ua: &str) -> bool {
    ua.match_indices("OS 4_").any(|(pos, marker)| {
        ua[pos + marker.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}
