//! Utility functions.
//!
//! Collection of helpers used across the renderer.

/// Escape HTML special characters in text content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a value placed inside a double-quoted attribute.
pub fn attr_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

/// Format a stagger step as a CSS seconds value, e.g. `0.2s`.
///
/// Integer millisecond math keeps `3 * 0.2` from printing as `0.6000000000000001s`.
pub fn stagger_delay(index: usize, step_ms: u64) -> String {
    let millis = index as u64 * step_ms;
    format!("{}s", millis as f64 / 1000.0)
}
