//! Presentation helpers for list and popup content.
//!
//! # Responsibility
//! - Build the filtered/sorted list representation from repository state.
//! - Escape user-controlled text before it is interpolated into HTML.

pub mod list;

/// Escapes text for safe interpolation into HTML content.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
