//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the crate.

use chrono::NaiveDate;

/// Date format used by the form's date input and the wire payload
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim text and drop it entirely when nothing is left
pub fn trim_non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Last non-empty segment of a slash separated path
pub fn last_path_segment(path: &str) -> Option<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).last()
}

/// Format a birth date for display and for the wire payload
pub fn format_birth_date(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_FORMAT).to_string()
}

/// Parse a birth date typed as YYYY-MM-DD
pub fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), BIRTH_DATE_FORMAT).ok()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
