// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Cursor marker helpers
//!
//! Completion tests write the buffer with a `|` where the caret sits,
//! e.g. `SELECT * FROM |`. Buffers that need a literal `|` should build
//! the offset by hand instead.

/// Byte offset of the cursor marker
pub fn get_cursor_position(input: &str) -> Option<usize> {
    input.find('|')
}

/// Remove cursor marker from input SQL
pub fn remove_cursor_marker(input: &str) -> String {
    input.replacen('|', "", 1)
}

/// Split a marked buffer into the clean buffer and the cursor offset
///
/// # Panics
///
/// Panics if the input has no `|` marker.
pub fn split_cursor(input: &str) -> (String, usize) {
    let offset = get_cursor_position(input)
        .unwrap_or_else(|| panic!("missing cursor marker in {input:?}"));
    (remove_cursor_marker(input), offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cursor() {
        let (buffer, offset) = split_cursor("SELECT * FROM |");
        assert_eq!(buffer, "SELECT * FROM ");
        assert_eq!(offset, buffer.len());

        let (buffer, offset) = split_cursor("SELECT o.| FROM orders o");
        assert_eq!(&buffer[..offset], "SELECT o.");
    }

    #[test]
    fn test_missing_marker() {
        assert_eq!(get_cursor_position("SELECT 1"), None);
    }
}
