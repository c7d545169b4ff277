//! Comment records set aside by the tokenizer.
//!
//! Comments never reach the AST; the tokenizer collects them into a list
//! sorted by line number, and the formatter threads that list back into the
//! output at the structurally correct positions.

use serde::{Deserialize, Serialize};

/// A single comment, with enough surrounding-whitespace information to
/// reconstruct blank-line spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Original source line, 1-based.
    pub line: u32,
    /// Comment text including the leading `#`, already normalized.
    pub text: String,
    /// Blank lines between the previous content and this comment,
    /// clamped to the 0/1/2 buckets.
    pub blank_before: u8,
    /// Blank lines between this comment and the next content, clamped.
    pub blank_after: u8,
}

impl Comment {
    pub fn new(line: u32, text: impl Into<String>) -> Comment {
        Comment {
            line,
            text: Comment::normalize_text(&text.into()),
            blank_before: 0,
            blank_after: 0,
        }
    }

    /// Clamp a raw blank-line count into the 0/1/2 buckets the formatter
    /// distinguishes between.
    pub fn clamp_blanks(count: u32) -> u8 {
        match count {
            0 => 0,
            1 => 1,
            _ => 2,
        }
    }

    /// Normalize raw comment text the way the tokenizer is expected to:
    /// `#` followed by exactly one space, except for shebang lines and pure
    /// separators such as `#####`.
    pub fn normalize_text(raw: &str) -> String {
        let trimmed = raw.trim_end();

        if trimmed.starts_with("#!") {
            return trimmed.to_string();
        }

        let body = trimmed.trim_start_matches('#');
        let hashes = trimmed.len() - body.len();

        if body.is_empty() {
            // A bare `#` or a separator row of hashes.
            return trimmed.to_string();
        }

        if body.starts_with(' ') {
            trimmed.to_string()
        } else {
            format!("{} {}", &trimmed[..hashes], body)
        }
    }
}
