//! Splitting free-text fields into paragraph-sized pieces.

use std::sync::OnceLock;

use regex::Regex;

use crate::format::normalize_text;
use crate::model::Instruction;

fn blank_line() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("blank-line pattern is valid"))
}

/// Trimmed value of an optional text field, or `None` when blank.
pub(crate) fn present(field: &str) -> Option<&str> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Split on blank lines into trimmed, non-empty paragraphs.
pub(crate) fn paragraphs(field: &str) -> Vec<String> {
    let normalized = normalize_text(field);
    blank_line()
        .split(&normalized)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on single newlines into trimmed, non-empty lines.
pub(crate) fn lines(field: &str) -> Vec<String> {
    normalize_text(field)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ordinal counter for one numbered block. Every block owns its own.
#[derive(Debug, Default)]
pub(crate) struct Numbering {
    last: u32,
}

impl Numbering {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Numbered paragraph carrying the next ordinal.
    pub(crate) fn next(&mut self, text: impl Into<String>) -> Instruction {
        self.last += 1;
        Instruction::numbered(self.last, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let parts = paragraphs("First para\nstill first\n\nSecond\n  \nThird\n\n\n");
        assert_eq!(parts, vec!["First para\nstill first", "Second", "Third"]);
    }

    #[test]
    fn test_lines_drop_blanks() {
        assert_eq!(lines("a\n\n  b  \r\nc"), vec!["a", "b", "c"]);
        assert!(lines("   ").is_empty());
    }

    #[test]
    fn test_present() {
        assert_eq!(present("  x "), Some("x"));
        assert_eq!(present(" \n "), None);
    }

    #[test]
    fn test_numbering_starts_at_one() {
        let mut n = Numbering::new();
        assert_eq!(n.next("a").number(), Some(1));
        assert_eq!(n.next("b").number(), Some(2));
        assert_eq!(Numbering::new().next("c").number(), Some(1));
    }
}
