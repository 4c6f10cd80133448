//! Formatting helpers shared by the builder, the session and the adapters.
//!
//! Everything here is pure: long-form dates, exhibit marks, download
//! filenames and HTML escaping.

use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;

use crate::model::{CaseRecord, DocumentContent};

/// Mark prefix used when the witness name yields no initials.
pub const FALLBACK_INITIALS: &str = "XX";

/// Format a date in the long British form, e.g. "3 June 2025".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// ISO date used in filenames, e.g. "2025-06-03".
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Upper-cased first letters of the space-separated name tokens.
///
/// Returns "XX" when the name has no tokens.
pub fn exhibit_initials(witness_name: &str) -> String {
    let initials: String = witness_name
        .split(' ')
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        FALLBACK_INITIALS.to_string()
    } else {
        initials
    }
}

/// Exhibit mark for the given witness and sequence number, e.g. "JAS-2".
pub fn exhibit_mark(witness_name: &str, sequence: u32) -> String {
    format!("{}-{}", exhibit_initials(witness_name), sequence)
}

/// Combine an exhibit description with an optional document date.
///
/// `"Letter", 2025-06-03` gives `"Letter, dated 3 June 2025"`; with no
/// description only `"dated 3 June 2025"` remains.
pub fn exhibit_description(description: &str, date: Option<NaiveDate>) -> String {
    let description = description.trim();
    match date {
        Some(date) if description.is_empty() => format!("dated {}", long_date(date)),
        Some(date) => format!("{}, dated {}", description, long_date(date)),
        None => description.to_string(),
    }
}

/// Replace every character outside `[A-Za-z0-9]` with an underscore.
pub fn sanitize_filename_part(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Download filename: `{Label}_{WitnessNameOrCaseNumber}_{ISODate}.{ext}`.
///
/// The witness name is used only for witness statements that have one;
/// otherwise the case number, or "Draft" when that is empty.
pub fn filename(case: &CaseRecord, content: &DocumentContent, date: NaiveDate, ext: &str) -> String {
    let label = content.kind().file_label();
    let subject = match content.witness_name() {
        Some(name) => sanitize_filename_part(name),
        None if !case.case_number.trim().is_empty() => {
            sanitize_filename_part(case.case_number.trim())
        }
        None => "Draft".to_string(),
    };

    format!(
        "{}_{}_{}.{}",
        label,
        subject,
        iso_date(date),
        ext.trim_start_matches('.')
    )
}

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// NFC-normalise free text and unify line endings.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DraftOrder, WitnessStatement};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(date(2025, 6, 3)), "3 June 2025");
        assert_eq!(long_date(date(2024, 12, 25)), "25 December 2024");
    }

    #[test]
    fn test_exhibit_initials() {
        assert_eq!(exhibit_initials("John Adam Smith"), "JAS");
        assert_eq!(exhibit_initials("jane doe"), "JD");
        assert_eq!(exhibit_initials(""), "XX");
        assert_eq!(exhibit_initials("Ann  Lee"), "AL");
    }

    #[test]
    fn test_exhibit_mark() {
        assert_eq!(exhibit_mark("John Adam Smith", 2), "JAS-2");
        assert_eq!(exhibit_mark("", 1), "XX-1");
    }

    #[test]
    fn test_exhibit_description() {
        let d = Some(date(2025, 6, 3));
        assert_eq!(exhibit_description("Letter", d), "Letter, dated 3 June 2025");
        assert_eq!(exhibit_description("  ", d), "dated 3 June 2025");
        assert_eq!(exhibit_description("Letter", None), "Letter");
    }

    #[test]
    fn test_filename_uses_witness_name() {
        let case = CaseRecord::new("CASE/2024-001");
        let content: DocumentContent = WitnessStatement {
            witness_name: "Jane Doe".into(),
            ..Default::default()
        }
        .into();
        assert_eq!(
            filename(&case, &content, date(2025, 6, 3), "pdf"),
            "Witness_Statement_Jane_Doe_2025-06-03.pdf"
        );
    }

    #[test]
    fn test_filename_falls_back_to_case_number() {
        let case = CaseRecord::new("CASE/2024-001");
        let content: DocumentContent = DraftOrder::default().into();
        assert_eq!(
            filename(&case, &content, date(2025, 6, 3), "docx"),
            "Draft_Order_CASE_2024_001_2025-06-03.docx"
        );

        let empty = CaseRecord::new("");
        assert_eq!(
            filename(&empty, &content, date(2025, 6, 3), ".pdf"),
            "Draft_Order_Draft_2025-06-03.pdf"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Smith & \"Jones\"</b>"),
            "&lt;b&gt;Smith &amp; &quot;Jones&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(normalize_text("e\u{301}"), "\u{e9}");
    }
}
