//! Plain text rendering for built layouts.

use crate::model::{signature_lines, Alignment, Instruction, Layout};

/// Rule line width in characters.
const RULE_WIDTH: usize = 72;

/// Convert a layout to plain text.
///
/// Headings of level 1 and right-aligned lines are padded to the rule
/// width so the header reads like the printed document.
pub fn to_text(layout: &Layout) -> String {
    let mut output = String::new();

    for instruction in layout {
        match instruction {
            Instruction::Heading { text, level: 1 } => {
                output.push_str(&pad(text, Alignment::Center));
                output.push('\n');
            }
            Instruction::Heading { text, .. } => {
                output.push('\n');
                output.push_str(text);
                output.push('\n');
            }
            Instruction::Paragraph {
                text,
                numbered: Some(n),
                ..
            } => {
                output.push_str(&format!("{}.\t{}\n", n, text));
            }
            Instruction::Paragraph { text, align, .. } => {
                for line in text.lines() {
                    output.push_str(&pad(line, *align));
                    output.push('\n');
                }
            }
            Instruction::Rule => {
                output.push_str(&"-".repeat(RULE_WIDTH));
                output.push('\n');
            }
            Instruction::KeyValue { key, value } => {
                output.push_str(&format!("{}: {}\n", key, value));
            }
            Instruction::SignatureBlock { name } => {
                output.push('\n');
                for line in signature_lines(name) {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
        }
    }

    output.trim_end().to_string()
}

fn pad(line: &str, align: Alignment) -> String {
    let width = line.chars().count();
    if width >= RULE_WIDTH {
        return line.to_string();
    }
    let gap = RULE_WIDTH - width;
    match align {
        Alignment::Left => line.to_string(),
        Alignment::Center => format!("{}{}", " ".repeat(gap / 2), line),
        Alignment::Right => format!("{}{}", " ".repeat(gap), line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, TextStyle};

    #[test]
    fn test_to_text() {
        let mut layout = Layout::new(DocumentKind::DraftOrder, "ORDER");
        layout.push(Instruction::styled("Case No: 1", Alignment::Right, TextStyle::BOLD));
        layout.push(Instruction::Rule);
        layout.push(Instruction::heading("ORDER", 1));
        layout.push(Instruction::key_value("BEFORE", "District Judge Patel"));
        layout.push(Instruction::numbered(1, "The hearing is adjourned."));

        let text = to_text(&layout);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim_start(), "Case No: 1");
        assert_eq!(lines[0].len(), RULE_WIDTH);
        assert_eq!(lines[1], "-".repeat(RULE_WIDTH));
        assert_eq!(lines[2].trim(), "ORDER");
        assert_eq!(lines[3], "BEFORE: District Judge Patel");
        assert_eq!(lines[4], "1.\tThe hearing is adjourned.");
    }

    #[test]
    fn test_signature_block() {
        let mut layout = Layout::new(DocumentKind::WitnessStatement, "W");
        layout.push(Instruction::signature("Jane Doe"));
        assert!(to_text(&layout).ends_with("Date: ____________________________"));
        assert!(to_text(&layout).contains("Name: Jane Doe"));
    }
}
