//! Renderer-agnostic rendering instructions.
//!
//! A [`Layout`] is the ordered instruction sequence derived from a case
//! record and a content record. Every output adapter consumes the same
//! sequence, so preview and exports cannot drift apart.

use serde::{Deserialize, Serialize};

use super::DocumentKind;

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

/// Run-level emphasis applied to a whole paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl TextStyle {
    /// Bold emphasis.
    pub const BOLD: TextStyle = TextStyle {
        bold: true,
        italic: false,
    };

    /// Italic emphasis.
    pub const ITALIC: TextStyle = TextStyle {
        bold: false,
        italic: true,
    };
}

/// One block-level rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// A heading. Level 1 is the document title, level 2 a section heading.
    Heading {
        /// Heading text
        text: String,
        /// Heading level (1-6)
        level: u8,
    },

    /// A paragraph, optionally carrying its ordinal within a numbered block.
    Paragraph {
        /// Paragraph text
        text: String,
        /// Ordinal within the enclosing numbered block
        numbered: Option<u32>,
        /// Alignment
        #[serde(default)]
        align: Alignment,
        /// Emphasis
        #[serde(default)]
        style: TextStyle,
    },

    /// A full-width horizontal rule.
    Rule,

    /// A "Key: value" line with an emphasised key.
    KeyValue {
        /// Label
        key: String,
        /// Value
        value: String,
    },

    /// A signature block ("Signed", "Name", "Date").
    SignatureBlock {
        /// Name of the signatory
        name: String,
    },
}

impl Instruction {
    /// Create a heading, clamping the level to 1-6.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Instruction::Heading {
            text: text.into(),
            level: level.clamp(1, 6),
        }
    }

    /// Create a plain, left-aligned paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Instruction::Paragraph {
            text: text.into(),
            numbered: None,
            align: Alignment::Left,
            style: TextStyle::default(),
        }
    }

    /// Create a numbered paragraph.
    pub fn numbered(number: u32, text: impl Into<String>) -> Self {
        Instruction::Paragraph {
            text: text.into(),
            numbered: Some(number),
            align: Alignment::Left,
            style: TextStyle::default(),
        }
    }

    /// Create a styled, aligned paragraph.
    pub fn styled(text: impl Into<String>, align: Alignment, style: TextStyle) -> Self {
        Instruction::Paragraph {
            text: text.into(),
            numbered: None,
            align,
            style,
        }
    }

    /// Create a key-value line.
    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Instruction::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a signature block.
    pub fn signature(name: impl Into<String>) -> Self {
        Instruction::SignatureBlock { name: name.into() }
    }

    /// The ordinal of a numbered paragraph.
    pub fn number(&self) -> Option<u32> {
        match self {
            Instruction::Paragraph { numbered, .. } => *numbered,
            _ => None,
        }
    }

    /// Primary text carried by the instruction.
    pub fn text(&self) -> Option<&str> {
        match self {
            Instruction::Heading { text, .. } | Instruction::Paragraph { text, .. } => Some(text),
            Instruction::KeyValue { value, .. } => Some(value),
            Instruction::SignatureBlock { name } => Some(name),
            Instruction::Rule => None,
        }
    }
}

/// Signature block lines shared by every adapter.
pub fn signature_lines(name: &str) -> [String; 3] {
    [
        "Signed: ____________________________".to_string(),
        format!("Name: {}", name),
        "Date: ____________________________".to_string(),
    ]
}

/// A built document: its kind, title and instruction sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Document type
    pub kind: DocumentKind,

    /// Document title as printed in the heading
    pub title: String,

    /// Ordered instructions
    pub instructions: Vec<Instruction>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new(kind: DocumentKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            instructions: Vec::new(),
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the layout has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over the instructions.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Texts of all headings of the given level.
    pub fn headings(&self, level: u8) -> Vec<&str> {
        self.instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::Heading { text, level: l } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(
            Instruction::heading("X", 9),
            Instruction::Heading {
                text: "X".into(),
                level: 6
            }
        );
        assert!(matches!(
            Instruction::heading("X", 0),
            Instruction::Heading { level: 1, .. }
        ));
    }

    #[test]
    fn test_numbered_paragraph() {
        let p = Instruction::numbered(3, "Third");
        assert_eq!(p.number(), Some(3));
        assert_eq!(p.text(), Some("Third"));
        assert_eq!(Instruction::Rule.number(), None);
    }

    #[test]
    fn test_layout_headings() {
        let mut layout = Layout::new(DocumentKind::SkeletonArgument, "SKELETON ARGUMENT");
        layout.push(Instruction::heading("SKELETON ARGUMENT", 1));
        layout.push(Instruction::heading("Issues", 2));
        layout.push(Instruction::paragraph("text"));
        assert_eq!(layout.headings(2), vec!["Issues"]);
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn test_instruction_json_shape() {
        let json = serde_json::to_string(&Instruction::Rule).unwrap();
        assert_eq!(json, r#"{"type":"rule"}"#);
    }
}
