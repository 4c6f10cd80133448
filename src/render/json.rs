//! JSON rendering of the instruction model, for inspection and tooling.
//!
//! The output is the exact instruction sequence all three adapters consume,
//! tagged by instruction type, so it shows what the preview and both exports
//! will draw. `courtdocs inspect` prints it, and it deserializes back into a
//! [`Layout`] that can be rendered later without the case data.

use crate::error::{Error, Result};
use crate::model::Layout;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a layout as its tagged instruction sequence.
pub fn to_json(layout: &Layout, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(layout),
        JsonFormat::Compact => serde_json::to_string(layout),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, Instruction};

    fn layout() -> Layout {
        let mut layout = Layout::new(DocumentKind::SkeletonArgument, "SKELETON ARGUMENT");
        layout.push(Instruction::heading("Issues", 2));
        layout.push(Instruction::numbered(1, "Whether the threshold is crossed"));
        layout
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&layout(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"kind\": \"skeleton-argument\""));
        assert!(json.contains("\"type\": \"heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&layout(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout());
    }
}
