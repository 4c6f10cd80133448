//! Per-document-type content records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four fixed document templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Witness statement
    WitnessStatement,
    /// Skeleton argument
    SkeletonArgument,
    /// Position statement
    PositionStatement,
    /// Draft order
    DraftOrder,
}

impl DocumentKind {
    /// All kinds in wizard order.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::WitnessStatement,
        DocumentKind::SkeletonArgument,
        DocumentKind::PositionStatement,
        DocumentKind::DraftOrder,
    ];

    /// Label used as the first filename component.
    pub fn file_label(self) -> &'static str {
        match self {
            DocumentKind::WitnessStatement => "Witness_Statement",
            DocumentKind::SkeletonArgument => "Skeleton_Argument",
            DocumentKind::PositionStatement => "Position_Statement",
            DocumentKind::DraftOrder => "Draft_Order",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            DocumentKind::WitnessStatement => "Witness Statement",
            DocumentKind::SkeletonArgument => "Skeleton Argument",
            DocumentKind::PositionStatement => "Position Statement",
            DocumentKind::DraftOrder => "Draft Order",
        }
    }

    /// Wizard identifier, e.g. "witness-statement".
    pub fn id(self) -> &'static str {
        match self {
            DocumentKind::WitnessStatement => "witness-statement",
            DocumentKind::SkeletonArgument => "skeleton-argument",
            DocumentKind::PositionStatement => "position-statement",
            DocumentKind::DraftOrder => "draft-order",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DocumentKind::ALL
            .into_iter()
            .find(|k| k.id() == wanted)
            .ok_or_else(|| format!("unknown document type: {}", s))
    }
}

/// An exhibit attached to a witness statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Stored mark, e.g. "JAS-2"
    pub mark: String,

    /// Document type from the fixed vocabulary, or the custom type
    #[serde(rename = "type")]
    pub kind: String,

    /// Free description, possibly ending in ", dated …"
    #[serde(default)]
    pub description: Option<String>,
}

impl Exhibit {
    /// Create an exhibit.
    pub fn new(mark: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            mark: mark.into(),
            kind: kind.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// The listing line: "MARK: Type (description)".
    pub fn listing(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() => format!("{}: {} ({})", self.mark, self.kind, desc),
            _ => format!("{}: {}", self.mark, self.kind),
        }
    }
}

/// Witness statement fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WitnessStatement {
    pub witness_name: String,
    pub witness_role: String,
    pub witness_address: String,
    /// "First", "Second", …
    pub statement_ordinal: String,
    pub exhibit_mark: String,
    pub introduction: String,
    pub paragraphs: Vec<String>,
    pub exhibits: Vec<Exhibit>,
}

/// Skeleton argument fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkeletonArgument {
    pub hearing_date: Option<NaiveDate>,
    pub hearing_type: String,
    pub time_estimate: String,
    pub introduction: String,
    pub issues: String,
    pub law: String,
    pub application: String,
    pub relief: String,
    /// One authority per line
    pub authorities: String,
}

/// Position statement fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PositionStatement {
    pub hearing_date: Option<NaiveDate>,
    pub on_behalf_of: String,
    pub introduction: String,
    pub current_position: String,
    /// One order per line
    pub orders_sought: String,
    pub outstanding: String,
}

/// Draft order fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DraftOrder {
    /// Title such as "ORDER" or "CASE MANAGEMENT ORDER"
    pub order_type: String,
    pub judge_name: String,
    /// One recital per line
    pub recitals: String,
    pub provisions: String,
    pub service_provisions: String,
    pub costs_provisions: String,
}

/// Content for one document, tagged by document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DocumentContent {
    WitnessStatement(WitnessStatement),
    SkeletonArgument(SkeletonArgument),
    PositionStatement(PositionStatement),
    DraftOrder(DraftOrder),
}

impl DocumentContent {
    /// The variant tag.
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentContent::WitnessStatement(_) => DocumentKind::WitnessStatement,
            DocumentContent::SkeletonArgument(_) => DocumentKind::SkeletonArgument,
            DocumentContent::PositionStatement(_) => DocumentKind::PositionStatement,
            DocumentContent::DraftOrder(_) => DocumentKind::DraftOrder,
        }
    }

    /// Empty content of the given kind.
    pub fn blank(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::WitnessStatement => WitnessStatement::default().into(),
            DocumentKind::SkeletonArgument => SkeletonArgument::default().into(),
            DocumentKind::PositionStatement => PositionStatement::default().into(),
            DocumentKind::DraftOrder => DraftOrder::default().into(),
        }
    }

    /// Witness name when this is a witness statement with a name.
    pub fn witness_name(&self) -> Option<&str> {
        match self {
            DocumentContent::WitnessStatement(ws) => {
                Some(ws.witness_name.trim()).filter(|n| !n.is_empty())
            }
            _ => None,
        }
    }
}

impl From<WitnessStatement> for DocumentContent {
    fn from(value: WitnessStatement) -> Self {
        DocumentContent::WitnessStatement(value)
    }
}

impl From<SkeletonArgument> for DocumentContent {
    fn from(value: SkeletonArgument) -> Self {
        DocumentContent::SkeletonArgument(value)
    }
}

impl From<PositionStatement> for DocumentContent {
    fn from(value: PositionStatement) -> Self {
        DocumentContent::PositionStatement(value)
    }
}

impl From<DraftOrder> for DocumentContent {
    fn from(value: DraftOrder) -> Self {
        DocumentContent::DraftOrder(value)
    }
}
