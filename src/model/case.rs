//! Case-level types: parties and the case record.

use serde::{Deserialize, Serialize};

/// Role text that selects the "Accredited Legal Representative" phrasing.
pub const ACCREDITED_LEGAL_REPRESENTATIVE: &str = "Accredited Legal Representative";

/// How the proceedings are styled, which decides the separator between parties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProceedingStyle {
    /// Adversarial proceedings ("- v -")
    Adversarial,
    /// Non-adversarial proceedings ("- and -")
    #[default]
    NonAdversarial,
}

impl ProceedingStyle {
    /// Separator printed between consecutive parties.
    pub fn separator(self) -> &'static str {
        match self {
            ProceedingStyle::Adversarial => "- v -",
            ProceedingStyle::NonAdversarial => "- and -",
        }
    }
}

impl std::str::FromStr for ProceedingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adversarial" => Ok(ProceedingStyle::Adversarial),
            "non-adversarial" | "nonadversarial" => Ok(ProceedingStyle::NonAdversarial),
            other => Err(format!("unknown proceeding style: {}", other)),
        }
    }
}

/// A party to the proceedings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Party name as entered
    pub name: String,

    /// Designation, e.g. "Applicant" or "Respondent"
    pub designation: String,

    /// Whether a litigation friend acts for this party
    #[serde(default)]
    pub has_litigation_friend: bool,

    /// Name of the litigation friend
    #[serde(default)]
    pub litigation_friend_name: Option<String>,

    /// Litigation friend prefix or role
    #[serde(default)]
    pub litigation_friend_role: Option<String>,
}

impl Party {
    /// Create a party without a litigation friend.
    pub fn new(name: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            designation: designation.into(),
            has_litigation_friend: false,
            litigation_friend_name: None,
            litigation_friend_role: None,
        }
    }

    /// Attach a litigation friend.
    pub fn with_litigation_friend(
        mut self,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.has_litigation_friend = true;
        self.litigation_friend_name = Some(name.into());
        self.litigation_friend_role = Some(role.into());
        self
    }

    /// The parenthesised litigation-friend line, if one should be printed.
    ///
    /// Only the exact role "Accredited Legal Representative" selects the
    /// representative wording; every other role prints "his/her litigation friend".
    pub fn litigation_friend_line(&self) -> Option<String> {
        if !self.has_litigation_friend {
            return None;
        }
        let name = self
            .litigation_friend_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())?;

        let phrase = match self.litigation_friend_role.as_deref() {
            Some(ACCREDITED_LEGAL_REPRESENTATIVE) => "her Accredited Legal Representative",
            _ => "his/her litigation friend",
        };
        Some(format!("(By {} {})", phrase, name))
    }
}

/// Normalised case metadata shared by every document type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Court name, one line per row of the heading
    #[serde(default)]
    pub court: String,

    /// Case number (required)
    pub case_number: String,

    /// "IN THE MATTER OF" statute line
    #[serde(default)]
    pub matter_of_statute: Option<String>,

    /// "IN THE MATTER OF:" person or property
    #[serde(default)]
    pub matter_of_person: Option<String>,

    /// Parties in heading order
    #[serde(default)]
    pub parties: Vec<Party>,

    /// Proceeding style
    #[serde(default)]
    pub proceeding_style: ProceedingStyle,
}

impl CaseRecord {
    /// Create a case record with a case number and no parties.
    pub fn new(case_number: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            ..Default::default()
        }
    }

    /// Set the court heading.
    pub fn with_court(mut self, court: impl Into<String>) -> Self {
        self.court = court.into();
        self
    }

    /// Add a party.
    pub fn with_party(mut self, party: Party) -> Self {
        self.parties.push(party);
        self
    }

    /// Set the proceeding style.
    pub fn with_style(mut self, style: ProceedingStyle) -> Self {
        self.proceeding_style = style;
        self
    }

    /// Set the statute line.
    pub fn with_statute(mut self, statute: impl Into<String>) -> Self {
        self.matter_of_statute = Some(statute.into());
        self
    }

    /// Set the person or property line.
    pub fn with_person(mut self, person: impl Into<String>) -> Self {
        self.matter_of_person = Some(person.into());
        self
    }

    /// Court heading split into its non-empty lines.
    pub fn court_lines(&self) -> impl Iterator<Item = &str> {
        self.court.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    /// Designation of the first party, if any.
    pub fn first_designation(&self) -> Option<&str> {
        self.parties
            .first()
            .map(|p| p.designation.trim())
            .filter(|d| !d.is_empty())
    }
}
