//! Draft files: a case record and one content record saved as JSON.
//!
//! A draft is what the wizard holds at the preview step, so it can be
//! rendered without going through a [`Session`](crate::session::Session).

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::build::{self, text, BuildOptions};
use crate::error::{Result, ValidationError};
use crate::model::{CaseRecord, DocumentContent, Layout};
use crate::session::MIN_PARTIES;

/// A saved case plus document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Case metadata
    pub case: CaseRecord,

    /// Content for the chosen document type
    pub content: DocumentContent,

    /// "Prepared by" signatory
    #[serde(default, alias = "prepared_by", skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,

    /// Date printed under the signatory
    #[serde(default, alias = "document_date", skip_serializing_if = "Option::is_none")]
    pub document_date: Option<NaiveDate>,
}

impl Draft {
    /// Create a draft without attestation lines.
    pub fn new(case: CaseRecord, content: impl Into<DocumentContent>) -> Self {
        Self {
            case,
            content: content.into(),
            prepared_by: None,
            document_date: None,
        }
    }

    /// Parse a draft from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a draft from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply the same checks the case-details step applies.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if text::present(&self.case.case_number).is_none() {
            return Err(ValidationError::MissingCaseNumber);
        }
        let named = self
            .case
            .parties
            .iter()
            .filter(|p| text::present(&p.name).is_some())
            .count();
        if named < MIN_PARTIES {
            return Err(ValidationError::TooFewParties);
        }
        Ok(())
    }

    /// Drop party rows with blank names, then validate.
    ///
    /// The wizard never keeps an unnamed party, so a draft built outside it
    /// is brought to the same shape before it reaches the builder.
    pub fn checked(mut self) -> std::result::Result<Self, ValidationError> {
        self.case
            .parties
            .retain(|p| text::present(&p.name).is_some());
        self.validate()?;
        Ok(self)
    }

    /// Attestation options carried by the draft.
    pub fn build_options(&self) -> BuildOptions {
        let mut options = BuildOptions::new();
        if let Some(name) = &self.prepared_by {
            options = options.with_prepared_by(name.as_str());
        }
        if let Some(date) = self.document_date {
            options = options.with_document_date(date);
        }
        options
    }

    /// Build the instruction sequence.
    pub fn layout(&self) -> Layout {
        build::build_with(&self.case, &self.content, &self.build_options())
    }
}
