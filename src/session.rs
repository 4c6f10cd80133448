//! Wizard session state.
//!
//! A [`Session`] is the owned record the form-binding layer mutates between
//! wizard steps: document type, proceeding style, paragraph and exhibit
//! lists, and the collected case and content records. The builder and the
//! renderers only ever read from it.
//!
//! Steps are numbered 1 to 4: choose a document type, enter case details,
//! write the content, preview and export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::build::{self, text, BuildOptions};
use crate::error::ValidationError;
use crate::format::{exhibit_description, exhibit_mark};
use crate::model::{
    CaseRecord, DocumentContent, DocumentKind, Exhibit, Layout, Party, ProceedingStyle,
    WitnessStatement,
};

/// First wizard step.
pub const FIRST_STEP: u8 = 1;

/// Last wizard step (preview and export).
pub const LAST_STEP: u8 = 4;

/// Exhibit type that requires a custom type to be entered.
pub const OTHER_EXHIBIT_TYPE: &str = "Other";

/// Minimum number of party entries on the case form.
pub const MIN_PARTIES: usize = 2;

/// How the witness statement body is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingMode {
    /// One entry per numbered paragraph
    #[default]
    Structured,
    /// A single free text area split on blank lines
    Free,
}

/// A paragraph entry in structured writing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphEntry {
    /// Stable identifier, e.g. "para-3"
    pub id: String,

    /// Paragraph text as typed
    pub content: String,
}

/// An exhibit together with its list identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitEntry {
    /// Stable identifier, e.g. "exhibit-2"
    pub id: String,

    /// The exhibit as it will be listed
    pub exhibit: Exhibit,
}

/// One party row on the case form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartyForm {
    /// Party name
    pub name: String,

    /// Designation, e.g. "Applicant"
    pub designation: String,

    /// Whether the litigation friend box is ticked
    pub has_litigation_friend: bool,

    /// Litigation friend name
    pub litigation_friend_name: String,

    /// Litigation friend prefix or role
    pub litigation_friend_role: String,
}

impl PartyForm {
    /// Create a party row.
    pub fn new(name: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            designation: designation.into(),
            ..Default::default()
        }
    }

    /// Tick the litigation friend box and fill its details.
    pub fn with_litigation_friend(
        mut self,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.has_litigation_friend = true;
        self.litigation_friend_name = name.into();
        self.litigation_friend_role = role.into();
        self
    }

    /// The party record, or `None` when the name is blank.
    fn to_party(&self) -> Option<Party> {
        let name = text::present(&self.name)?;
        let party = Party::new(name, self.designation.clone());
        Some(if self.has_litigation_friend {
            party.with_litigation_friend(
                self.litigation_friend_name.trim(),
                self.litigation_friend_role.clone(),
            )
        } else {
            party
        })
    }
}

/// Case details as entered on step 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseForm {
    /// Court name, possibly several lines
    pub court: String,

    /// Case number
    pub case_number: String,

    /// Statute for the "IN THE MATTER OF" line
    pub matter_of_statute: String,

    /// Person for the "IN THE MATTER OF:" line
    pub matter_of_person: String,

    /// Party rows, never fewer than two
    pub parties: Vec<PartyForm>,
}

impl Default for CaseForm {
    fn default() -> Self {
        Self {
            court: String::new(),
            case_number: String::new(),
            matter_of_statute: String::new(),
            matter_of_person: String::new(),
            parties: vec![PartyForm::default(); MIN_PARTIES],
        }
    }
}

impl CaseForm {
    /// A blank form with two empty party rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty party row.
    pub fn add_party(&mut self) -> &mut PartyForm {
        self.parties.push(PartyForm::default());
        let last = self.parties.len() - 1;
        &mut self.parties[last]
    }

    /// Remove a party row, refusing to leave fewer than two.
    pub fn remove_party(&mut self, index: usize) -> Result<PartyForm, ValidationError> {
        if self.parties.len() <= MIN_PARTIES || index >= self.parties.len() {
            return Err(ValidationError::PartyMinimum);
        }
        Ok(self.parties.remove(index))
    }
}

/// Exhibit details as entered before pressing "add".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExhibitForm {
    /// Selected document type; "Other" requires `custom_kind`
    pub kind: String,

    /// Custom type when "Other" is selected
    pub custom_kind: String,

    /// Free description
    pub description: String,

    /// Date of the exhibited document
    pub date: Option<NaiveDate>,
}

impl ExhibitForm {
    /// Create an exhibit form for a document type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Set the custom document type.
    pub fn with_custom_kind(mut self, custom: impl Into<String>) -> Self {
        self.custom_kind = custom.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the document date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// The wizard session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    step: u8,
    document_kind: Option<DocumentKind>,
    proceeding_style: ProceedingStyle,
    writing_mode: WritingMode,
    paragraphs: Vec<ParagraphEntry>,
    paragraph_counter: u32,
    free_text: String,
    exhibits: Vec<ExhibitEntry>,
    exhibit_counter: u32,
    case: Option<CaseRecord>,
    content: Option<DocumentContent>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            document_kind: None,
            proceeding_style: ProceedingStyle::default(),
            writing_mode: WritingMode::default(),
            paragraphs: Vec::new(),
            paragraph_counter: 0,
            free_text: String::new(),
            exhibits: Vec::new(),
            exhibit_counter: 0,
            case: None,
            content: None,
        }
    }
}

impl Session {
    /// Create a fresh session on step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step (1-4).
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Selected document type.
    pub fn document_kind(&self) -> Option<DocumentKind> {
        self.document_kind
    }

    /// Selected proceeding style.
    pub fn proceeding_style(&self) -> ProceedingStyle {
        self.proceeding_style
    }

    /// Selected writing mode.
    pub fn writing_mode(&self) -> WritingMode {
        self.writing_mode
    }

    /// Structured paragraph entries in order.
    pub fn paragraphs(&self) -> &[ParagraphEntry] {
        &self.paragraphs
    }

    /// Free writing text.
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// Exhibit entries in order.
    pub fn exhibits(&self) -> &[ExhibitEntry] {
        &self.exhibits
    }

    /// Collected case record.
    pub fn case(&self) -> Option<&CaseRecord> {
        self.case.as_ref()
    }

    /// Collected content record.
    pub fn content(&self) -> Option<&DocumentContent> {
        self.content.as_ref()
    }

    /// Choose the document type and move to the case details step.
    ///
    /// Content collected for a different type is discarded.
    pub fn select_document(&mut self, kind: DocumentKind) {
        if self.content.as_ref().is_some_and(|c| c.kind() != kind) {
            self.content = None;
        }
        self.document_kind = Some(kind);
        self.step = 2;
        log::debug!("selected document type {}", kind.id());
    }

    /// Set the proceeding style used when case details are collected.
    pub fn set_proceeding_style(&mut self, style: ProceedingStyle) {
        self.proceeding_style = style;
        if let Some(case) = self.case.as_mut() {
            case.proceeding_style = style;
        }
    }

    /// Switch between structured and free writing.
    pub fn set_writing_mode(&mut self, mode: WritingMode) {
        self.writing_mode = mode;
    }

    /// Append a paragraph entry, returning its identifier.
    pub fn add_paragraph(&mut self, content: impl Into<String>) -> String {
        self.paragraph_counter += 1;
        let id = format!("para-{}", self.paragraph_counter);
        self.paragraphs.push(ParagraphEntry {
            id: id.clone(),
            content: content.into(),
        });
        id
    }

    /// Replace the text of a paragraph entry.
    pub fn update_paragraph(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.paragraphs.iter_mut().find(|p| p.id == id) {
            Some(entry) => {
                entry.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Remove a paragraph entry.
    pub fn remove_paragraph(&mut self, id: &str) -> bool {
        let before = self.paragraphs.len();
        self.paragraphs.retain(|p| p.id != id);
        self.paragraphs.len() != before
    }

    /// Move the entry at `from` so that it ends up at index `to`.
    pub fn move_paragraph(&mut self, from: usize, to: usize) -> bool {
        if from >= self.paragraphs.len() || to >= self.paragraphs.len() {
            return false;
        }
        let entry = self.paragraphs.remove(from);
        self.paragraphs.insert(to, entry);
        true
    }

    /// Set the free writing text.
    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    /// Witness statement body paragraphs for the current writing mode.
    pub fn witness_body(&self) -> Vec<String> {
        match self.writing_mode {
            WritingMode::Structured => self
                .paragraphs
                .iter()
                .filter(|p| !p.content.trim().is_empty())
                .map(|p| p.content.clone())
                .collect(),
            WritingMode::Free => text::paragraphs(&self.free_text),
        }
    }

    /// Validate an exhibit form and append the exhibit.
    ///
    /// The mark is computed once, from `witness_name` and the running
    /// counter, and never recomputed when other exhibits are removed.
    pub fn add_exhibit(
        &mut self,
        form: &ExhibitForm,
        witness_name: &str,
    ) -> Result<&Exhibit, ValidationError> {
        let selected = text::present(&form.kind).ok_or(ValidationError::MissingExhibitType)?;
        let kind = if selected == OTHER_EXHIBIT_TYPE {
            text::present(&form.custom_kind).ok_or(ValidationError::MissingCustomExhibitType)?
        } else {
            selected
        };

        self.exhibit_counter += 1;
        let mark = exhibit_mark(witness_name, self.exhibit_counter);
        let exhibit = Exhibit::new(mark, kind)
            .with_description(exhibit_description(&form.description, form.date));

        log::debug!("added exhibit {}", exhibit.mark);
        self.exhibits.push(ExhibitEntry {
            id: format!("exhibit-{}", self.exhibit_counter),
            exhibit,
        });

        let last = self.exhibits.len() - 1;
        Ok(&self.exhibits[last].exhibit)
    }

    /// Remove an exhibit entry. Remaining marks are left as they were.
    pub fn remove_exhibit(&mut self, id: &str) -> bool {
        let before = self.exhibits.len();
        self.exhibits.retain(|e| e.id != id);
        self.exhibits.len() != before
    }

    /// Validate the case form, store the case record and move to step 3.
    ///
    /// Unnamed party rows are dropped; litigation friend details are
    /// cleared for rows where the box is not ticked.
    pub fn collect_case_details(&mut self, form: &CaseForm) -> Result<&CaseRecord, ValidationError> {
        let case_number =
            text::present(&form.case_number).ok_or(ValidationError::MissingCaseNumber)?;

        let parties: Vec<Party> = form.parties.iter().filter_map(PartyForm::to_party).collect();
        if parties.len() < MIN_PARTIES {
            return Err(ValidationError::TooFewParties);
        }

        let case = CaseRecord {
            court: form.court.clone(),
            case_number: case_number.to_string(),
            matter_of_statute: text::present(&form.matter_of_statute).map(str::to_string),
            matter_of_person: text::present(&form.matter_of_person).map(str::to_string),
            parties,
            proceeding_style: self.proceeding_style,
        };

        log::debug!(
            "collected case {} with {} parties",
            case.case_number,
            case.parties.len()
        );
        self.step = 3;
        Ok(self.case.insert(case))
    }

    /// Store the content record and move to the preview step.
    ///
    /// For witness statements the body paragraphs and exhibits come from
    /// the session lists, and a blank ordinal becomes "First".
    pub fn collect_content(&mut self, content: DocumentContent) -> Result<(), ValidationError> {
        if self.document_kind.is_none() {
            return Err(ValidationError::MissingDocumentType);
        }
        if self.case.is_none() {
            return Err(ValidationError::MissingCaseDetails);
        }

        let content = match content {
            DocumentContent::WitnessStatement(ws) => self.fill_witness_statement(ws).into(),
            other => other,
        };

        self.document_kind = Some(content.kind());
        self.content = Some(content);
        self.step = LAST_STEP;
        Ok(())
    }

    fn fill_witness_statement(&self, mut ws: WitnessStatement) -> WitnessStatement {
        ws.paragraphs = self.witness_body();
        ws.exhibits = self.exhibits.iter().map(|e| e.exhibit.clone()).collect();
        if text::present(&ws.statement_ordinal).is_none() {
            ws.statement_ordinal = "First".to_string();
        }
        ws
    }

    /// Whether the progress bar may jump to `step`.
    ///
    /// Earlier steps are always reachable; later ones need the records
    /// they depend on.
    pub fn can_navigate_to(&self, step: u8) -> bool {
        if !(FIRST_STEP..=LAST_STEP).contains(&step) {
            return false;
        }
        if step <= self.step {
            return true;
        }
        match step {
            1 => true,
            2 => self.document_kind.is_some(),
            _ => self.document_kind.is_some() && self.case.is_some(),
        }
    }

    /// Move to `step` when navigation allows it.
    pub fn go_to(&mut self, step: u8) -> Result<(), ValidationError> {
        if !(FIRST_STEP..=LAST_STEP).contains(&step) {
            return Err(ValidationError::InvalidStep(step));
        }
        if !self.can_navigate_to(step) {
            return Err(if self.document_kind.is_none() {
                ValidationError::MissingDocumentType
            } else {
                ValidationError::MissingCaseDetails
            });
        }
        self.step = step;
        Ok(())
    }

    /// Build the layout for the current records.
    ///
    /// Before content is collected the selected type's empty template is
    /// used, so the preview is never stale and never cached.
    pub fn layout(&self, options: &BuildOptions) -> Result<Layout, ValidationError> {
        let kind = self.document_kind.ok_or(ValidationError::MissingDocumentType)?;
        let case = self.case.as_ref().ok_or(ValidationError::MissingCaseDetails)?;
        let layout = match &self.content {
            Some(content) => build::build_with(case, content, options),
            None => build::build_with(case, &DocumentContent::blank(kind), options),
        };
        Ok(layout)
    }

    /// Start over: every field returns to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_form() -> CaseForm {
        let mut form = CaseForm::new();
        form.case_number = " FD24P00123 ".into();
        form.parties[0] = PartyForm::new("Alex Brown", "Applicant");
        form.parties[1] = PartyForm::new("Sam Green", "Respondent");
        form
    }

    #[test]
    fn test_party_removal_keeps_two() {
        let mut form = CaseForm::new();
        assert_eq!(form.remove_party(0), Err(ValidationError::PartyMinimum));

        form.add_party().name = "Third".into();
        assert_eq!(form.parties.len(), 3);
        assert_eq!(form.remove_party(2).unwrap().name, "Third");
        assert_eq!(form.parties.len(), 2);
    }

    #[test]
    fn test_collect_case_details_requires_case_number() {
        let mut session = Session::new();
        let mut form = case_form();
        form.case_number = "   ".into();
        assert_eq!(
            session.collect_case_details(&form),
            Err(ValidationError::MissingCaseNumber)
        );
        assert!(session.case().is_none());
    }

    #[test]
    fn test_collect_case_details_drops_unnamed_parties() {
        let mut session = Session::new();
        let mut form = case_form();
        form.parties[1].name = "  ".into();
        form.add_party();
        assert_eq!(
            session.collect_case_details(&form),
            Err(ValidationError::TooFewParties)
        );

        form.parties[1].name = "Sam Green".into();
        let case = session.collect_case_details(&form).unwrap();
        assert_eq!(case.case_number, "FD24P00123");
        assert_eq!(case.parties.len(), 2);
        assert_eq!(session.step(), 3);
    }

    #[test]
    fn test_unticked_friend_is_cleared() {
        let mut session = Session::new();
        let mut form = case_form();
        form.parties[0] = PartyForm::new("Child A", "Applicant")
            .with_litigation_friend("Official Solicitor", "Litigation Friend");
        form.parties[0].has_litigation_friend = false;

        let case = session.collect_case_details(&form).unwrap();
        assert!(!case.parties[0].has_litigation_friend);
        assert_eq!(case.parties[0].litigation_friend_name, None);
        assert_eq!(case.parties[0].litigation_friend_role, None);
    }

    #[test]
    fn test_exhibit_marks_are_stable() {
        let mut session = Session::new();
        let first = session
            .add_exhibit(&ExhibitForm::new("Letter"), "John Adam Smith")
            .unwrap()
            .mark
            .clone();
        assert_eq!(first, "JAS-1");
        session
            .add_exhibit(&ExhibitForm::new("Email"), "John Adam Smith")
            .unwrap();

        assert!(session.remove_exhibit("exhibit-1"));
        assert_eq!(session.exhibits()[0].exhibit.mark, "JAS-2");

        let third = session
            .add_exhibit(&ExhibitForm::new("Photo"), "")
            .unwrap();
        assert_eq!(third.mark, "XX-3");
    }

    #[test]
    fn test_exhibit_validation() {
        let mut session = Session::new();
        assert_eq!(
            session.add_exhibit(&ExhibitForm::new(""), "Jane Doe"),
            Err(ValidationError::MissingExhibitType)
        );
        assert_eq!(
            session.add_exhibit(&ExhibitForm::new("Other"), "Jane Doe"),
            Err(ValidationError::MissingCustomExhibitType)
        );
        assert!(session.exhibits().is_empty());

        let form = ExhibitForm::new("Other")
            .with_custom_kind("Diary")
            .with_date(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        let exhibit = session.add_exhibit(&form, "Jane Doe").unwrap();
        assert_eq!(exhibit.mark, "JD-1");
        assert_eq!(exhibit.kind, "Diary");
        assert_eq!(exhibit.description.as_deref(), Some("dated 3 June 2025"));
    }

    #[test]
    fn test_paragraph_list_operations() {
        let mut session = Session::new();
        let a = session.add_paragraph("A");
        let b = session.add_paragraph("B");
        let c = session.add_paragraph("C");
        assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("para-1", "para-2", "para-3"));

        assert!(session.move_paragraph(2, 0));
        assert!(session.update_paragraph(&b, "   "));
        assert!(session.remove_paragraph(&a));
        assert!(!session.remove_paragraph(&a));
        assert!(!session.move_paragraph(5, 0));

        assert_eq!(session.witness_body(), vec!["C"]);
    }

    #[test]
    fn test_free_writing_body() {
        let mut session = Session::new();
        session.add_paragraph("ignored in free mode");
        session.set_writing_mode(WritingMode::Free);
        session.set_free_text("First.\n\nSecond.\n\n\n");
        assert_eq!(session.witness_body(), vec!["First.", "Second."]);
    }

    #[test]
    fn test_navigation() {
        let mut session = Session::new();
        assert!(session.can_navigate_to(1));
        assert!(!session.can_navigate_to(2));
        assert_eq!(session.go_to(5), Err(ValidationError::InvalidStep(5)));
        assert_eq!(session.go_to(3), Err(ValidationError::MissingDocumentType));

        session.select_document(DocumentKind::DraftOrder);
        assert_eq!(session.step(), 2);
        assert!(!session.can_navigate_to(3));
        assert_eq!(session.go_to(4), Err(ValidationError::MissingCaseDetails));

        session.collect_case_details(&case_form()).unwrap();
        assert!(session.can_navigate_to(4));
        session.go_to(1).unwrap();
        assert!(session.can_navigate_to(3));
    }

    #[test]
    fn test_collect_witness_content_uses_session_lists() {
        let mut session = Session::new();
        session.select_document(DocumentKind::WitnessStatement);
        session.collect_case_details(&case_form()).unwrap();
        session.add_paragraph("I am the applicant.");
        session.add_exhibit(&ExhibitForm::new("Letter"), "Jane Doe").unwrap();

        let ws = WitnessStatement {
            witness_name: "Jane Doe".into(),
            ..Default::default()
        };
        session.collect_content(ws.into()).unwrap();
        assert_eq!(session.step(), LAST_STEP);

        match session.content() {
            Some(DocumentContent::WitnessStatement(ws)) => {
                assert_eq!(ws.paragraphs, vec!["I am the applicant."]);
                assert_eq!(ws.exhibits[0].mark, "JD-1");
                assert_eq!(ws.statement_ordinal, "First");
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_layout_requires_records() {
        let mut session = Session::new();
        assert_eq!(
            session.layout(&BuildOptions::default()),
            Err(ValidationError::MissingDocumentType)
        );
        session.select_document(DocumentKind::DraftOrder);
        assert_eq!(
            session.layout(&BuildOptions::default()),
            Err(ValidationError::MissingCaseDetails)
        );
        session.collect_case_details(&case_form()).unwrap();
        let layout = session.layout(&BuildOptions::default()).unwrap();
        assert_eq!(layout.title, "ORDER");
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new();
        session.select_document(DocumentKind::SkeletonArgument);
        session.set_proceeding_style(ProceedingStyle::Adversarial);
        session.add_paragraph("x");
        session.add_exhibit(&ExhibitForm::new("Letter"), "A B").unwrap();
        session.reset();
        assert_eq!(session, Session::new());

        let exhibit = session.add_exhibit(&ExhibitForm::new("Letter"), "A B").unwrap();
        assert_eq!(exhibit.mark, "AB-1");
    }
}
