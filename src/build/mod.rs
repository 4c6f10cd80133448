//! Instruction builder: case record + content record to [`Layout`].
//!
//! The builder is a pure function. The same inputs always produce the same
//! instruction sequence, which is what keeps the HTML preview and the two
//! exports visually identical. It never fails: required-field validation
//! happens earlier, in the [`session`](crate::session).
//!
//! # Example
//!
//! ```
//! use courtdocs::build::build;
//! use courtdocs::model::{CaseRecord, DraftOrder, Party, ProceedingStyle};
//!
//! let case = CaseRecord::new("FD24P00123")
//!     .with_court("IN THE FAMILY COURT")
//!     .with_style(ProceedingStyle::Adversarial)
//!     .with_party(Party::new("Alex Brown", "Applicant"))
//!     .with_party(Party::new("Sam Green", "Respondent"));
//! let order = DraftOrder {
//!     provisions: "The application is adjourned.\n\nCosts reserved.".into(),
//!     ..Default::default()
//! };
//!
//! let layout = build(&case, &order.into());
//! assert_eq!(layout.title, "ORDER");
//! ```

mod order;
mod position;
mod skeleton;
pub(crate) mod text;
mod witness;

use chrono::NaiveDate;

use crate::format::long_date;
use crate::model::{
    Alignment, CaseRecord, DocumentContent, Instruction, Layout, TextStyle,
};

/// Options that add the attestation lines printed at the foot of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// "Prepared by" signatory, e.g. "Sarah Okafor, Barrister"
    pub prepared_by: Option<String>,

    /// Date printed under the signatory
    pub document_date: Option<NaiveDate>,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the "Prepared by" line.
    pub fn with_prepared_by(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.prepared_by = text::present(&name).map(str::to_string);
        self
    }

    /// Set the document date.
    pub fn with_document_date(mut self, date: NaiveDate) -> Self {
        self.document_date = Some(date);
        self
    }
}

/// Build the instruction sequence for a document.
pub fn build(case: &CaseRecord, content: &DocumentContent) -> Layout {
    build_with(case, content, &BuildOptions::default())
}

/// Build the instruction sequence, appending attestation lines from `options`.
pub fn build_with(case: &CaseRecord, content: &DocumentContent, options: &BuildOptions) -> Layout {
    let mut layout = Layout::new(content.kind(), title(case, content));

    push_header(&mut layout, case);

    match content {
        DocumentContent::WitnessStatement(ws) => witness::build_body(&mut layout, ws),
        DocumentContent::SkeletonArgument(sk) => skeleton::build_body(&mut layout, sk),
        DocumentContent::PositionStatement(ps) => position::build_body(&mut layout, ps),
        DocumentContent::DraftOrder(order) => order::build_body(&mut layout, order),
    }

    push_attestation(&mut layout, options);

    log::debug!(
        "built {} layout with {} instructions",
        layout.kind,
        layout.len()
    );
    layout
}

/// Document title, by document type.
pub fn title(case: &CaseRecord, content: &DocumentContent) -> String {
    match content {
        DocumentContent::WitnessStatement(ws) => format!(
            "WITNESS STATEMENT OF {}",
            text::present(&ws.witness_name)
                .unwrap_or("WITNESS")
                .to_uppercase()
        ),
        DocumentContent::SkeletonArgument(_) => "SKELETON ARGUMENT".to_string(),
        DocumentContent::PositionStatement(ps) => {
            let on_behalf_of = text::present(&ps.on_behalf_of)
                .or_else(|| case.first_designation())
                .unwrap_or("APPLICANT");
            format!(
                "POSITION STATEMENT ON BEHALF OF THE {}",
                on_behalf_of.to_uppercase()
            )
        }
        DocumentContent::DraftOrder(order) => text::present(&order.order_type)
            .unwrap_or("ORDER")
            .to_string(),
    }
}

fn push_header(layout: &mut Layout, case: &CaseRecord) {
    layout.push(Instruction::styled(
        format!("Case No: {}", case.case_number.trim()),
        Alignment::Right,
        TextStyle::BOLD,
    ));

    for line in case.court_lines() {
        layout.push(Instruction::styled(line, Alignment::Left, TextStyle::BOLD));
    }

    if let Some(statute) = case.matter_of_statute.as_deref().and_then(text::present) {
        layout.push(Instruction::styled(
            format!("IN THE MATTER OF {}", statute),
            Alignment::Left,
            TextStyle::BOLD,
        ));
    }

    if let Some(person) = case.matter_of_person.as_deref().and_then(text::present) {
        layout.push(Instruction::styled(
            "IN THE MATTER OF:",
            Alignment::Left,
            TextStyle::BOLD,
        ));
        layout.push(Instruction::styled(person, Alignment::Center, TextStyle::BOLD));
    }

    if !case.parties.is_empty() {
        layout.push(Instruction::styled(
            "B E T W E E N:",
            Alignment::Left,
            TextStyle::BOLD,
        ));

        let separator = case.proceeding_style.separator();
        for (index, party) in case.parties.iter().enumerate() {
            if index > 0 {
                layout.push(Instruction::styled(
                    separator,
                    Alignment::Center,
                    TextStyle::default(),
                ));
            }
            layout.push(Instruction::styled(
                party.name.trim().to_uppercase(),
                Alignment::Center,
                TextStyle::BOLD,
            ));
            if let Some(friend) = party.litigation_friend_line() {
                layout.push(Instruction::styled(
                    friend,
                    Alignment::Center,
                    TextStyle::default(),
                ));
            }
            layout.push(Instruction::styled(
                party.designation.trim(),
                Alignment::Right,
                TextStyle::ITALIC,
            ));
        }
    }

    layout.push(Instruction::Rule);
    let title = layout.title.clone();
    layout.push(Instruction::heading(title, 1));
    layout.push(Instruction::Rule);
}

fn push_attestation(layout: &mut Layout, options: &BuildOptions) {
    if let Some(ref prepared_by) = options.prepared_by {
        layout.push(Instruction::styled(
            format!("Prepared by: {}", prepared_by),
            Alignment::Right,
            TextStyle::BOLD,
        ));
        if let Some(date) = options.document_date {
            layout.push(Instruction::styled(
                long_date(date),
                Alignment::Right,
                TextStyle::default(),
            ));
        }
    }
}

/// Push each blank-line-separated paragraph of `field` unnumbered.
pub(crate) fn push_paragraphs(layout: &mut Layout, field: &str) {
    for para in text::paragraphs(field) {
        layout.push(Instruction::paragraph(para));
    }
}

/// Push each non-empty line of `field` as its own paragraph.
pub(crate) fn push_lines(layout: &mut Layout, field: &str) {
    for line in text::lines(field) {
        layout.push(Instruction::paragraph(line));
    }
}
