//! Witness statement body.

use crate::model::{Instruction, Layout, WitnessStatement};

use super::text::{self, Numbering};

/// Fixed statement of truth wording.
pub const STATEMENT_OF_TRUTH: &str = "I believe that the facts stated in this witness statement are true. I understand that proceedings for contempt of court may be brought against anyone who makes, or causes to be made, a false statement in a document verified by a statement of truth without an honest belief in its truth.";

pub(super) fn build_body(layout: &mut Layout, ws: &WitnessStatement) {
    let name = ws.witness_name.trim();
    let ordinal = text::present(&ws.statement_ordinal).unwrap_or("First");
    layout.push(Instruction::paragraph(format!(
        "{} witness statement of {}",
        ordinal, name
    )));

    if let Some(mark) = text::present(&ws.exhibit_mark) {
        layout.push(Instruction::key_value("Exhibit", mark));
    }

    super::push_paragraphs(layout, &ws.introduction);

    let mut numbering = Numbering::new();
    for para in ws.paragraphs.iter().filter_map(|p| text::present(p)) {
        layout.push(numbering.next(para));
    }

    if !ws.exhibits.is_empty() {
        layout.push(Instruction::heading("EXHIBITS", 2));
        for exhibit in &ws.exhibits {
            layout.push(Instruction::paragraph(exhibit.listing()));
        }
    }

    layout.push(Instruction::heading("STATEMENT OF TRUTH", 2));
    layout.push(Instruction::paragraph(STATEMENT_OF_TRUTH));
    layout.push(Instruction::signature(name));
}
