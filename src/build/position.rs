//! Position statement body.

use crate::format::long_date;
use crate::model::{Instruction, Layout, PositionStatement};

use super::text::{self, Numbering};

pub(super) fn build_body(layout: &mut Layout, ps: &PositionStatement) {
    if let Some(date) = ps.hearing_date {
        layout.push(Instruction::key_value("Hearing Date", long_date(date)));
    }

    // Introduction and current position form one numbered block.
    let mut numbering = Numbering::new();
    for para in text::paragraphs(&ps.introduction) {
        layout.push(numbering.next(para));
    }

    if text::present(&ps.current_position).is_some() {
        layout.push(Instruction::heading("CURRENT POSITION", 2));
        for para in text::paragraphs(&ps.current_position) {
            layout.push(numbering.next(para));
        }
    }

    if text::present(&ps.orders_sought).is_some() {
        layout.push(Instruction::heading("ORDERS SOUGHT", 2));
        super::push_lines(layout, &ps.orders_sought);
    }

    if text::present(&ps.outstanding).is_some() {
        layout.push(Instruction::heading("OUTSTANDING ISSUES", 2));
        super::push_paragraphs(layout, &ps.outstanding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentKind;

    #[test]
    fn test_numbering_runs_through_body() {
        let ps = PositionStatement {
            introduction: "Intro one\n\nIntro two".into(),
            current_position: "Position one".into(),
            orders_sought: "Order A\nOrder B".into(),
            ..Default::default()
        };
        let mut layout = Layout::new(DocumentKind::PositionStatement, "T");
        build_body(&mut layout, &ps);

        let numbers: Vec<u32> = layout.iter().filter_map(Instruction::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(layout.headings(2), vec!["CURRENT POSITION", "ORDERS SOUGHT"]);
        assert_eq!(
            &layout.instructions[layout.len() - 2..],
            &[
                Instruction::paragraph("Order A"),
                Instruction::paragraph("Order B")
            ]
        );
    }

    #[test]
    fn test_empty_statement_is_empty() {
        let mut layout = Layout::new(DocumentKind::PositionStatement, "T");
        build_body(&mut layout, &PositionStatement::default());
        assert!(layout.is_empty());
    }
}
