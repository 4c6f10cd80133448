//! Draft order body.

use crate::model::{DraftOrder, Instruction, Layout};

use super::text::{self, Numbering};

pub(super) fn build_body(layout: &mut Layout, order: &DraftOrder) {
    if let Some(judge) = text::present(&order.judge_name) {
        layout.push(Instruction::key_value("BEFORE", judge));
    }

    super::push_lines(layout, &order.recitals);

    layout.push(Instruction::heading("IT IS ORDERED THAT:", 2));

    let mut numbering = Numbering::new();
    for provision in text::paragraphs(&order.provisions) {
        layout.push(numbering.next(provision));
    }

    super::push_paragraphs(layout, &order.service_provisions);
    super::push_paragraphs(layout, &order.costs_provisions);
}
