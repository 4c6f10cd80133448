//! Skeleton argument body.

use crate::format::long_date;
use crate::model::{Instruction, Layout, SkeletonArgument};

use super::text;

pub(super) fn build_body(layout: &mut Layout, sk: &SkeletonArgument) {
    if let Some(date) = sk.hearing_date {
        layout.push(Instruction::key_value("Hearing Date", long_date(date)));
    }
    if let Some(hearing) = text::present(&sk.hearing_type) {
        layout.push(Instruction::key_value("Hearing Type", hearing));
    }

    let sections = [
        ("Introduction", &sk.introduction),
        ("Issues", &sk.issues),
        ("Legal Framework", &sk.law),
        ("Application of Law to Facts", &sk.application),
        ("Relief Sought", &sk.relief),
    ];

    for (heading, body) in sections {
        if text::present(body).is_none() {
            continue;
        }
        layout.push(Instruction::heading(heading, 2));
        super::push_paragraphs(layout, body);
    }

    if let Some(estimate) = text::present(&sk.time_estimate) {
        layout.push(Instruction::key_value("Time Estimate", estimate));
    }

    if text::present(&sk.authorities).is_some() {
        layout.push(Instruction::heading("Authorities", 2));
        super::push_lines(layout, &sk.authorities);
    }
}
