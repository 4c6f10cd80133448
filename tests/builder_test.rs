//! Integration tests for the instruction builder.

use chrono::NaiveDate;
use courtdocs::build::{build, build_with, BuildOptions};
use courtdocs::model::{
    CaseRecord, DocumentContent, DocumentKind, DraftOrder, Exhibit, Instruction, Layout, Party,
    PositionStatement, ProceedingStyle, SkeletonArgument, WitnessStatement,
};

fn case(style: ProceedingStyle) -> CaseRecord {
    CaseRecord::new("CASE/2024-001")
        .with_court("IN THE FAMILY COURT\nSITTING AT MANCHESTER")
        .with_statute("THE CHILDREN ACT 1989")
        .with_person("THE CHILD C (A GIRL)")
        .with_style(style)
        .with_party(Party::new("Alex Brown", "Applicant"))
        .with_party(
            Party::new("Sam Green", "First Respondent")
                .with_litigation_friend("Pat Jones", "Accredited Legal Representative"),
        )
        .with_party(Party::new("Jo White", "Second Respondent"))
}

fn every_kind() -> Vec<DocumentContent> {
    vec![
        WitnessStatement {
            witness_name: "John Adam Smith".into(),
            exhibit_mark: "JAS-1".into(),
            introduction: "I am the applicant.".into(),
            paragraphs: vec!["One".into(), "Two".into(), "Three".into()],
            exhibits: vec![Exhibit::new("JAS-1", "Letter").with_description("from the school")],
            ..Default::default()
        }
        .into(),
        SkeletonArgument {
            hearing_date: NaiveDate::from_ymd_opt(2025, 6, 3),
            introduction: "Intro".into(),
            issues: "Issue A\n\nIssue B".into(),
            law: "Section 1 applies.".into(),
            authorities: "Re B [2013] UKSC 33\nRe W [2016] EWCA Civ 793".into(),
            ..Default::default()
        }
        .into(),
        PositionStatement {
            on_behalf_of: "Mother".into(),
            current_position: "The mother agrees.\n\nShe seeks contact.".into(),
            orders_sought: "Contact order\nNo order as to costs".into(),
            ..Default::default()
        }
        .into(),
        DraftOrder {
            judge_name: "HHJ Patel".into(),
            recitals: "UPON hearing counsel".into(),
            provisions: "First\n\nSecond".into(),
            costs_provisions: "No order as to costs.".into(),
            ..Default::default()
        }
        .into(),
    ]
}

fn numbers(layout: &Layout) -> Vec<u32> {
    layout.iter().filter_map(Instruction::number).collect()
}

#[test]
fn test_build_is_deterministic_for_every_kind() {
    let case = case(ProceedingStyle::Adversarial);
    for content in every_kind() {
        let first = build(&case, &content);
        let second = build(&case.clone(), &content.clone());
        assert_eq!(first, second, "{} layout differs", content.kind());
    }
}

#[test]
fn test_numbering_restarts_per_block() {
    let case = case(ProceedingStyle::Adversarial);
    let contents = every_kind();

    let witness = build(&case, &contents[0]);
    let order = build(&case, &contents[3]);

    assert_eq!(numbers(&witness), vec![1, 2, 3]);
    assert_eq!(numbers(&order), vec![1, 2]);
}

#[test]
fn test_separator_between_consecutive_parties() {
    let content = DocumentContent::blank(DocumentKind::DraftOrder);

    let adversarial = build(&case(ProceedingStyle::Adversarial), &content);
    let separators: Vec<_> = adversarial
        .iter()
        .filter_map(Instruction::text)
        .filter(|t| t.starts_with("- "))
        .collect();
    assert_eq!(separators, vec!["- v -", "- v -"]);

    let joint = build(&case(ProceedingStyle::NonAdversarial), &content);
    let separators: Vec<_> = joint
        .iter()
        .filter_map(Instruction::text)
        .filter(|t| t.starts_with("- "))
        .collect();
    assert_eq!(separators, vec!["- and -", "- and -"]);
}

#[test]
fn test_litigation_friend_line() {
    let layout = build(
        &case(ProceedingStyle::Adversarial),
        &DocumentContent::blank(DocumentKind::DraftOrder),
    );
    let texts: Vec<_> = layout.iter().filter_map(Instruction::text).collect();
    assert!(texts.contains(&"(By her Accredited Legal Representative Pat Jones)"));
}

#[test]
fn test_empty_law_omits_legal_framework() {
    let case = case(ProceedingStyle::Adversarial);
    let skeleton = SkeletonArgument {
        introduction: "Intro".into(),
        law: "   ".into(),
        relief: "Dismiss".into(),
        ..Default::default()
    };
    let layout = build(&case, &skeleton.into());

    let headings = layout.headings(2);
    assert!(!headings.contains(&"Legal Framework"));
    assert_eq!(headings, vec!["Introduction", "Relief Sought"]);
}

#[test]
fn test_titles_by_kind() {
    let case = case(ProceedingStyle::Adversarial);
    let titles: Vec<String> = every_kind()
        .iter()
        .map(|c| build(&case, c).title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "WITNESS STATEMENT OF JOHN ADAM SMITH",
            "SKELETON ARGUMENT",
            "POSITION STATEMENT ON BEHALF OF THE MOTHER",
            "ORDER",
        ]
    );
}

#[test]
fn test_header_precedes_body() {
    let case = case(ProceedingStyle::Adversarial);
    let layout = build(&case, &every_kind()[3]);

    assert_eq!(layout.instructions[0].text(), Some("Case No: CASE/2024-001"));
    let title_index = layout
        .iter()
        .position(|i| matches!(i, Instruction::Heading { level: 1, .. }))
        .unwrap();
    assert_eq!(layout.instructions[title_index - 1], Instruction::Rule);
    assert_eq!(layout.instructions[title_index + 1], Instruction::Rule);
    assert_eq!(
        layout.instructions[title_index + 2],
        Instruction::key_value("BEFORE", "HHJ Patel")
    );
}

#[test]
fn test_attestation_lines_are_appended() {
    let case = case(ProceedingStyle::Adversarial);
    let options = BuildOptions::new()
        .with_prepared_by("Sarah Okafor, Counsel")
        .with_document_date(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());

    let plain = build(&case, &every_kind()[2]);
    let attested = build_with(&case, &every_kind()[2], &options);

    assert_eq!(attested.len(), plain.len() + 2);
    let tail: Vec<_> = attested.iter().rev().take(2).filter_map(Instruction::text).collect();
    assert_eq!(tail, vec!["3 June 2025", "Prepared by: Sarah Okafor, Counsel"]);
}
