//! Data model for court documents.
//!
//! Case and content records are the input side, assembled by the wizard
//! session. The instruction model is the intermediate representation that
//! bridges building and rendering; it knows nothing about any output format.

mod case;
mod content;
mod instruction;

pub use case::{CaseRecord, Party, ProceedingStyle, ACCREDITED_LEGAL_REPRESENTATIVE};
pub use content::{
    DocumentContent, DocumentKind, DraftOrder, Exhibit, PositionStatement, SkeletonArgument,
    WitnessStatement,
};
pub use instruction::{signature_lines, Alignment, Instruction, Layout, TextStyle};
