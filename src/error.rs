//! Error types for the courtdocs library.

use std::io;
use thiserror::Error;

/// Result type alias for courtdocs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while collecting, building or exporting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Form input rejected before it reached the builder.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Error during rendering (HTML, DOCX, PDF).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error writing the PDF object graph.
    #[error("PDF writing error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Error packaging the DOCX archive.
    #[error("DOCX packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested export format is not registered.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Validation failures raised while the wizard collects input.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No case number was entered.
    #[error("Please enter a case number")]
    MissingCaseNumber,

    /// Fewer than two named parties.
    #[error("Please enter at least two parties")]
    TooFewParties,

    /// Removing a party would leave fewer than two.
    #[error("At least two parties are required")]
    PartyMinimum,

    /// No exhibit document type was selected.
    #[error("Please select a document type")]
    MissingExhibitType,

    /// "Other" was selected without a custom type.
    #[error("Please enter a custom document type")]
    MissingCustomExhibitType,

    /// No document type has been chosen yet.
    #[error("Please choose a document type")]
    MissingDocumentType,

    /// Content was collected before the case details.
    #[error("Please complete the case details first")]
    MissingCaseDetails,

    /// Step number outside the wizard.
    #[error("Step {0} does not exist")]
    InvalidStep(u8),
}
