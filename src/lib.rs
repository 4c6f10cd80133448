//! # courtdocs
//!
//! Court document generation for Rust.
//!
//! A case record and the content for one of four fixed templates (witness
//! statement, skeleton argument, position statement, draft order) are turned
//! into a renderer-agnostic instruction sequence, which is then rendered as
//! an HTML preview, a Word document or a PDF.
//!
//! ## Quick Start
//!
//! ```
//! use courtdocs::{export, preview_html, ExportFormat};
//! use courtdocs::model::{CaseRecord, Party, ProceedingStyle, WitnessStatement};
//!
//! fn main() -> courtdocs::Result<()> {
//!     let case = CaseRecord::new("FD24P00123")
//!         .with_court("IN THE FAMILY COURT\nSITTING AT LEEDS")
//!         .with_style(ProceedingStyle::Adversarial)
//!         .with_party(Party::new("Alex Brown", "Applicant"))
//!         .with_party(Party::new("Sam Green", "Respondent"));
//!
//!     let statement = WitnessStatement {
//!         witness_name: "Jane Doe".into(),
//!         paragraphs: vec!["I am the applicant in these proceedings.".into()],
//!         ..Default::default()
//!     }
//!     .into();
//!
//!     let html = preview_html(&case, &statement);
//!     assert!(html.contains("WITNESS STATEMENT OF JANE DOE"));
//!
//!     let pdf = export(&case, &statement, ExportFormat::Pdf)?;
//!     assert!(pdf.filename.starts_with("Witness_Statement_Jane_Doe_"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One builder, three outputs**: preview, DOCX and PDF share one layout
//! - **Wizard session**: step navigation, paragraph and exhibit lists
//! - **Authentication gate** over any email/password identity provider
//! - **Async export** on tokio's blocking pool with the `async` feature

pub mod auth;
pub mod build;
pub mod draft;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use auth::{AuthGate, AuthOutcome, AuthProvider, Identity, ProviderError};
pub use build::BuildOptions;
pub use draft::Draft;
pub use error::{Error, Result, ValidationError};
pub use export::{
    DocumentExporter, ExportFormat, ExportOptions, ExportedDocument, Exporter, ExporterRegistry,
    Notification,
};
pub use model::{
    Alignment, CaseRecord, DocumentContent, DocumentKind, Exhibit, Instruction, Layout, Party,
    ProceedingStyle, TextStyle,
};
pub use render::{
    DocxOptions, HtmlOptions, JsonFormat, PageGeometry, PdfOptions, RenderOptions, WordDocument,
};
pub use session::Session;

use std::path::Path;

use chrono::NaiveDate;

/// Build the instruction sequence for a document.
///
/// # Example
///
/// ```
/// use courtdocs::{layout, DocumentKind};
/// use courtdocs::model::{CaseRecord, SkeletonArgument};
///
/// let case = CaseRecord::new("CASE-1");
/// let doc = layout(&case, &SkeletonArgument::default().into());
/// assert_eq!(doc.kind, DocumentKind::SkeletonArgument);
/// ```
pub fn layout(case: &CaseRecord, content: &DocumentContent) -> Layout {
    build::build(case, content)
}

/// Render the HTML preview fragment.
pub fn preview_html(case: &CaseRecord, content: &DocumentContent) -> String {
    render::to_html(&build::build(case, content), &HtmlOptions::default())
}

/// Render the document as plain text.
pub fn to_text(case: &CaseRecord, content: &DocumentContent) -> String {
    render::to_text(&build::build(case, content))
}

/// Export a document with default options, dated today.
///
/// # Example
///
/// ```
/// use courtdocs::{export, ExportFormat};
/// use courtdocs::model::{CaseRecord, DraftOrder};
///
/// let case = CaseRecord::new("CASE/7");
/// let doc = export(&case, &DraftOrder::default().into(), ExportFormat::Docx)?;
/// assert!(doc.filename.starts_with("Draft_Order_CASE_7_"));
/// # Ok::<(), courtdocs::Error>(())
/// ```
pub fn export(
    case: &CaseRecord,
    content: &DocumentContent,
    format: ExportFormat,
) -> Result<ExportedDocument> {
    ExporterRegistry::with_defaults().export(case, content, &ExportOptions::new(format))
}

/// Export a document with custom options.
pub fn export_with_options(
    case: &CaseRecord,
    content: &DocumentContent,
    options: &ExportOptions,
) -> Result<ExportedDocument> {
    ExporterRegistry::with_defaults().export(case, content, options)
}

/// Read a draft file and validate it.
///
/// # Example
///
/// ```no_run
/// use courtdocs::load_draft;
///
/// let draft = load_draft("statement.json").unwrap();
/// println!("{}", draft.layout().title);
/// ```
pub fn load_draft<P: AsRef<Path>>(path: P) -> Result<Draft> {
    let draft = Draft::from_path(path)?;
    Ok(draft.checked()?)
}

/// Builder for rendering and exporting court documents.
///
/// # Example
///
/// ```
/// use courtdocs::{CourtDocs, ExportFormat, PageGeometry};
/// use courtdocs::model::{CaseRecord, Party, PositionStatement};
///
/// let case = CaseRecord::new("FD24P00123")
///     .with_party(Party::new("Alex Brown", "Applicant"))
///     .with_party(Party::new("Sam Green", "Respondent"));
///
/// let pdf = CourtDocs::new()
///     .with_prepared_by("Sarah Okafor, Counsel for the Applicant")
///     .with_page_geometry(PageGeometry::letter())
///     .document(case, PositionStatement::default())?
///     .export(ExportFormat::Pdf)?;
/// assert_eq!(pdf.page_count, Some(1));
/// # Ok::<(), courtdocs::Error>(())
/// ```
pub struct CourtDocs {
    build_options: BuildOptions,
    render_options: RenderOptions,
    export_date: Option<NaiveDate>,
}

impl CourtDocs {
    /// Create a new CourtDocs builder.
    pub fn new() -> Self {
        Self {
            build_options: BuildOptions::default(),
            render_options: RenderOptions::default(),
            export_date: None,
        }
    }

    /// Add a "Prepared by" line.
    pub fn with_prepared_by(mut self, name: impl Into<String>) -> Self {
        self.build_options = self.build_options.with_prepared_by(name);
        self
    }

    /// Print a document date under the signatory.
    pub fn with_document_date(mut self, date: NaiveDate) -> Self {
        self.build_options = self.build_options.with_document_date(date);
        self
    }

    /// Emit complete HTML pages instead of fragments.
    pub fn standalone_html(mut self) -> Self {
        self.render_options.html = self.render_options.html.with_standalone(true);
        self
    }

    /// Set the Word document font.
    pub fn with_docx_font(mut self, font: impl Into<String>) -> Self {
        self.render_options.docx = self.render_options.docx.with_font(font);
        self
    }

    /// Set the author recorded in exported Word documents.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.render_options.docx = self.render_options.docx.with_author(author);
        self
    }

    /// Set the PDF page geometry.
    pub fn with_page_geometry(mut self, geometry: PageGeometry) -> Self {
        self.render_options.pdf = self.render_options.pdf.with_geometry(geometry);
        self
    }

    /// Set all render options at once.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Date used in export filenames instead of today.
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    /// Build a document from a case record and content.
    ///
    /// The builder itself never fails; unnamed party rows are dropped and the
    /// case is validated first, so a document without a case number or
    /// parties is never produced.
    pub fn document(
        self,
        case: CaseRecord,
        content: impl Into<DocumentContent>,
    ) -> Result<CourtDocsResult> {
        let draft = Draft::new(case, content).checked()?;
        Ok(self.finish(draft.case, draft.content))
    }

    /// Build a document from a draft, keeping the builder's attestation
    /// lines where the draft has none.
    pub fn draft(mut self, draft: Draft) -> Result<CourtDocsResult> {
        let draft = draft.checked()?;
        if let Some(name) = draft.prepared_by {
            self.build_options = self.build_options.with_prepared_by(name);
        }
        if let Some(date) = draft.document_date {
            self.build_options = self.build_options.with_document_date(date);
        }
        Ok(self.finish(draft.case, draft.content))
    }

    /// Read a draft file and build it.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<CourtDocsResult> {
        let draft = Draft::from_path(path)?;
        self.draft(draft)
    }

    fn finish(self, case: CaseRecord, content: DocumentContent) -> CourtDocsResult {
        let layout = build::build_with(&case, &content, &self.build_options);
        CourtDocsResult {
            case,
            content,
            layout,
            build_options: self.build_options,
            render_options: self.render_options,
            export_date: self.export_date,
        }
    }
}

impl Default for CourtDocs {
    fn default() -> Self {
        Self::new()
    }
}

/// A built document ready to render.
pub struct CourtDocsResult {
    /// Case metadata
    pub case: CaseRecord,
    /// Document content
    pub content: DocumentContent,
    /// Built instruction sequence
    pub layout: Layout,
    build_options: BuildOptions,
    render_options: RenderOptions,
    export_date: Option<NaiveDate>,
}

impl CourtDocsResult {
    /// Render HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.layout, &self.render_options.html)
    }

    /// Render plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.layout)
    }

    /// Serialize the instruction sequence.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.layout, format)
    }

    /// Build the in-memory Word document.
    pub fn to_docx(&self) -> WordDocument {
        render::to_docx(&self.layout, &self.render_options.docx)
    }

    /// Render the PDF.
    pub fn to_pdf(&self) -> Result<render::PdfOutput> {
        render::to_pdf(&self.layout, &self.render_options.pdf)
    }

    /// Export options matching this builder.
    pub fn export_options(&self, format: ExportFormat) -> ExportOptions {
        let options = ExportOptions::new(format)
            .with_build_options(self.build_options.clone())
            .with_render_options(self.render_options.clone());
        match self.export_date {
            Some(date) => options.with_date(date),
            None => options,
        }
    }

    /// Export to a downloadable file.
    pub fn export(&self, format: ExportFormat) -> Result<ExportedDocument> {
        ExporterRegistry::with_defaults().export(
            &self.case,
            &self.content,
            &self.export_options(format),
        )
    }

    /// The download filename for a format.
    pub fn filename(&self, format: ExportFormat) -> String {
        let date = self.export_options(format).export_date();
        crate::format::filename(&self.case, &self.content, date, format.extension())
    }

    /// The document type.
    pub fn kind(&self) -> DocumentKind {
        self.content.kind()
    }
}
