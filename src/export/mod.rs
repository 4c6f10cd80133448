//! Export boundary: built layouts to downloadable files.
//!
//! Each output format is a [`DocumentExporter`] registered in an
//! [`ExporterRegistry`]. [`Exporter::export_for_user`] is the call site the
//! user interface talks to: it never returns an error, only a document and
//! a notification to show.
//!
//! # Example
//!
//! ```
//! use courtdocs::export::{ExportFormat, ExportOptions, ExporterRegistry};
//! use courtdocs::model::{CaseRecord, DraftOrder, Party};
//!
//! fn main() -> courtdocs::Result<()> {
//!     let case = CaseRecord::new("FD24P00123")
//!         .with_party(Party::new("Alex Brown", "Applicant"))
//!         .with_party(Party::new("Sam Green", "Respondent"));
//!     let content = DraftOrder::default().into();
//!
//!     let registry = ExporterRegistry::with_defaults();
//!     let doc = registry.export(&case, &content, &ExportOptions::new(ExportFormat::Pdf))?;
//!     assert_eq!(doc.content_type, "application/pdf");
//!     Ok(())
//! }
//! ```

mod exporters;

pub use exporters::{DocxExporter, HtmlExporter, PdfExporter};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::build::{self, BuildOptions};
use crate::error::{Error, Result};
use crate::format;
use crate::model::{CaseRecord, DocumentContent, Layout};
use crate::render::RenderOptions;

/// Message shown when an export fails for any reason.
pub const EXPORT_FAILURE_MESSAGE: &str = "Error generating document. Please try again.";

/// Output format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML page
    Html,
    /// Word-processor document
    #[default]
    Docx,
    /// PDF document
    Pdf,
}

impl ExportFormat {
    /// All formats, in download-button order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::Docx, ExportFormat::Pdf];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Message shown after a successful download.
    pub fn success_message(self) -> &'static str {
        match self {
            ExportFormat::Html => "HTML preview downloaded successfully!",
            ExportFormat::Docx => "Word document downloaded successfully!",
            ExportFormat::Pdf => "PDF downloaded successfully!",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ext = s.trim().trim_start_matches('.').to_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension() == ext || (ext == "word" && *f == ExportFormat::Docx))
            .ok_or(Error::UnsupportedFormat(s.to_string()))
    }
}

/// Options for one export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    /// Output format
    pub format: ExportFormat,

    /// Attestation lines
    pub build: BuildOptions,

    /// Adapter options
    pub render: RenderOptions,

    /// Date used in the filename; today when unset
    pub date: Option<NaiveDate>,
}

impl ExportOptions {
    /// Create export options for a format.
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Set the build options.
    pub fn with_build_options(mut self, options: BuildOptions) -> Self {
        self.build = options;
        self
    }

    /// Set the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the filename date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// The filename date, defaulting to today.
    pub fn export_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// A finished export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// File bytes
    pub content: Vec<u8>,

    /// MIME type
    pub content_type: &'static str,

    /// Generated filename
    pub filename: String,

    /// Output format
    pub format: ExportFormat,

    /// Page count, when the format has fixed pages
    pub page_count: Option<usize>,
}

impl ExportedDocument {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Bytes produced by an exporter, before a filename is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    /// File bytes
    pub bytes: Vec<u8>,

    /// Page count, when known
    pub page_count: Option<usize>,
}

impl ExportPayload {
    /// Payload without a page count.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            page_count: None,
        }
    }
}

/// Trait for output formats.
///
/// Implement this trait to add a new export format.
pub trait DocumentExporter: Send + Sync {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// MIME type of the output.
    fn content_type(&self) -> &'static str;

    /// Get the name of this exporter.
    fn name(&self) -> &str;

    /// Render a built layout.
    fn export(&self, layout: &Layout, options: &RenderOptions) -> Result<ExportPayload>;
}

/// Registry of exporters keyed by format.
pub struct ExporterRegistry {
    exporters: HashMap<ExportFormat, Arc<dyn DocumentExporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
        }
    }

    /// Create a registry with the HTML, DOCX and PDF exporters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlExporter::new()));
        registry.register(Arc::new(DocxExporter::new()));
        registry.register(Arc::new(PdfExporter::new()));
        registry
    }

    /// Register an exporter, replacing any for the same format.
    pub fn register(&mut self, exporter: Arc<dyn DocumentExporter>) {
        self.exporters.insert(exporter.format(), exporter);
    }

    /// Get the exporter for a format.
    pub fn get(&self, format: ExportFormat) -> Option<Arc<dyn DocumentExporter>> {
        self.exporters.get(&format).cloned()
    }

    /// Check if a format is registered.
    pub fn supports(&self, format: ExportFormat) -> bool {
        self.exporters.contains_key(&format)
    }

    /// Build the layout and export it.
    pub fn export(
        &self,
        case: &CaseRecord,
        content: &DocumentContent,
        options: &ExportOptions,
    ) -> Result<ExportedDocument> {
        let exporter = self
            .get(options.format)
            .ok_or_else(|| Error::UnsupportedFormat(options.format.to_string()))?;

        let layout = build::build_with(case, content, &options.build);
        let payload = exporter.export(&layout, &options.render)?;
        let filename = format::filename(
            case,
            content,
            options.export_date(),
            options.format.extension(),
        );

        log::info!(
            "exported {} ({} bytes) with {}",
            filename,
            payload.bytes.len(),
            exporter.name()
        );

        Ok(ExportedDocument {
            content: payload.bytes,
            content_type: exporter.content_type(),
            filename,
            format: options.format,
            page_count: payload.page_count,
        })
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,

    /// Message text
    pub message: String,
}

impl Notification {
    /// A success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// A failure notification.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Check if this reports a failure.
    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// User-facing export entry point.
#[derive(Clone)]
pub struct Exporter {
    registry: Arc<ExporterRegistry>,
}

impl Exporter {
    /// Create an exporter over the default registry.
    pub fn new() -> Self {
        Self::with_registry(ExporterRegistry::with_defaults())
    }

    /// Create an exporter over a custom registry.
    pub fn with_registry(registry: ExporterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &ExporterRegistry {
        &self.registry
    }

    /// Export and report the outcome as a notification.
    ///
    /// Failures are logged and replaced by a fixed message; the error
    /// itself never reaches the user.
    pub fn export_for_user(
        &self,
        case: &CaseRecord,
        content: &DocumentContent,
        options: &ExportOptions,
    ) -> (Option<ExportedDocument>, Notification) {
        match self.registry.export(case, content, options) {
            Ok(doc) => {
                let note = Notification::success(options.format.success_message());
                (Some(doc), note)
            }
            Err(e) => {
                log::error!("Error generating {} document: {}", options.format, e);
                (None, Notification::failure(EXPORT_FAILURE_MESSAGE))
            }
        }
    }

    /// Export on the blocking thread pool.
    #[cfg(feature = "async")]
    pub async fn export_async(
        &self,
        case: CaseRecord,
        content: DocumentContent,
        options: ExportOptions,
    ) -> Result<ExportedDocument> {
        export_async(Arc::clone(&self.registry), case, content, options).await
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run an export on tokio's blocking pool.
///
/// Document serialization is CPU-bound; this keeps it off the async workers.
#[cfg(feature = "async")]
pub async fn export_async(
    registry: Arc<ExporterRegistry>,
    case: CaseRecord,
    content: DocumentContent,
    options: ExportOptions,
) -> Result<ExportedDocument> {
    tokio::task::spawn_blocking(move || registry.export(&case, &content, &options))
        .await
        .map_err(|e| Error::Other(format!("export task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Party, WitnessStatement};

    fn case() -> CaseRecord {
        CaseRecord::new("CASE/2024-001")
            .with_party(Party::new("Alex Brown", "Applicant"))
            .with_party(Party::new("Sam Green", "Respondent"))
    }

    fn witness() -> DocumentContent {
        WitnessStatement {
            witness_name: "Jane Doe".into(),
            paragraphs: vec!["I am the applicant.".into()],
            ..Default::default()
        }
        .into()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    struct FailingExporter;

    impl DocumentExporter for FailingExporter {
        fn format(&self) -> ExportFormat {
            ExportFormat::Docx
        }

        fn content_type(&self) -> &'static str {
            "application/octet-stream"
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn export(&self, _layout: &Layout, _options: &RenderOptions) -> Result<ExportPayload> {
            Err(Error::Render("boom".into()))
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!(".docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("word".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert!(matches!(
            "odt".parse::<ExportFormat>(),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ExporterRegistry::with_defaults();
        for format in ExportFormat::ALL {
            assert!(registry.supports(format));
        }
        assert!(!ExporterRegistry::new().supports(ExportFormat::Pdf));
    }

    #[test]
    fn test_export_filename_and_type() {
        let registry = ExporterRegistry::with_defaults();
        let options = ExportOptions::new(ExportFormat::Pdf).with_date(date());
        let doc = registry.export(&case(), &witness(), &options).unwrap();
        assert_eq!(doc.filename, "Witness_Statement_Jane_Doe_2025-06-03.pdf");
        assert_eq!(doc.content_type, "application/pdf");
        assert_eq!(doc.page_count, Some(1));
    }

    #[test]
    fn test_export_unregistered_format() {
        let registry = ExporterRegistry::new();
        let result = registry.export(&case(), &witness(), &ExportOptions::default());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_export_for_user_success() {
        let exporter = Exporter::new();
        let options = ExportOptions::new(ExportFormat::Docx).with_date(date());
        let (doc, note) = exporter.export_for_user(&case(), &witness(), &options);
        assert!(doc.is_some());
        assert_eq!(note, Notification::success("Word document downloaded successfully!"));
    }

    #[test]
    fn test_export_for_user_failure() {
        let mut registry = ExporterRegistry::new();
        registry.register(Arc::new(FailingExporter));
        let exporter = Exporter::with_registry(registry);

        let (doc, note) =
            exporter.export_for_user(&case(), &witness(), &ExportOptions::new(ExportFormat::Docx));
        assert!(doc.is_none());
        assert!(note.is_failure());
        assert_eq!(note.message, EXPORT_FAILURE_MESSAGE);
    }
}
