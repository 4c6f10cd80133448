//! Built-in exporters.

use crate::error::Result;
use crate::model::Layout;
use crate::render::{
    to_docx, to_html, to_pdf, RenderOptions, DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE,
};

use super::{DocumentExporter, ExportFormat, ExportPayload};

/// Standalone HTML page exporter.
pub struct HtmlExporter;

impl HtmlExporter {
    /// Create a new HTML exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExporter for HtmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn name(&self) -> &str {
        "html"
    }

    fn export(&self, layout: &Layout, options: &RenderOptions) -> Result<ExportPayload> {
        // A download is always a complete page, whatever the preview uses.
        let html_options = options.html.clone().with_standalone(true);
        let html = to_html(layout, &html_options);
        Ok(ExportPayload::new(html.into_bytes()))
    }
}

/// WordprocessingML exporter.
pub struct DocxExporter;

impl DocxExporter {
    /// Create a new DOCX exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExporter for DocxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn content_type(&self) -> &'static str {
        DOCX_CONTENT_TYPE
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn export(&self, layout: &Layout, options: &RenderOptions) -> Result<ExportPayload> {
        let bytes = to_docx(layout, &options.docx).to_bytes()?;
        Ok(ExportPayload::new(bytes))
    }
}

/// Paginated PDF exporter.
pub struct PdfExporter;

impl PdfExporter {
    /// Create a new PDF exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn export(&self, layout: &Layout, options: &RenderOptions) -> Result<ExportPayload> {
        let output = to_pdf(layout, &options.pdf)?;
        Ok(ExportPayload {
            bytes: output.bytes,
            page_count: Some(output.page_count),
        })
    }
}
