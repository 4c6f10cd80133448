//! Output adapters for built layouts.
//!
//! Every adapter walks the same [`Layout`](crate::model::Layout) with an
//! exhaustive `match`, so a new instruction variant cannot be silently
//! dropped by one output and shown by another.

mod docx;
mod html;
mod json;
mod options;
mod pdf;
mod text;

pub use docx::{to_docx, Run, WordDocument, WordParagraph, DOCX_CONTENT_TYPE};
pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{DocxOptions, HtmlOptions, PageGeometry, PdfOptions, RenderOptions};
pub use pdf::{to_pdf, PdfOutput, PDF_CONTENT_TYPE};
pub use text::to_text;
