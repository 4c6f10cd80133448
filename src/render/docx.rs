//! Word-processor (DOCX) export.
//!
//! [`to_docx`] maps a layout onto a small in-memory WordprocessingML model.
//! [`WordDocument::to_bytes`] then writes the OPC package: a zip archive
//! holding the main document part, a style part carrying the default font,
//! core properties and the relationship parts that tie them together.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::{signature_lines, Alignment, Instruction, Layout};

use super::DocxOptions;

/// MIME type of a `.docx` package.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const RULE_BORDER_SIZE: u32 = 12;
const RULE_SPACING_AFTER: u32 = 200;

/// Convert a layout to an in-memory word-processor document.
pub fn to_docx(layout: &Layout, options: &DocxOptions) -> WordDocument {
    let mut doc = WordDocument::new(&layout.title, options);

    for instruction in layout {
        match instruction {
            Instruction::Heading { text, level: 1 } => {
                doc.push(WordParagraph::new(Alignment::Center).with_run(Run::new(text).bold()));
            }
            Instruction::Heading { text, .. } => {
                doc.push(
                    WordParagraph::new(Alignment::Left)
                        .with_run(Run::new(text).bold().underline()),
                );
            }
            Instruction::Paragraph {
                text,
                numbered: Some(n),
                ..
            } => {
                doc.push(
                    WordParagraph::new(Alignment::Left)
                        .with_run(Run::new(format!("{}.\t{}", n, text)))
                        .with_hanging_indent(options.hanging_indent),
                );
            }
            Instruction::Paragraph {
                text,
                numbered: None,
                align,
                style,
            } => {
                let mut run = Run::new(text);
                run.bold = style.bold;
                run.italic = style.italic;
                doc.push(WordParagraph::new(*align).with_run(run));
            }
            Instruction::Rule => {
                doc.push(WordParagraph::rule());
            }
            Instruction::KeyValue { key, value } => {
                doc.push(
                    WordParagraph::new(Alignment::Left)
                        .with_run(Run::new(format!("{}: ", key)).bold())
                        .with_run(Run::new(value)),
                );
            }
            Instruction::SignatureBlock { name } => {
                for line in signature_lines(name) {
                    doc.push(WordParagraph::new(Alignment::Left).with_run(Run::new(line)));
                }
            }
        }
    }

    doc
}

/// An in-memory WordprocessingML document.
#[derive(Debug, Clone, PartialEq)]
pub struct WordDocument {
    /// Title written to the core properties
    pub title: String,

    /// Author written to the core properties
    pub author: Option<String>,

    /// Default font family
    pub font: String,

    /// Default font size in half-points
    pub font_size: u32,

    /// Page margin in twips
    pub margin: u32,

    /// Body paragraphs in order
    pub paragraphs: Vec<WordParagraph>,
}

impl WordDocument {
    /// Create an empty document using the given options.
    pub fn new(title: impl Into<String>, options: &DocxOptions) -> Self {
        Self {
            title: title.into(),
            author: options.author.clone(),
            font: options.font.clone(),
            font_size: options.font_size,
            margin: options.margin,
            paragraphs: Vec::new(),
        }
    }

    /// Append a paragraph.
    pub fn push(&mut self, paragraph: WordParagraph) {
        self.paragraphs.push(paragraph);
    }

    /// Concatenated run text of every paragraph, one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(WordParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize the main document part.
    pub fn document_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>",
        );
        for paragraph in &self.paragraphs {
            paragraph.write_xml(&mut xml, self);
        }
        xml.push_str(&format!(
            "<w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/>\
             <w:pgMar w:top=\"{m}\" w:right=\"{m}\" w:bottom=\"{m}\" w:left=\"{m}\" \
             w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/></w:sectPr>",
            m = self.margin
        ));
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn styles_xml(&self) -> String {
        let font = xml_escape(&self.font);
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:docDefaults><w:rPrDefault><w:rPr>\
             <w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\" w:eastAsia=\"{font}\"/>\
             <w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/><w:lang w:val=\"en-GB\"/>\
             </w:rPr></w:rPrDefault>\
             <w:pPrDefault><w:pPr><w:spacing w:after=\"120\"/></w:pPr></w:pPrDefault>\
             </w:docDefaults></w:styles>",
            font = font,
            size = self.font_size
        )
    }

    fn core_xml(&self) -> String {
        let creator = self
            .author
            .as_deref()
            .map(|a| format!("<dc:creator>{}</dc:creator>", xml_escape(a)))
            .unwrap_or_default();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <cp:coreProperties \
             xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
             xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\
             <dc:title>{}</dc:title>{}</cp:coreProperties>",
            xml_escape(&self.title),
            creator
        )
    }

    /// Serialize the document as a `.docx` package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("docProps/core.xml", self.core_xml()),
            ("word/document.xml", self.document_xml()),
            ("word/styles.xml", self.styles_xml()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        let bytes = zip.finish()?.into_inner();
        log::debug!(
            "serialized docx package: {} paragraphs, {} bytes",
            self.paragraphs.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// A paragraph of styled runs.
#[derive(Debug, Clone, PartialEq)]
pub struct WordParagraph {
    /// Runs in order
    pub runs: Vec<Run>,

    /// Paragraph alignment
    pub alignment: Alignment,

    /// Hanging indent in twips (left indent equals the hang)
    pub hanging_indent: Option<u32>,

    /// Draw a single bottom border (horizontal rule)
    pub bottom_border: bool,

    /// Spacing after the paragraph in twips, when not the default
    pub spacing_after: Option<u32>,
}

impl WordParagraph {
    /// Create an empty paragraph.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            runs: Vec::new(),
            alignment,
            hanging_indent: None,
            bottom_border: false,
            spacing_after: None,
        }
    }

    /// An empty paragraph drawn as a full-width rule.
    pub fn rule() -> Self {
        Self {
            bottom_border: true,
            spacing_after: Some(RULE_SPACING_AFTER),
            ..Self::new(Alignment::Left)
        }
    }

    /// Append a run.
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Set a hanging indent.
    pub fn with_hanging_indent(mut self, twips: u32) -> Self {
        self.hanging_indent = Some(twips);
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn write_xml(&self, xml: &mut String, doc: &WordDocument) {
        xml.push_str("<w:p><w:pPr>");
        if self.bottom_border {
            xml.push_str(&format!(
                "<w:pBdr><w:bottom w:val=\"single\" w:sz=\"{}\" w:space=\"1\" w:color=\"000000\"/></w:pBdr>",
                RULE_BORDER_SIZE
            ));
        }
        if let Some(after) = self.spacing_after {
            xml.push_str(&format!("<w:spacing w:after=\"{}\"/>", after));
        }
        if let Some(hang) = self.hanging_indent {
            xml.push_str(&format!(
                "<w:ind w:left=\"{0}\" w:hanging=\"{0}\"/>",
                hang
            ));
        }
        xml.push_str(&format!("<w:jc w:val=\"{}\"/>", justification(self.alignment)));
        xml.push_str("</w:pPr>");
        for run in &self.runs {
            run.write_xml(xml, doc);
        }
        xml.push_str("</w:p>");
    }
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    /// Run text; `\t` and `\n` become tab and break elements
    pub text: String,

    /// Bold
    pub bold: bool,

    /// Italic
    pub italic: bool,

    /// Single underline
    pub underline: bool,
}

impl Run {
    /// Create a plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Make the run bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Underline the run.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    fn write_xml(&self, xml: &mut String, doc: &WordDocument) {
        let font = xml_escape(&doc.font);
        xml.push_str("<w:r><w:rPr>");
        xml.push_str(&format!(
            "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:cs=\"{0}\"/>",
            font
        ));
        if self.bold {
            xml.push_str("<w:b/>");
        }
        if self.italic {
            xml.push_str("<w:i/>");
        }
        if self.underline {
            xml.push_str("<w:u w:val=\"single\"/>");
        }
        xml.push_str(&format!("<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>", doc.font_size));
        xml.push_str("</w:rPr>");

        let mut segment = String::new();
        for c in self.text.chars() {
            match c {
                '\t' | '\n' => {
                    push_text(xml, &segment);
                    segment.clear();
                    xml.push_str(if c == '\t' { "<w:tab/>" } else { "<w:br/>" });
                }
                '\r' => {}
                _ => segment.push(c),
            }
        }
        push_text(xml, &segment);
        xml.push_str("</w:r>");
    }
}

fn push_text(xml: &mut String, text: &str) {
    if !text.is_empty() {
        xml.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>",
            xml_escape(text)
        ));
    }
}

fn justification(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}

/// Escape XML markup and drop characters XML 1.0 cannot carry.
fn xml_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c if c.is_control() && !matches!(c, '\t' | '\n' | '\r') => {}
            c => result.push(c),
        }
    }
    result
}

const CONTENT_TYPES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
</Types>";

const PACKAGE_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
</Relationships>";

const DOCUMENT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\
</Relationships>";
