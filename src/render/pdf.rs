//! PDF export.
//!
//! Text is set in the standard Times faces with WinAnsi encoding, so no font
//! program is embedded. All layout arithmetic is done in millimetres from
//! the top-left corner and converted to PDF user space only when an
//! operation is emitted.
//!
//! Pagination state lives entirely in [`Cursor`]: the same layout rendered
//! with the same [`PageGeometry`] always breaks at the same lines.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::Result;
use crate::model::{signature_lines, Alignment, Instruction, Layout, TextStyle};

use super::{PageGeometry, PdfOptions};

/// MIME type of a PDF document.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PT_PER_MM: f32 = 72.0 / 25.4;
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Indent of numbered paragraph text from the left margin, in mm.
const NUMBER_INDENT: f32 = 10.0;

/// Space above a section heading, in mm.
const HEADING_SPACE: f32 = 4.0;

/// Space after every text block, in mm.
const BLOCK_SPACE: f32 = 2.0;

/// Space after a rule, in mm.
const RULE_SPACE: f32 = 6.0;

/// Space above a signature block, in mm.
const SIGNATURE_SPACE: f32 = 10.0;

/// A rendered PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfOutput {
    /// Serialized PDF bytes
    pub bytes: Vec<u8>,

    /// Number of pages
    pub page_count: usize,
}

/// Convert a layout to PDF.
pub fn to_pdf(layout: &Layout, options: &PdfOptions) -> Result<PdfOutput> {
    let pages = paginate(layout, options);
    let page_count = pages.len();
    let bytes = assemble(layout, &pages, &options.geometry)?;

    log::debug!(
        "rendered {} to pdf: {} pages, {} bytes",
        layout.kind,
        page_count,
        bytes.len()
    );
    Ok(PdfOutput { bytes, page_count })
}

/// Base fonts, in resource order (`F1`..`F4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Face {
    const ALL: [Face; 4] = [Face::Regular, Face::Bold, Face::Italic, Face::BoldItalic];

    fn from_style(style: TextStyle) -> Self {
        match (style.bold, style.italic) {
            (false, false) => Face::Regular,
            (true, false) => Face::Bold,
            (false, true) => Face::Italic,
            (true, true) => Face::BoldItalic,
        }
    }

    fn resource(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Italic => "F3",
            Face::BoldItalic => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Times-Roman",
            Face::Bold => "Times-Bold",
            Face::Italic => "Times-Italic",
            Face::BoldItalic => "Times-BoldItalic",
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, Face::Bold | Face::BoldItalic)
    }
}

/// Approximate advance width of a Times glyph, in thousandths of an em.
fn glyph_width(c: char, bold: bool) -> f32 {
    let width = match c {
        ' ' => 250.0,
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '\'' | '|' | '!' => 278.0,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 333.0,
        's' | 'J' => 389.0,
        'a' | 'c' | 'e' | 'z' | '"' => 444.0,
        'm' | '%' => 778.0,
        'w' | 'A' | 'D' | 'G' | 'H' | 'K' | 'N' | 'O' | 'Q' | 'U' | 'V' | 'X' | 'Y' => 722.0,
        'M' => 889.0,
        'W' => 944.0,
        'B' | 'C' | 'R' | 'E' | 'L' | 'T' | 'Z' | 'F' | 'P' | 'S' => 667.0,
        '_' | '0'..='9' => 500.0,
        c if c.is_lowercase() => 500.0,
        c if c.is_uppercase() => 722.0,
        _ => 500.0,
    };
    if bold {
        width * 1.05
    } else {
        width
    }
}

/// Width of `text` in millimetres at `size` points.
fn text_width(text: &str, face: Face, size: f32) -> f32 {
    let em: f32 = text.chars().map(|c| glyph_width(c, face.is_bold())).sum();
    em / 1000.0 * size * MM_PER_PT
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Words wider than a whole line are broken by character.
fn wrap(text: &str, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, face, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            for c in word.chars() {
                current.push(c);
                if text_width(&current, face, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        lines.push(current);
    }

    // Trailing empty lines from a terminating newline carry no text.
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Map a character to its WinAnsi code, if it has one.
fn win_ansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            '\t' => Some(b' '),
            _ => None,
        },
    }
}

/// Encode text for a WinAnsi font, substituting `?` for unmapped characters.
fn encode(text: &str) -> Vec<u8> {
    let mut substituted = 0usize;
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| {
            win_ansi(c).unwrap_or_else(|| {
                substituted += 1;
                b'?'
            })
        })
        .collect();

    if substituted > 0 {
        log::warn!(
            "{} character(s) not representable in the PDF base fonts were replaced: {:?}",
            substituted,
            text
        );
    }
    bytes
}

/// Vertical layout cursor. Owns every pagination decision.
struct Cursor {
    geometry: PageGeometry,
    line_height: f32,
    y: f32,
    pages: Vec<Vec<Operation>>,
}

impl Cursor {
    fn new(geometry: PageGeometry, line_height: f32) -> Self {
        Self {
            geometry,
            line_height,
            y: geometry.margin,
            pages: vec![Vec::new()],
        }
    }

    fn new_page(&mut self) {
        log::debug!("page break after page {} at {:.1} mm", self.pages.len(), self.y);
        self.pages.push(Vec::new());
        self.y = self.geometry.margin;
    }

    /// Start a new page when the cursor has passed the break line.
    fn ensure_room(&mut self) {
        if self.y > self.geometry.break_at {
            self.new_page();
        }
    }

    /// Move down, without ever leaving space at the top of a fresh page.
    fn advance(&mut self, mm: f32) {
        if self.y > self.geometry.margin {
            self.y += mm;
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn to_pdf_y(&self, y_mm: f32) -> f32 {
        (self.geometry.height - y_mm) * PT_PER_MM
    }

    /// Draw one line of text with its baseline at the cursor.
    fn text(&mut self, x_mm: f32, text: &str, face: Face, size: f32) {
        if text.is_empty() {
            return;
        }
        let x = x_mm * PT_PER_MM;
        let y = self.to_pdf_y(self.y);
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(face.resource().as_bytes().to_vec()), Object::Real(size)],
        ));
        ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Draw a wrapped block, one line per line height.
    fn block(&mut self, text: &str, face: Face, size: f32, align: Alignment, indent: f32) {
        let left = self.geometry.margin + indent;
        let width = self.geometry.content_width() - indent;

        for line in wrap(text, face, size, width) {
            self.ensure_room();
            let x = match align {
                Alignment::Left => left,
                Alignment::Right => {
                    self.geometry.width - self.geometry.margin - text_width(&line, face, size)
                }
                Alignment::Center => left + (width - text_width(&line, face, size)) / 2.0,
            };
            self.text(x, &line, face, size);
            self.y += self.line_height;
        }
    }

    /// Draw a full-width horizontal rule.
    fn rule(&mut self) {
        self.ensure_room();
        let left = self.geometry.margin * PT_PER_MM;
        let right = (self.geometry.width - self.geometry.margin) * PT_PER_MM;
        let y = self.to_pdf_y(self.y);
        let ops = self.ops();
        ops.push(Operation::new("w", vec![Object::Real(0.75)]));
        ops.push(Operation::new("m", vec![Object::Real(left), Object::Real(y)]));
        ops.push(Operation::new("l", vec![Object::Real(right), Object::Real(y)]));
        ops.push(Operation::new("S", vec![]));
        self.y += RULE_SPACE;
    }
}

/// Lay the instructions out into per-page content operations.
fn paginate(layout: &Layout, options: &PdfOptions) -> Vec<Vec<Operation>> {
    let size = options.font_size;
    let mut cursor = Cursor::new(options.geometry, options.line_height);

    for instruction in layout {
        match instruction {
            Instruction::Heading { text, level: 1 } => {
                cursor.block(text, Face::Bold, size, Alignment::Center, 0.0);
                cursor.y += BLOCK_SPACE;
            }
            Instruction::Heading { text, .. } => {
                cursor.advance(HEADING_SPACE);
                cursor.block(text, Face::Bold, size, Alignment::Left, 0.0);
                cursor.y += BLOCK_SPACE;
            }
            Instruction::Paragraph {
                text,
                numbered: Some(n),
                ..
            } => {
                cursor.ensure_room();
                let x = cursor.geometry.margin;
                cursor.text(x, &format!("{}.", n), Face::Regular, size);
                cursor.block(text, Face::Regular, size, Alignment::Left, NUMBER_INDENT);
                cursor.y += BLOCK_SPACE;
            }
            Instruction::Paragraph {
                text,
                numbered: None,
                align,
                style,
            } => {
                cursor.block(text, Face::from_style(*style), size, *align, 0.0);
                cursor.y += BLOCK_SPACE;
            }
            Instruction::Rule => cursor.rule(),
            Instruction::KeyValue { key, value } => {
                let label = format!("{}: ", key);
                let label_width = text_width(&label, Face::Bold, size);
                cursor.ensure_room();
                let x = cursor.geometry.margin;
                cursor.text(x, &label, Face::Bold, size);
                cursor.block(value, Face::Regular, size, Alignment::Left, label_width);
                cursor.y += BLOCK_SPACE;
            }
            Instruction::SignatureBlock { name } => {
                cursor.advance(SIGNATURE_SPACE);
                for line in signature_lines(name) {
                    cursor.block(&line, Face::Regular, size, Alignment::Left, 0.0);
                    cursor.y += BLOCK_SPACE;
                }
            }
        }
    }

    cursor.pages
}

/// Assemble page content into a PDF document.
fn assemble(layout: &Layout, pages: &[Vec<Operation>], geometry: &PageGeometry) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in Face::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content {
            operations: operations.clone(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.width * PT_PER_MM),
            Object::Real(geometry.height * PT_PER_MM),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode(&layout.title)),
        "Producer" => Object::string_literal("courtdocs"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
