//! Rendering options and configuration.

/// Options for every output adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// HTML preview options
    pub html: HtmlOptions,

    /// Word-processor export options
    pub docx: DocxOptions,

    /// PDF export options
    pub pdf: PdfOptions,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML options.
    pub fn with_html(mut self, html: HtmlOptions) -> Self {
        self.html = html;
        self
    }

    /// Set the DOCX options.
    pub fn with_docx(mut self, docx: DocxOptions) -> Self {
        self.docx = docx;
        self
    }

    /// Set the PDF options.
    pub fn with_pdf(mut self, pdf: PdfOptions) -> Self {
        self.pdf = pdf;
        self
    }
}

/// Options for the HTML preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Emit a complete page instead of a fragment
    pub standalone: bool,

    /// Embed the default court-document stylesheet (standalone only)
    pub include_styles: bool,
}

impl HtmlOptions {
    /// Create new HTML options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a complete HTML page.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Enable or disable the embedded stylesheet.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            standalone: false,
            include_styles: true,
        }
    }
}

/// Options for the word-processor export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxOptions {
    /// Font family for every run
    pub font: String,

    /// Font size in half-points (24 = 12pt)
    pub font_size: u32,

    /// Page margin on every side, in twips (1440 = 1 inch)
    pub margin: u32,

    /// Hanging indent for numbered paragraphs, in twips
    pub hanging_indent: u32,

    /// Author written to the package core properties
    pub author: Option<String>,
}

impl DocxOptions {
    /// Create new DOCX options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the font size in points.
    pub fn with_font_size_pt(mut self, points: u32) -> Self {
        self.font_size = points * 2;
        self
    }

    /// Set the page margin in twips.
    pub fn with_margin(mut self, twips: u32) -> Self {
        self.margin = twips;
        self
    }

    /// Set the package author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            font: "Century Gothic".to_string(),
            font_size: 24,
            margin: 1440,
            hanging_indent: 720,
            author: None,
        }
    }
}

/// Page geometry for the PDF export, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Margin on every side
    pub margin: f32,

    /// Cursor position past which a new page starts
    pub break_at: f32,
}

impl PageGeometry {
    /// A4 portrait with 25 mm margins.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 25.0,
            break_at: 270.0,
        }
    }

    /// US Letter portrait with 25 mm margins.
    pub fn letter() -> Self {
        Self {
            width: 215.9,
            height: 279.4,
            margin: 25.0,
            break_at: 252.0,
        }
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the page-break line.
    pub fn with_break_at(mut self, break_at: f32) -> Self {
        self.break_at = break_at;
        self
    }

    /// Width available for text.
    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Options for the PDF export.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Page geometry
    pub geometry: PageGeometry,

    /// Body font size in points
    pub font_size: f32,

    /// Distance between baselines, in millimetres
    pub line_height: f32,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the body font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size.max(1.0);
        self
    }

    /// Set the line height.
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height.max(1.0);
        self
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            font_size: 12.0,
            line_height: 6.0,
        }
    }
}
