//! HTML preview rendering.

use crate::format::escape_html;
use crate::model::{signature_lines, Alignment, Instruction, Layout, TextStyle};

use super::HtmlOptions;

const STYLESHEET: &str = "\
.court-document { font-family: 'Century Gothic', sans-serif; font-size: 12pt; line-height: 1.5; max-width: 210mm; margin: 0 auto; }
.court-document p { margin: 0 0 0.6em; }
.court-document .align-center { text-align: center; }
.court-document .align-right { text-align: right; }
.court-document .doc-title { font-size: 12pt; text-align: center; margin: 0.6em 0; }
.court-document .section-heading { font-size: 12pt; text-decoration: underline; margin: 1em 0 0.6em; }
.court-document .numbered { padding-left: 2.5em; text-indent: -2.5em; }
.court-document .para-num { display: inline-block; width: 2.5em; text-indent: 0; }
.court-document .header-line { border: 0; border-top: 2px solid #000; }
.court-document .signature-block { margin-top: 2em; }
";

/// Convert a layout to HTML.
pub fn to_html(layout: &Layout, options: &HtmlOptions) -> String {
    HtmlRenderer::new(options.clone()).render(layout)
}

/// HTML preview renderer.
pub struct HtmlRenderer {
    options: HtmlOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Render a layout to an HTML fragment or page.
    pub fn render(&self, layout: &Layout) -> String {
        let mut body = String::from("<div class=\"court-document\">\n");
        for instruction in layout {
            self.render_instruction(&mut body, instruction);
        }
        body.push_str("</div>\n");

        if !self.options.standalone {
            return body;
        }

        let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en-GB\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_html(&layout.title)));
        if self.options.include_styles {
            page.push_str("<style>\n");
            page.push_str(STYLESHEET);
            page.push_str("</style>\n");
        }
        page.push_str("</head>\n<body>\n");
        page.push_str(&body);
        page.push_str("</body>\n</html>\n");
        page
    }

    fn render_instruction(&self, output: &mut String, instruction: &Instruction) {
        match instruction {
            Instruction::Heading { text, level } => {
                // Deserialized layouts may carry any level.
                let level = (*level).clamp(1, 6);
                let class = if level == 1 { "doc-title" } else { "section-heading" };
                output.push_str(&format!(
                    "<h{level} class=\"{class}\">{}</h{level}>\n",
                    inline(text),
                    level = level,
                    class = class
                ));
            }
            Instruction::Paragraph {
                text,
                numbered: Some(n),
                ..
            } => {
                output.push_str(&format!(
                    "<p class=\"numbered\"><span class=\"para-num\">{}.</span>{}</p>\n",
                    n,
                    inline(text)
                ));
            }
            Instruction::Paragraph {
                text,
                numbered: None,
                align,
                style,
            } => {
                let class = alignment_class(*align)
                    .map(|c| format!(" class=\"{}\"", c))
                    .unwrap_or_default();
                output.push_str(&format!("<p{}>{}</p>\n", class, emphasise(&inline(text), *style)));
            }
            Instruction::Rule => output.push_str("<hr class=\"header-line\">\n"),
            Instruction::KeyValue { key, value } => {
                output.push_str(&format!(
                    "<p class=\"key-value\"><strong>{}:</strong> {}</p>\n",
                    escape_html(key),
                    inline(value)
                ));
            }
            Instruction::SignatureBlock { name } => {
                output.push_str("<div class=\"signature-block\">\n");
                for line in signature_lines(name) {
                    output.push_str(&format!("<p>{}</p>\n", escape_html(&line)));
                }
                output.push_str("</div>\n");
            }
        }
    }
}

/// Escaped text with embedded line breaks kept.
fn inline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

fn alignment_class(align: Alignment) -> Option<&'static str> {
    match align {
        Alignment::Left => None,
        Alignment::Center => Some("align-center"),
        Alignment::Right => Some("align-right"),
    }
}

fn emphasise(html: &str, style: TextStyle) -> String {
    let mut result = html.to_string();
    if style.italic {
        result = format!("<em>{}</em>", result);
    }
    if style.bold {
        result = format!("<strong>{}</strong>", result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentKind;

    fn layout() -> Layout {
        let mut layout = Layout::new(DocumentKind::DraftOrder, "ORDER");
        layout.push(Instruction::styled("Case No: 1", Alignment::Right, TextStyle::BOLD));
        layout.push(Instruction::Rule);
        layout.push(Instruction::heading("ORDER", 1));
        layout.push(Instruction::heading("IT IS ORDERED THAT:", 2));
        layout.push(Instruction::numbered(1, "Pay <£100> & costs"));
        layout
    }

    #[test]
    fn test_fragment() {
        let html = to_html(&layout(), &HtmlOptions::default());
        assert!(html.starts_with("<div class=\"court-document\">"));
        assert!(html.contains("<p class=\"align-right\"><strong>Case No: 1</strong></p>"));
        assert!(html.contains("<hr class=\"header-line\">"));
        assert!(html.contains("<h1 class=\"doc-title\">ORDER</h1>"));
        assert!(html.contains("<h2 class=\"section-heading\">IT IS ORDERED THAT:</h2>"));
        assert!(html.contains("<span class=\"para-num\">1.</span>Pay &lt;£100&gt; &amp; costs"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn test_standalone_page() {
        let options = HtmlOptions::new().with_standalone(true);
        let html = to_html(&layout(), &options);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>ORDER</title>"));
        assert!(html.contains("<style>"));

        let bare = to_html(&layout(), &options.with_styles(false));
        assert!(!bare.contains("<style>"));
    }

    #[test]
    fn test_signature_and_key_value() {
        let mut layout = Layout::new(DocumentKind::WitnessStatement, "W");
        layout.push(Instruction::key_value("Exhibit", "JD-1"));
        layout.push(Instruction::signature("Jane <Doe>"));
        let html = to_html(&layout, &HtmlOptions::default());
        assert!(html.contains("<strong>Exhibit:</strong> JD-1"));
        assert!(html.contains("<p>Name: Jane &lt;Doe&gt;</p>"));
        assert!(html.contains("<p>Signed: ____________________________</p>"));
    }

    #[test]
    fn test_line_breaks_kept() {
        let mut layout = Layout::new(DocumentKind::DraftOrder, "ORDER");
        layout.push(Instruction::paragraph("first\nsecond"));
        let html = to_html(&layout, &HtmlOptions::default());
        assert!(html.contains("<p>first<br>second</p>"));
    }

    #[test]
    fn test_out_of_range_heading_levels() {
        let layout: Layout = serde_json::from_str(
            r#"{"kind": "draft-order", "title": "ORDER", "instructions": [
                {"type": "heading", "text": "Zero", "level": 0},
                {"type": "heading", "text": "Nine", "level": 9}
            ]}"#,
        )
        .unwrap();
        let html = to_html(&layout, &HtmlOptions::default());
        assert!(html.contains("<h1 class=\"doc-title\">Zero</h1>"));
        assert!(html.contains("<h6 class=\"section-heading\">Nine</h6>"));
        assert!(!html.contains("<h0"));
        assert!(!html.contains("<h9"));
    }
}
