//! PDF content stream builder.
//!
//! Builds page content streams from graphics and text operators
//! (ISO 32000-1:2008, Sections 8 and 9).

use super::font_metrics::{encode_win_ansi, Font};
use super::object_serializer::{format_real, write_escaped};
use std::io::{self, Write};

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Select font resource and size (Tf)
    SetFont(&'static str, f32),
    /// Set text matrix to a pure translation (Tm)
    SetTextPosition(f32, f32),
    /// Show WinAnsi-encoded text (Tj)
    ShowText(Vec<u8>),
    /// Set fill color, RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set stroke color, RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Begin subpath (m)
    MoveTo(f32, f32),
    /// Line segment (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke path (S)
    Stroke,
    /// Fill path, nonzero winding (f)
    Fill,
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Font currently selected inside the open text object
    current_font: Option<(Font, f32)>,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
            self.current_font = None;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations; repeated selections are elided.
    pub fn set_font(&mut self, font: Font, size: f32) -> &mut Self {
        self.begin_text();
        if self.current_font != Some((font, size)) {
            self.op(ContentStreamOp::SetFont(font.resource_name(), size));
            self.current_font = Some((font, size));
        }
        self
    }

    /// Show text with its baseline origin at (x, y).
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextPosition(x, y));
        self.op(ContentStreamOp::ShowText(encode_win_ansi(text)))
    }

    /// Set fill color with RGB values.
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(r, g, b))
    }

    /// Set stroke color with RGB values.
    pub fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRGB(r, g, b))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Move to a point (start a new subpath).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Build the content stream to bytes, closing any open text object.
    pub fn build(&mut self) -> io::Result<Vec<u8>> {
        self.end_text();
        let mut buf = Vec::new();
        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        Ok(buf)
    }
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> io::Result<()> {
    let n = |v: &f32| format_real(*v as f64);
    match op {
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, n(size)),
        ContentStreamOp::SetTextPosition(x, y) => write!(w, "1 0 0 1 {} {} Tm", n(x), n(y)),
        ContentStreamOp::ShowText(bytes) => {
            write!(w, "(")?;
            write_escaped(w, bytes)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetFillColorRGB(r, g, b) => write!(w, "{} {} {} rg", n(r), n(g), n(b)),
        ContentStreamOp::SetStrokeColorRGB(r, g, b) => write!(w, "{} {} {} RG", n(r), n(g), n(b)),
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", n(width)),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", n(x), n(y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", n(x), n(y)),
        ContentStreamOp::Rectangle(x, y, width, height) => {
            write!(w, "{} {} {} {} re", n(x), n(y), n(width), n(height))
        },
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
    }
}
