//! Base-14 Helvetica metrics and WinAnsi text encoding.
//!
//! Only the two faces the report uses are carried. Widths are the standard
//! AFM advance widths in 1/1000 em for the printable ASCII range.

/// A standard (non-embedded) font used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    /// Helvetica regular
    Helvetica,
    /// Helvetica bold
    HelveticaBold,
}

impl Font {
    /// Every font the writer registers, in resource order.
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// PostScript name used as `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in a page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// Regular or bold face.
    pub fn weighted(bold: bool) -> Self {
        if bold {
            Font::HelveticaBold
        } else {
            Font::Helvetica
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn char_width(self, ch: char) -> u16 {
        let table = match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match ch as u32 {
            code @ 0x20..=0x7E => table[(code - 0x20) as usize],
            // Latin-1 letters fall back to a typical lowercase width
            _ => 556,
        }
    }

    /// Cap height in 1/1000 em.
    pub fn cap_height(self) -> f32 {
        718.0
    }
}

/// Trait for font metrics needed for layout.
pub trait FontMetrics {
    /// Calculate the width of text in points.
    fn text_width(&self, text: &str, font: Font, font_size: f32) -> f32;
}

/// Metrics from the standard Helvetica AFM tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base14Metrics;

impl FontMetrics for Base14Metrics {
    fn text_width(&self, text: &str, font: Font, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| font.char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }
}

/// Encode text to WinAnsiEncoding bytes.
///
/// ASCII and Latin-1 map directly; the euro sign and typographic quotes
/// use their cp1252 slots; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => ch as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
