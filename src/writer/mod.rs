//! PDF writing module for generating report documents.
//!
//! ## Architecture
//!
//! ```text
//! Report
//!     ↓
//! [DocumentRenderer] (caption + table per page)
//!     ↓
//! [Table] (layout from font metrics, grid, centred text)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Low-Level API (PdfWriter)
//!
//! ```ignore
//! use txn_report::writer::{Font, PdfWriter, PdfWriterConfig};
//!
//! let mut writer = PdfWriter::with_config(PdfWriterConfig::default());
//! let mut page = writer.add_page(612.0, 792.0);
//! page.content().set_font(Font::Helvetica, 12.0).text("Hello, World!", 72.0, 720.0);
//! page.finish();
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod document_renderer;
mod font_metrics;
mod object_serializer;
mod pdf_writer;
mod table_renderer;

pub use content_stream::ContentStreamBuilder;
pub use document_renderer::DocumentRenderer;
pub use font_metrics::{encode_win_ansi, Base14Metrics, Font, FontMetrics};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
pub use table_renderer::{
    CellPadding, Rgb, Table, TableBorderStyle, TableCell, TableLayout, TableRow, TableStyle,
};
