//! Report to PDF rendering.
//!
//! Each report page becomes one PDF page: a caption block spanning the
//! table width, then the page's table centred horizontally.

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::{Base14Metrics, Font, FontMetrics};
use super::pdf_writer::{write_atomic, PdfWriter, PdfWriterConfig};
use super::table_renderer::{
    CellPadding, Table, TableBorderStyle, TableCell, TableRow, TableStyle, GREY, WHITE,
};
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::report::{Page, Report};
use std::path::Path;

/// Vertical padding above and below the caption text.
const CAPTION_PADDING: f32 = 3.0;

/// Renders a [`Report`] into PDF bytes.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    config: ReportConfig,
    metrics: Base14Metrics,
}

impl DocumentRenderer {
    /// Create a renderer for the given presentation settings.
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            config: config.clone(),
            metrics: Base14Metrics,
        }
    }

    /// Render every page of `report`.
    ///
    /// Fails with [`Error::Render`] if a page's caption and table do not
    /// fit between the top and bottom margins.
    pub fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let writer_config = PdfWriterConfig::default()
            .with_title(self.config.title.clone())
            .with_compress(self.config.compress);
        let mut writer = PdfWriter::with_config(writer_config);

        for page in report.pages() {
            self.render_page(&mut writer, &page, report.page_count())?;
        }

        log::debug!("Rendered {} pages", writer.page_count());
        writer.finish()
    }

    /// Render `report` and write it to `path`.
    pub fn save(&self, report: &Report, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render(report)?;
        write_atomic(path.as_ref(), &bytes)
    }

    fn render_page(&self, writer: &mut PdfWriter, page: &Page<'_>, page_count: usize) -> Result<()> {
        let cfg = &self.config;
        let table = self.build_table(page, page.number == page_count);

        let max_width = cfg.page_width - 2.0 * cfg.margin_side;
        let layout = table.calculate_layout(max_width, &self.metrics);

        let caption_height = cfg.caption_font_size * 1.2 + 2.0 * CAPTION_PADDING;
        let needed = caption_height + cfg.caption_space_after + layout.total_height;
        let available = cfg.page_height - cfg.margin_top - cfg.margin_bottom;
        if needed > available {
            return Err(Error::Render(format!(
                "page {} needs {:.1}pt of height but only {:.1}pt is available",
                page.number, needed, available
            )));
        }

        let left = (cfg.page_width - layout.total_width) / 2.0;
        let top = cfg.page_height - cfg.margin_top;

        let mut builder = writer.add_page(cfg.page_width, cfg.page_height);
        self.draw_caption(builder.content(), left, top, layout.total_width, caption_height);
        let table_top = top - caption_height - cfg.caption_space_after;
        table.render(builder.content(), left, table_top, &layout, &self.metrics);
        builder.finish();

        log::trace!(
            "Page {}: {} rows, table {:.1}x{:.1}pt",
            page.number,
            page.len(),
            layout.total_width,
            layout.total_height
        );
        Ok(())
    }

    fn build_table(&self, page: &Page<'_>, is_last_page: bool) -> Table {
        let cfg = &self.config;
        let mut rows = Vec::with_capacity(page.len() + 1);
        rows.push(TableRow::header(page.header().iter().map(|h| TableCell::text(*h)).collect()));

        for row in page.rows {
            let cells = row.cells().into_iter().map(TableCell::text).collect();
            let table_row = TableRow::new(cells);
            rows.push(if row.is_total() && is_last_page {
                table_row.with_bold()
            } else {
                table_row
            });
        }

        let style = TableStyle::grid()
            .cell_padding(CellPadding::symmetric(cfg.cell_padding.0, cfg.cell_padding.1))
            .grid_lines(TableBorderStyle::new(cfg.grid_width))
            .font_sizes(cfg.body_font_size, cfg.header_font_size);

        Table::new(rows).with_style(style)
    }

    fn draw_caption(
        &self,
        builder: &mut ContentStreamBuilder,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    ) {
        let size = self.config.caption_font_size;
        let font = Font::HelveticaBold;
        let (r, g, b) = GREY;
        builder.set_fill_color(r, g, b).rect(left, top - height, width, height).fill();

        let title = &self.config.title;
        let inset = self.config.cell_padding.0;
        // overlong titles start at the block's left edge and run past it
        let text_x = left + inset.min((width - self.metrics.text_width(title, font, size)).max(0.0));
        let cap = font.cap_height() * size / 1000.0;
        let text_y = top - (height + cap) / 2.0;

        let (r, g, b) = WHITE;
        builder.set_fill_color(r, g, b).set_font(font, size).text(title, text_x, text_y);
        builder.end_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Record;

    fn report_of(n: usize, config: &ReportConfig) -> Report {
        let records = (0..n)
            .map(|i| Record::new(format!("2024-01-{:02}", i % 28 + 1), "SUCCESS", "10.5", "p@upi"))
            .collect();
        Report::build(records, config).unwrap()
    }

    fn render_string(report: &Report, config: &ReportConfig) -> String {
        let bytes = DocumentRenderer::new(config).render(report).unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_single_page_report() {
        let config = ReportConfig::default();
        let content = render_string(&report_of(3, &config), &config);

        assert!(content.starts_with("%PDF-"));
        assert!(content.contains("/Count 1"));
        assert_eq!(content.matches("(Your Table Title) Tj").count(), 1);
        assert!(content.contains("(Sr_No) Tj"));
        assert!(content.contains("(Customer_VPA) Tj"));
        assert!(content.contains("(31.5) Tj"));
    }

    #[test]
    fn test_header_and_caption_repeat_per_page() {
        let config = ReportConfig::default();
        let content = render_string(&report_of(85, &config), &config);

        assert!(content.contains("/Count 3"));
        assert_eq!(content.matches("(Your Table Title) Tj").count(), 3);
        assert_eq!(content.matches("(Transaction_Date) Tj").count(), 3);
    }

    #[test]
    fn test_total_row_is_bold() {
        let config = ReportConfig::default();
        let content = render_string(&report_of(2, &config), &config);

        let total_at = content.find("(Total) Tj").unwrap();
        let last_font = content[..total_at].rfind(" Tf").unwrap();
        let font_line_start = content[..last_font].rfind('\n').unwrap() + 1;
        assert_eq!(&content[font_line_start..last_font], "/F2 10");
    }

    #[test]
    fn test_zero_row_report_renders_total_only() {
        let config = ReportConfig::default();
        let content = render_string(&report_of(0, &config), &config);
        assert!(content.contains("/Count 1"));
        assert!(content.contains("(Total) Tj"));
        assert!(content.contains("(0) Tj"));
    }

    #[test]
    fn test_table_is_centred() {
        let config = ReportConfig::default();
        let report = report_of(3, &config);
        let pages = report.pages();
        let renderer = DocumentRenderer::new(&config);
        let table = renderer.build_table(&pages[0], true);
        let layout = table.calculate_layout(config.page_width, &renderer.metrics);
        assert!(layout.total_width <= config.page_width - 2.0 * config.margin_side);
        assert_eq!(layout.row_heights.len(), 5);
        assert!(table.rows[0].is_header);
        assert!(table.rows[4].bold);
        assert!(!table.rows[3].bold);

        let content = render_string(&report, &config);
        let left = (config.page_width - layout.total_width) / 2.0;
        let bottom = config.page_height - config.margin_top - 18.0;
        let caption = format!(
            "{} {} {} 18 re",
            crate::writer::object_serializer::format_real(left as f64),
            crate::writer::object_serializer::format_real(bottom as f64),
            crate::writer::object_serializer::format_real(layout.total_width as f64)
        );
        assert!(content.contains(&caption), "missing {}", caption);
    }

    #[test]
    fn test_custom_page_size() {
        let config = ReportConfig::default().with_page_size(595.0, 842.0);
        let content = render_string(&report_of(3, &config), &config);
        assert!(content.contains("/MediaBox [0 0 595 842]"));
    }

    #[test]
    fn test_overfull_page_is_render_error() {
        let config = ReportConfig::default().with_rows_per_page(200);
        let report = report_of(150, &config);
        match DocumentRenderer::new(&config).render(&report) {
            Err(Error::Render(msg)) => assert!(msg.contains("page 1")),
            other => panic!("expected render error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let config = ReportConfig::default().with_compress(true);
        let report = report_of(50, &config);
        let renderer = DocumentRenderer::new(&config);
        assert_eq!(renderer.render(&report).unwrap(), renderer.render(&report).unwrap());
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        let config = ReportConfig::default().with_title("R\u{20b9} report");
        let content = render_string(&report_of(1, &config), &config);
        assert!(content.contains("(R? report) Tj"));
    }
}
