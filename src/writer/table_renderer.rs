//! Table rendering for PDF generation.
//!
//! Single-line cells laid out on a full grid. Column widths are sized to
//! the widest cell using real font metrics, so centred text really is
//! centred.
//!
//! # Example
//!
//! ```ignore
//! use txn_report::writer::{Base14Metrics, Table, TableCell, TableRow, TableStyle};
//!
//! let table = Table::new(vec![
//!     TableRow::header(vec![TableCell::text("Name"), TableCell::text("Age")]),
//!     TableRow::new(vec![TableCell::text("Alice"), TableCell::text("30")]),
//! ])
//! .with_style(TableStyle::grid());
//! let layout = table.calculate_layout(500.0, &Base14Metrics);
//! ```

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::{Font, FontMetrics};

/// RGB color, components 0.0-1.0.
pub type Rgb = (f32, f32, f32);

/// Black.
pub const BLACK: Rgb = (0.0, 0.0, 0.0);
/// White.
pub const WHITE: Rgb = (1.0, 1.0, 1.0);
/// Mid grey (#808080).
pub const GREY: Rgb = (0.50196, 0.50196, 0.50196);

/// Border style for grid lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableBorderStyle {
    /// Border width in points
    pub width: f32,
    /// Border color
    pub color: Rgb,
}

impl Default for TableBorderStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: BLACK,
        }
    }
}

impl TableBorderStyle {
    /// Create a new black border of the given width.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }
}

/// Cell padding configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPadding {
    /// Top padding in points
    pub top: f32,
    /// Right padding in points
    pub right: f32,
    /// Bottom padding in points
    pub bottom: f32,
    /// Left padding in points
    pub left: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self::symmetric(6.0, 3.0)
    }
}

impl CellPadding {
    /// Horizontal (left/right) and vertical (top/bottom) padding.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A single-line table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Cell content (text)
    pub content: String,
}

impl TableCell {
    /// Create a new text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
    /// Whether this is a header row
    pub is_header: bool,
    /// Render every cell bold
    pub bold: bool,
}

impl TableRow {
    /// Create a new body row.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
            bold: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            is_header: true,
            ..Self::new(cells)
        }
    }

    /// Mark the whole row bold.
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Table style configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Cell padding
    pub cell_padding: CellPadding,
    /// Grid lines between and around all cells
    pub grid: Option<TableBorderStyle>,
    /// Body font size
    pub font_size: f32,
    /// Header font size
    pub header_font_size: f32,
    /// Header row uses the bold face
    pub header_bold: bool,
    /// Header row background color
    pub header_background: Option<Rgb>,
    /// Header text color
    pub header_text_color: Rgb,
    /// Body text color
    pub text_color: Rgb,
    /// Line height as a multiple of font size
    pub leading: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            cell_padding: CellPadding::default(),
            grid: None,
            font_size: 10.0,
            header_font_size: 10.0,
            header_bold: false,
            header_background: None,
            header_text_color: BLACK,
            text_color: BLACK,
            leading: 1.2,
        }
    }
}

impl TableStyle {
    /// Full 1pt black grid, grey header with white bold text.
    pub fn grid() -> Self {
        Self {
            grid: Some(TableBorderStyle::new(1.0)),
            header_bold: true,
            header_background: Some(GREY),
            header_text_color: WHITE,
            ..Self::default()
        }
    }

    /// Set cell padding.
    pub fn cell_padding(mut self, padding: CellPadding) -> Self {
        self.cell_padding = padding;
        self
    }

    /// Set grid line style.
    pub fn grid_lines(mut self, border: TableBorderStyle) -> Self {
        self.grid = Some(border);
        self
    }

    /// Set body and header font sizes.
    pub fn font_sizes(mut self, body: f32, header: f32) -> Self {
        self.font_size = body;
        self.header_font_size = header;
        self
    }
}

/// A complete table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
    /// Table style
    pub style: TableStyle,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            style: TableStyle::default(),
        }
    }

    /// Set table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the number of columns.
    pub fn num_columns(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    fn row_font(&self, row: &TableRow) -> (Font, f32) {
        let bold = row.bold || (row.is_header && self.style.header_bold);
        let size = if row.is_header {
            self.style.header_font_size
        } else {
            self.style.font_size
        };
        (Font::weighted(bold), size)
    }
}

/// Calculated layout for a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Calculated column widths in points
    pub column_widths: Vec<f32>,
    /// Calculated row heights in points
    pub row_heights: Vec<f32>,
    /// Total table width
    pub total_width: f32,
    /// Total table height
    pub total_height: f32,
}

impl Table {
    /// Calculate the layout for this table.
    ///
    /// Columns shrink proportionally when their natural widths exceed
    /// `max_width`.
    pub fn calculate_layout(&self, max_width: f32, font_metrics: &dyn FontMetrics) -> TableLayout {
        let num_cols = self.num_columns();
        if num_cols == 0 {
            return TableLayout {
                column_widths: vec![],
                row_heights: vec![],
                total_width: 0.0,
                total_height: 0.0,
            };
        }

        let column_widths = self.calculate_column_widths(max_width, num_cols, font_metrics);
        let row_heights = self.calculate_row_heights();

        let total_width: f32 = column_widths.iter().sum();
        let total_height: f32 = row_heights.iter().sum();

        TableLayout {
            column_widths,
            row_heights,
            total_width,
            total_height,
        }
    }

    fn calculate_column_widths(
        &self,
        max_width: f32,
        num_cols: usize,
        font_metrics: &dyn FontMetrics,
    ) -> Vec<f32> {
        let padding = self.style.cell_padding.horizontal();
        let mut widths = vec![0.0f32; num_cols];

        for row in &self.rows {
            let (font, size) = self.row_font(row);
            for (col, cell) in row.cells.iter().enumerate() {
                let text_width = font_metrics.text_width(&cell.content, font, size);
                widths[col] = widths[col].max(text_width + padding);
            }
        }

        // Scale if total exceeds available width
        let total: f32 = widths.iter().sum();
        if total > max_width && total > 0.0 {
            let scale = max_width / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn calculate_row_heights(&self) -> Vec<f32> {
        let padding = self.style.cell_padding.vertical();
        self.rows
            .iter()
            .map(|row| self.row_font(row).1 * self.style.leading + padding)
            .collect()
    }

    /// Render the table to a content stream with its top-left corner at
    /// (`x`, `y`).
    ///
    /// Text is centred horizontally on its measured width and vertically
    /// on the cap height.
    pub fn render(
        &self,
        builder: &mut ContentStreamBuilder,
        x: f32,
        y: f32,
        layout: &TableLayout,
        font_metrics: &dyn FontMetrics,
    ) {
        // Y is top of table, PDF coordinates are bottom-up
        let table_top = y;

        // Backgrounds first so grid lines sit on top
        let mut row_top = table_top;
        for (row, height) in self.rows.iter().zip(&layout.row_heights) {
            if let (true, Some((r, g, b))) = (row.is_header, self.style.header_background) {
                builder
                    .set_fill_color(r, g, b)
                    .rect(x, row_top - height, layout.total_width, *height)
                    .fill();
            }
            row_top -= height;
        }

        if let Some(grid) = self.style.grid.filter(|g| g.width > 0.0) {
            self.draw_grid(builder, x, table_top, layout, &grid);
        }

        let padding = &self.style.cell_padding;
        let mut row_top = table_top;
        for (row, row_height) in self.rows.iter().zip(&layout.row_heights) {
            let (r, g, b) = if row.is_header {
                self.style.header_text_color
            } else {
                self.style.text_color
            };
            builder.set_fill_color(r, g, b);

            let (font, size) = self.row_font(row);
            let cap = font.cap_height() * size / 1000.0;
            let text_y = row_top - (row_height + cap) / 2.0;

            let mut cell_left = x;
            for (cell, col_width) in row.cells.iter().zip(&layout.column_widths) {
                if !cell.content.is_empty() {
                    let text_width = font_metrics.text_width(&cell.content, font, size);
                    let content_width = col_width - padding.horizontal();
                    let text_x = cell_left + padding.left + (content_width - text_width) / 2.0;
                    builder.set_font(font, size).text(&cell.content, text_x, text_y);
                }
                cell_left += col_width;
            }
            builder.end_text();
            row_top -= row_height;
        }
    }

    fn draw_grid(
        &self,
        builder: &mut ContentStreamBuilder,
        x: f32,
        top: f32,
        layout: &TableLayout,
        grid: &TableBorderStyle,
    ) {
        let (r, g, b) = grid.color;
        let right = x + layout.total_width;
        let bottom = top - layout.total_height;

        builder.set_stroke_color(r, g, b).set_line_width(grid.width);

        let mut line_y = top;
        builder.move_to(x, line_y).line_to(right, line_y);
        for height in &layout.row_heights {
            line_y -= height;
            builder.move_to(x, line_y).line_to(right, line_y);
        }

        let mut line_x = x;
        builder.move_to(line_x, top).line_to(line_x, bottom);
        for width in &layout.column_widths {
            line_x += width;
            builder.move_to(line_x, top).line_to(line_x, bottom);
        }

        builder.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::font_metrics::Base14Metrics;

    fn sample_table() -> Table {
        Table::new(vec![
            TableRow::header(vec![TableCell::text("Name"), TableCell::text("Value")]),
            TableRow::new(vec![TableCell::text("Test"), TableCell::text("123")]),
            TableRow::new(vec![TableCell::text("Total"), TableCell::text("123")]).with_bold(),
        ])
        .with_style(TableStyle::grid().font_sizes(10.0, 12.0))
    }

    fn rendered(table: &Table) -> String {
        let layout = table.calculate_layout(500.0, &Base14Metrics);
        let mut builder = ContentStreamBuilder::new();
        table.render(&mut builder, 50.0, 700.0, &layout, &Base14Metrics);
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    /// (x, y) of every `Tm` operator, in stream order.
    fn text_positions(content: &str) -> Vec<(f32, f32)> {
        content
            .lines()
            .filter(|line| line.ends_with(" Tm"))
            .map(|line| {
                let parts: Vec<f32> =
                    line.split(' ').take(6).map(|v| v.parse().unwrap()).collect();
                (parts[4], parts[5])
            })
            .collect()
    }

    #[test]
    fn test_table_creation() {
        let table = sample_table();
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows[0].is_header);
        assert!(table.rows[2].bold);
    }

    #[test]
    fn test_cell_padding() {
        let padding = CellPadding::symmetric(5.0, 10.0);
        assert_eq!(padding.horizontal(), 10.0);
        assert_eq!(padding.vertical(), 20.0);
        assert_eq!(CellPadding::default(), CellPadding::symmetric(6.0, 3.0));
    }

    #[test]
    fn test_table_layout_calculation() {
        let table = sample_table();
        let layout = table.calculate_layout(500.0, &Base14Metrics);

        assert_eq!(layout.column_widths.len(), 2);
        assert_eq!(layout.row_heights.len(), 3);
        // header row uses the larger font
        assert!(layout.row_heights[0] > layout.row_heights[1]);
        // "Value" in bold 12pt is the widest cell of column 2
        let value_width = Base14Metrics.text_width("Value", Font::HelveticaBold, 12.0);
        let expected = value_width + table.style.cell_padding.horizontal();
        assert!((layout.column_widths[1] - expected).abs() < 0.001);
        assert!((layout.total_width - layout.column_widths.iter().sum::<f32>()).abs() < 0.001);
    }

    #[test]
    fn test_layout_shrinks_to_max_width() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::text("a very long cell that will not fit"),
            TableCell::text("another fairly long cell"),
        ])]);
        let layout = table.calculate_layout(100.0, &Base14Metrics);
        assert!((layout.total_width - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec![]);
        assert_eq!(table.num_columns(), 0);
        let layout = table.calculate_layout(100.0, &Base14Metrics);
        assert_eq!(layout.total_height, 0.0);
    }

    #[test]
    fn test_render_header_background_and_grid() {
        let content = rendered(&sample_table());
        assert!(content.contains("0.50196 0.50196 0.50196 rg"));
        assert!(content.contains("1 1 1 rg"));
        assert!(content.contains("0 0 0 RG"));
        assert!(content.contains("1 w"));
        // 4 horizontal + 3 vertical grid lines
        assert_eq!(content.matches(" m\n").count(), 7);
    }

    #[test]
    fn test_render_fonts() {
        let content = rendered(&sample_table());
        assert!(content.contains("/F2 12 Tf"));
        assert!(content.contains("/F1 10 Tf"));
        assert!(content.contains("/F2 10 Tf"));
        assert!(content.contains("(Total) Tj"));
    }

    #[test]
    fn test_text_is_horizontally_centred() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::text("WWWWWW"),
            TableCell::text("i"),
        ])])
        .with_style(TableStyle::grid());
        let layout = table.calculate_layout(500.0, &Base14Metrics);
        let mut builder = ContentStreamBuilder::new();
        table.render(&mut builder, 0.0, 100.0, &layout, &Base14Metrics);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();

        let positions = text_positions(&content);
        assert_eq!(positions.len(), 2);

        // the narrow cell's text sits in the middle of its column
        let i_width = Base14Metrics.text_width("i", Font::Helvetica, 10.0);
        let col_centre = layout.column_widths[0] + layout.column_widths[1] / 2.0;
        assert!((positions[1].0 + i_width / 2.0 - col_centre).abs() < 0.01);
    }

    #[test]
    fn test_text_is_vertically_centred_on_cap_height() {
        let table = Table::new(vec![TableRow::new(vec![TableCell::text("X")])])
            .with_style(TableStyle::grid());
        let layout = table.calculate_layout(500.0, &Base14Metrics);
        let mut builder = ContentStreamBuilder::new();
        table.render(&mut builder, 0.0, 100.0, &layout, &Base14Metrics);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();

        let (_, baseline) = text_positions(&content)[0];
        let cap = Font::Helvetica.cap_height() * 10.0 / 1000.0;
        // equal space above the cap line and below the baseline
        let above = 100.0 - (baseline + cap);
        let below = baseline - (100.0 - layout.row_heights[0]);
        assert!((above - below).abs() < 0.01);
    }

    #[test]
    fn test_empty_cells_emit_no_text() {
        let table =
            Table::new(vec![TableRow::new(vec![TableCell::text(""), TableCell::text("x")])]);
        let content = rendered(&table);
        assert_eq!(content.matches("Tj").count(), 1);
    }
}
