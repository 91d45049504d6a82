//! Configuration for report generation.
//!
//! The column set is fixed; everything here is presentation tuning.

/// Number of data rows placed on one page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 40;

/// Suffix inserted between the input file stem and the `.pdf` extension.
pub const OUTPUT_SUFFIX: &str = "_output";

/// Report generation configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Caption rendered above the table on every page.
    pub title: String,

    /// Maximum data rows per page (header row excluded).
    pub rows_per_page: usize,

    /// Page width in points.
    pub page_width: f32,

    /// Page height in points.
    pub page_height: f32,

    /// Top margin in points.
    pub margin_top: f32,

    /// Bottom margin in points.
    pub margin_bottom: f32,

    /// Left and right margin in points; bounds the table width.
    pub margin_side: f32,

    /// Caption font size.
    pub caption_font_size: f32,

    /// Space between the caption block and the table.
    pub caption_space_after: f32,

    /// Table header font size.
    pub header_font_size: f32,

    /// Table body font size.
    pub body_font_size: f32,

    /// Grid line width.
    pub grid_width: f32,

    /// Horizontal and vertical cell padding.
    pub cell_padding: (f32, f32),

    /// Compress page content streams with Flate.
    pub compress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportConfig {
    /// Create new configuration with defaults (US Letter, 40 rows per page).
    pub fn new() -> Self {
        Self {
            title: "Your Table Title".to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page_width: 612.0,
            page_height: 792.0,
            margin_top: 18.0,
            margin_bottom: 10.0,
            margin_side: 36.0,
            caption_font_size: 10.0,
            caption_space_after: 6.0,
            header_font_size: 12.0,
            body_font_size: 10.0,
            grid_width: 1.0,
            cell_padding: (6.0, 2.5),
            compress: false,
        }
    }

    /// Set the caption text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set rows per page. Zero is clamped to one.
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows.max(1);
        self
    }

    /// Set the page size in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set top and bottom margins in points.
    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.rows_per_page, 40);
        assert_eq!(config.title, "Your Table Title");
        assert!(config.header_font_size > config.body_font_size);
        assert_eq!((config.page_width, config.page_height), (612.0, 792.0));
    }

    #[test]
    fn test_builder_methods() {
        let config = ReportConfig::new()
            .with_title("Payments")
            .with_rows_per_page(0)
            .with_margins(36.0, 36.0)
            .with_compress(true);
        assert_eq!(config.title, "Payments");
        assert_eq!(config.rows_per_page, 1);
        assert_eq!(config.margin_top, 36.0);
        assert!(config.compress);
    }
}
