//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! Object numbers are assigned in a fixed order (catalog, page tree,
//! fonts, then page/content pairs, then info) so identical input always
//! yields identical bytes.

use super::content_stream::ContentStreamBuilder;
use super::font_metrics::Font;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Dictionary, Object};
use std::io::Write;
use std::path::Path;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Producer application
    pub producer: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            producer: Some(concat!("txn_report ", env!("CARGO_PKG_VERSION")).to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed with FlateDecode.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Direct access to the page's content stream.
    pub fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.writer.pages[self.page_index].content_builder
    }

    /// Finish building this page and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.writer.pages[self.page_index].content_builder.end_text();
        self.writer
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
}

impl PdfWriter {
    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
        }
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Build the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer;
        let mut output = Vec::new();

        // PDF Header
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_id = 1u32;
        let pages_id = 2u32;
        let first_font_id = 3u32;
        let first_page_id = first_font_id + Font::ALL.len() as u32;
        let info_id = first_page_id + 2 * self.pages.len() as u32;
        let size = info_id + 1;

        let mut font_resources = Dictionary::new();
        let mut objects: Vec<(u32, Object)> = Vec::with_capacity(size as usize);

        for (i, font) in Font::ALL.iter().enumerate() {
            let font_id = first_font_id + i as u32;
            font_resources
                .insert(font.resource_name().to_string(), ObjectSerializer::reference(font_id));
            objects.push((
                font_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(font.base_font())),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]),
            ));
        }

        let mut page_refs: Vec<Object> = Vec::with_capacity(self.pages.len());

        for (i, page_data) in self.pages.iter_mut().enumerate() {
            let page_id = first_page_id + 2 * i as u32;
            let content_id = page_id + 1;

            let raw_content = page_data.content_builder.build()?;

            let mut content_dict = Dictionary::new();
            let content_bytes = if self.config.compress {
                match compress_data(&raw_content) {
                    Ok(compressed) => {
                        content_dict
                            .insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                        compressed
                    },
                    Err(e) => {
                        log::warn!("Page {} left uncompressed: {}", i + 1, e);
                        raw_content
                    },
                }
            } else {
                raw_content
            };

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_id)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(
                        0.0,
                        0.0,
                        page_data.width as f64,
                        page_data.height as f64,
                    ),
                ),
                ("Contents", ObjectSerializer::reference(content_id)),
                (
                    "Resources",
                    ObjectSerializer::dict(vec![(
                        "Font",
                        Object::Dictionary(font_resources.clone()),
                    )]),
                ),
            ]);

            page_refs.push(ObjectSerializer::reference(page_id));
            objects.push((page_id, page_obj));
            objects.push((
                content_id,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(content_bytes),
                },
            ));
        }

        let page_count = page_refs.len();
        let pages_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(page_refs)),
            ("Count", ObjectSerializer::integer(page_count as i64)),
        ]);

        let catalog_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_id)),
        ]);

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::text_string(title)));
        }
        if let Some(producer) = &self.config.producer {
            info_entries.push(("Producer", ObjectSerializer::text_string(producer)));
        }

        objects.push((catalog_id, catalog_obj));
        objects.push((pages_id, pages_obj));
        objects.push((info_id, ObjectSerializer::dict(info_entries)));
        objects.sort_by_key(|(id, _)| *id);

        // Write all objects, recording offsets in id order
        let mut xref_offsets = Vec::with_capacity(objects.len());
        for (obj_id, obj) in &objects {
            xref_offsets.push(output.len());
            serializer.write_indirect(&mut output, *obj_id, obj)?;
        }

        // Write xref table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;

        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(catalog_id)),
            ("Info", ObjectSerializer::reference(info_id)),
        ]);

        writeln!(output, "trailer")?;
        serializer.write(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        writeln!(output, "%%EOF")?;

        log::debug!("Serialized {} pages into {} bytes", page_count, output.len());
        Ok(output)
    }
}

/// Write `bytes` to `path` via a sibling temporary file.
///
/// The temporary file is renamed into place, so a failed write never
/// leaves a partial document. It is created with mode 0666 less the
/// umask, like any other file the process writes.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    #[allow(unused_mut)]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.prefix(".txn_report").tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
