//! Fixed-size page chunking.

/// Split `rows` into consecutive pages of at most `page_size` rows.
///
/// Order is preserved and a row is never split across pages. An empty
/// input yields no pages. A `page_size` of zero is treated as one.
pub fn paginate<T>(rows: &[T], page_size: usize) -> Vec<&[T]> {
    rows.chunks(page_size.max(1)).collect()
}

/// Number of pages [`paginate`] produces for `len` rows.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}
