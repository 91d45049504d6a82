//! Report builder.
//!
//! Turns loaded [`Record`]s into numbered, projected rows with a trailing
//! total, split into header-prefixed pages.
//!
//! ```text
//! Record[]  (file order)
//!     ↓ stable sort by date
//!     ↓ number 1..N, project to fixed columns
//!     ↓ sum amounts, append total row
//!     ↓ chunk into pages of `rows_per_page`
//! Page[]
//! ```

mod pagination;

pub use pagination::{page_count, paginate};

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::loader::{Record, AMOUNT_COLUMN, DATE_COLUMN, PAYER_COLUMN, STATUS_COLUMN};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Label of the sequence-number column.
pub const SEQUENCE_COLUMN: &str = "Sr_No";

/// Output column header, identical on every page.
pub const COLUMN_HEADERS: [&str; 5] =
    [SEQUENCE_COLUMN, DATE_COLUMN, STATUS_COLUMN, AMOUNT_COLUMN, PAYER_COLUMN];

/// Text shown in the sequence column of the total row.
pub const TOTAL_LABEL: &str = "Total";

/// A record reduced to the five output columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    /// 1-based position in sorted order
    pub sequence: usize,
    /// Date text as stored in the source
    pub date: String,
    /// Transaction status
    pub status: String,
    /// Parsed amount; `None` for an empty cell
    pub amount: Option<Decimal>,
    /// Amount as written in the source
    pub amount_text: String,
    /// Payer identifier
    pub payer: String,
}

/// A row of the finished report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    /// One projected data row
    Data(ProjectedRow),
    /// The synthetic total row; only the amount is populated
    Total(Decimal),
}

impl ReportRow {
    /// Cell texts in column order.
    pub fn cells(&self) -> [String; 5] {
        match self {
            ReportRow::Data(row) => [
                row.sequence.to_string(),
                row.date.clone(),
                row.status.clone(),
                row.amount_text.clone(),
                row.payer.clone(),
            ],
            ReportRow::Total(total) => [
                TOTAL_LABEL.to_string(),
                String::new(),
                String::new(),
                total.to_string(),
                String::new(),
            ],
        }
    }

    /// Whether this is the total row.
    pub fn is_total(&self) -> bool {
        matches!(self, ReportRow::Total(_))
    }
}

/// One page worth of rows, rendered with the column header first.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// 1-based page number
    pub number: usize,
    /// Data rows (and, on the last page, the total row)
    pub rows: &'a [ReportRow],
}

impl<'a> Page<'a> {
    /// The column header row.
    pub fn header(&self) -> [&'static str; 5] {
        COLUMN_HEADERS
    }

    /// Header cells followed by every row's cells.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(COLUMN_HEADERS.iter().map(|h| h.to_string()).collect());
        rows.extend(self.rows.iter().map(|r| r.cells().to_vec()));
        rows
    }

    /// Number of data rows on this page (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the page carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The sorted, numbered and totalled report.
#[derive(Debug, Clone)]
pub struct Report {
    rows: Vec<ReportRow>,
    total: Decimal,
    rows_per_page: usize,
}

impl Report {
    /// Build a report from records in file order.
    ///
    /// Fails with [`Error::Data`] when a non-empty amount is not numeric.
    pub fn build(mut records: Vec<Record>, config: &ReportConfig) -> Result<Self> {
        // Vec::sort_by is stable: equal dates keep file order
        records.sort_by(|a, b| a.date().cmp(b.date()));

        let mut total = Decimal::ZERO;
        let mut rows = Vec::with_capacity(records.len() + 1);

        for (idx, record) in records.into_iter().enumerate() {
            let amount = parse_amount(&record)?;
            if let Some(value) = amount {
                total = total.checked_add(value).ok_or_else(|| Error::Data {
                    line: record.line(),
                    value: record.amount().to_string(),
                    reason: "sum overflows".to_string(),
                })?;
            }

            rows.push(ReportRow::Data(ProjectedRow {
                sequence: idx + 1,
                date: record.date().to_string(),
                status: record.status().to_string(),
                amount,
                amount_text: record.amount().to_string(),
                payer: record.payer().to_string(),
            }));
        }

        rows.push(ReportRow::Total(total));
        log::debug!("Built report with {} data rows, total {}", rows.len() - 1, total);

        Ok(Self {
            rows,
            total,
            rows_per_page: config.rows_per_page.max(1),
        })
    }

    /// All rows, total row last.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Projected data rows only.
    pub fn data_rows(&self) -> impl Iterator<Item = &ProjectedRow> {
        self.rows.iter().filter_map(|r| match r {
            ReportRow::Data(row) => Some(row),
            ReportRow::Total(_) => None,
        })
    }

    /// Sum of all amounts.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of data rows (total row excluded).
    pub fn len(&self) -> usize {
        self.rows.len() - 1
    }

    /// Whether the report has no data rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows split into pages.
    pub fn pages(&self) -> Vec<Page<'_>> {
        paginate(&self.rows, self.rows_per_page)
            .into_iter()
            .enumerate()
            .map(|(idx, rows)| Page {
                number: idx + 1,
                rows,
            })
            .collect()
    }

    /// Number of pages [`Report::pages`] yields.
    pub fn page_count(&self) -> usize {
        page_count(self.rows.len(), self.rows_per_page)
    }
}

fn parse_amount(record: &Record) -> Result<Option<Decimal>> {
    let text = record.amount().trim();
    if text.is_empty() {
        return Ok(None);
    }
    // rust_decimal skips '_' as a digit separator
    if text.contains('_') {
        return Err(Error::Data {
            line: record.line(),
            value: text.to_string(),
            reason: "digit separators are not allowed".to_string(),
        });
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|e| Error::Data {
            line: record.line(),
            value: text.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, amount: &str) -> Record {
        Record::new(date, "SUCCESS", amount, format!("{}@upi", date))
    }

    #[test]
    fn test_sorts_and_numbers() {
        let records = vec![
            record("2024-03-01", "100"),
            record("2024-01-15", "250"),
            record("2024-02-10", "50"),
        ];
        let report = Report::build(records, &ReportConfig::default()).unwrap();

        let dates: Vec<&str> = report.data_rows().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-02-10", "2024-03-01"]);

        let seqs: Vec<usize> = report.data_rows().map(|r| r.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(report.total(), Decimal::new(400, 0));
    }

    #[test]
    fn test_total_row_is_last() {
        let report = Report::build(vec![record("a", "1"), record("b", "2")], &ReportConfig::default())
            .unwrap();
        let last = report.rows().last().unwrap();
        assert!(last.is_total());
        assert_eq!(report.rows().iter().filter(|r| r.is_total()).count(), 1);
        assert_eq!(last.cells(), ["Total", "", "", "3", ""].map(String::from));
    }

    #[test]
    fn test_stable_for_equal_dates() {
        let records = vec![
            Record::new("2024-01-01", "S", "1", "first"),
            Record::new("2023-12-31", "S", "1", "earlier"),
            Record::new("2024-01-01", "S", "1", "second"),
        ];
        let report = Report::build(records, &ReportConfig::default()).unwrap();
        let payers: Vec<&str> = report.data_rows().map(|r| r.payer.as_str()).collect();
        assert_eq!(payers, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        let records = vec![record("a", "0.1"), record("b", "0.2"), record("c", "1e2")];
        let report = Report::build(records, &ReportConfig::default()).unwrap();
        assert_eq!(report.total().to_string(), "100.3");
    }

    #[test]
    fn test_empty_amount_is_skipped() {
        let records = vec![record("a", "10"), record("b", "")];
        let report = Report::build(records, &ReportConfig::default()).unwrap();
        assert_eq!(report.total(), Decimal::new(10, 0));
        let second = report.data_rows().nth(1).unwrap();
        assert_eq!(second.amount, None);
        assert_eq!(second.amount_text, "");
    }

    #[test]
    fn test_non_numeric_amount_is_data_error() {
        let records = vec![record("a", "10"), record("b", "ten").at_line(3)];
        match Report::build(records, &ReportConfig::default()) {
            Err(Error::Data { line, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "ten");
            },
            other => panic!("expected data error, got {:?}", other),
        }
    }

    #[test]
    fn test_digit_separators_are_data_error() {
        for text in ["1_000", "_5", "2.5_0"] {
            let records = vec![record("a", text).at_line(2)];
            match Report::build(records, &ReportConfig::default()) {
                Err(Error::Data { line, value, .. }) => {
                    assert_eq!(line, 2);
                    assert_eq!(value, text);
                },
                other => panic!("expected data error for {}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_zero_rows_still_has_total_page() {
        let report = Report::build(Vec::new(), &ReportConfig::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total(), Decimal::ZERO);
        let pages = report.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 1);
        assert!(pages[0].rows[0].is_total());
    }

    #[test]
    fn test_forty_rows_make_two_pages() {
        let records: Vec<Record> = (0..40).map(|i| record(&format!("d{:02}", i), "1")).collect();
        let report = Report::build(records, &ReportConfig::default()).unwrap();
        let pages = report.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(report.page_count(), 2);
        assert_eq!(pages[0].len(), 40);
        assert_eq!(pages[1].len(), 1);
        assert!(pages[1].rows[0].is_total());
        assert_eq!(pages[1].number, 2);
    }

    #[test]
    fn test_every_page_starts_with_header() {
        let records: Vec<Record> = (0..95).map(|i| record(&format!("{:03}", i), "2")).collect();
        let report = Report::build(records, &ReportConfig::default()).unwrap();
        for page in report.pages() {
            let table = page.table_rows();
            assert_eq!(table[0], COLUMN_HEADERS.to_vec());
            assert_eq!(table.len(), page.len() + 1);
        }
    }
}
