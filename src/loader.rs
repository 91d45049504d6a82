//! Table loader.
//!
//! Reads a delimited file with a header line into [`Record`]s. The header
//! is validated once here so later stages never look fields up by name.

use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column holding the transaction date; used as the sort key.
pub const DATE_COLUMN: &str = "Transaction_Date";
/// Column holding the transaction status.
pub const STATUS_COLUMN: &str = "Status";
/// Column holding the monetary amount.
pub const AMOUNT_COLUMN: &str = "Amount";
/// Column holding the payer identifier.
pub const PAYER_COLUMN: &str = "Customer_VPA";

/// Columns every input file must declare.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COLUMN, STATUS_COLUMN, AMOUNT_COLUMN, PAYER_COLUMN];

/// One input row. Other source columns are dropped at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(rename = "Transaction_Date", default)]
    date: String,

    #[serde(rename = "Status", default)]
    status: String,

    /// kept as text; coerced to a decimal by the report builder
    #[serde(rename = "Amount", default)]
    amount: String,

    #[serde(rename = "Customer_VPA", default)]
    payer: String,

    /// source line, header is line 1
    #[serde(skip)]
    line: u64,
}

impl Record {
    /// Create a record directly, mostly useful for tests.
    pub fn new(
        date: impl Into<String>,
        status: impl Into<String>,
        amount: impl Into<String>,
        payer: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            status: status.into(),
            amount: amount.into(),
            payer: payer.into(),
            line: 0,
        }
    }

    /// Attach the source line number.
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Get the record's date text.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Get the record's status.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Get the record's raw amount text.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Get the record's payer identifier.
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Get the source line (0 when the record was built in memory).
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Load every record from the file at `path`, in file order.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    log::debug!("Opening table {}", path.display());
    let file = File::open(path)?;
    read_records(file)
}

/// Read every record from `reader`, in file order.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    validate_headers(&headers)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let mut row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        // ragged rows: pad so every declared column has a (possibly empty) cell
        while row.len() < headers.len() {
            row.push_field("");
        }
        let record: Record = row.deserialize(Some(&headers))?;
        records.push(record.at_line(line));
    }

    log::info!("Loaded {} records", records.len());
    Ok(records)
}

fn validate_headers(headers: &StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !headers.iter().any(|h| h == **name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Schema { missing })
    }
}
