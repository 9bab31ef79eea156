//! Event table loading
//!
//! Reads a delimited file with a header row into an [`EventTable`].
//! Required columns are checked up front; each row's year is parsed
//! according to the configured [`RowPolicy`].

use super::{EventRecord, EventTable};
use crate::error::{PipelineError, Result};
use crate::utils::IngestConfig;
use chrono::{Datelike, NaiveDate};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Date layouts accepted in the year column besides a bare integer
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// What to do with a row whose required field cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Abort the load with a `DataError`
    #[default]
    Strict,
    /// Skip the row, count it, and continue
    Lenient,
}

/// Summary of one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows seen (header excluded)
    pub rows_read: usize,
    /// Rows that made it into the table
    pub rows_loaded: usize,
    /// 1-based file line numbers of rows skipped in lenient mode
    pub skipped_lines: Vec<u64>,
}

impl LoadReport {
    /// Number of rows skipped in lenient mode
    pub fn skipped(&self) -> usize {
        self.skipped_lines.len()
    }
}

/// Parse a year from an integer or a date string
pub fn parse_year(raw: &str) -> std::result::Result<i32, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("missing value".to_string());
    }

    let year = match value.parse::<i32>() {
        Ok(year) => year,
        Err(_) => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .map(|date| date.year())
            .ok_or_else(|| "not a year or a recognised date".to_string())?,
    };

    if !(1..=9999).contains(&year) {
        return Err(format!("year {year} out of range 1..=9999"));
    }
    Ok(year)
}

/// Loader for dyadic event files
#[derive(Debug, Clone)]
pub struct EventLoader {
    config: IngestConfig,
}

impl Default for EventLoader {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

impl EventLoader {
    /// Create a loader for the given column layout
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Override the row policy
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.config.row_policy = policy;
        self
    }

    /// Load events from a file
    ///
    /// The file handle is dropped before the table is returned.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(EventTable, LoadReport)> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening event file");
        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// Load events from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<(EventTable, LoadReport)> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter()?)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let [a_idx, b_idx, year_idx] = self.column_positions(&headers)?;

        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for row in reader.byte_records() {
            let row = row?;
            report.rows_read += 1;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let parsed = decode_row(row, line, &headers)
                .and_then(|row| self.parse_row(&row, line, a_idx, b_idx, year_idx));

            match parsed {
                Ok(record) => records.push(record),
                Err(err) => match self.config.row_policy {
                    RowPolicy::Strict => return Err(err),
                    RowPolicy::Lenient => {
                        warn!(line, error = %err, "Skipping invalid row");
                        report.skipped_lines.push(line);
                    }
                },
            }
        }

        report.rows_loaded = records.len();
        info!(
            rows_read = report.rows_read,
            rows_loaded = report.rows_loaded,
            rows_skipped = report.skipped(),
            "Loaded event table"
        );

        Ok((EventTable::new(records), report))
    }

    /// The configured delimiter as a single byte
    fn delimiter(&self) -> Result<u8> {
        let delimiter = self.config.delimiter;
        if !delimiter.is_ascii() {
            return Err(PipelineError::Config(format!(
                "delimiter {delimiter:?} must be a single ASCII character"
            )));
        }
        Ok(delimiter as u8)
    }

    /// Resolve the required columns, reporting every missing one at once
    fn column_positions(&self, headers: &StringRecord) -> Result<[usize; 3]> {
        let required = self.config.required_columns();
        let positions: Vec<Option<usize>> = required
            .iter()
            .map(|name| headers.iter().position(|h| h == *name))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match positions.as_slice() {
            [Some(a), Some(b), Some(y)] => Ok([*a, *b, *y]),
            _ => Err(PipelineError::Schema { missing }),
        }
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        line: u64,
        a_idx: usize,
        b_idx: usize,
        year_idx: usize,
    ) -> Result<EventRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or("");
        let data_error = |column: &str, value: &str, reason: String| PipelineError::Data {
            line,
            column: column.to_string(),
            value: value.to_string(),
            reason,
        };

        let actor_a = field(a_idx);
        if actor_a.is_empty() {
            return Err(data_error(
                &self.config.actor_a_column,
                actor_a,
                "missing actor name".into(),
            ));
        }
        let actor_b = field(b_idx);
        if actor_b.is_empty() {
            return Err(data_error(
                &self.config.actor_b_column,
                actor_b,
                "missing actor name".into(),
            ));
        }

        let raw_year = field(year_idx);
        let year = parse_year(raw_year)
            .map_err(|reason| data_error(&self.config.year_column, raw_year, reason))?;

        Ok(EventRecord::new(actor_a, actor_b, year))
    }
}

/// Decode a raw row, turning invalid UTF-8 into a row-level data error
fn decode_row(row: ByteRecord, line: u64, headers: &StringRecord) -> Result<StringRecord> {
    StringRecord::from_byte_record(row).map_err(|err| {
        let field = err.utf8_error().field();
        let raw = err.into_byte_record();
        PipelineError::Data {
            line,
            column: headers.get(field).unwrap_or_default().to_string(),
            value: String::from_utf8_lossy(raw.get(field).unwrap_or_default()).into_owned(),
            reason: "invalid UTF-8".into(),
        }
    })
}
