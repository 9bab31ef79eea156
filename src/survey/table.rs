//! A small string table with explicit missing values.

use crate::error::{PipelineError, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Rows of optional string cells under a header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create a table; every row must match the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some(pos) = rows.iter().position(|r| r.len() != headers.len()) {
            return Err(PipelineError::Config(format!(
                "row {} has {} cells, header has {}",
                pos,
                rows[pos].len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Load a CSV file; cells equal to a marker become missing
    pub fn load<P: AsRef<Path>>(path: P, missing_markers: &[String]) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file, missing_markers)
    }

    /// Read CSV from any reader
    pub fn from_reader<R: Read>(reader: R, missing_markers: &[String]) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| {
                    if missing_markers.iter().any(|m| m == cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            rows.push(row);
        }

        debug!(columns = headers.len(), rows = rows.len(), "Loaded survey table");
        Ok(Self { headers, rows })
    }

    /// Position of a column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column, or a schema error naming it
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| PipelineError::Schema {
            missing: vec![name.to_string()],
        })
    }

    /// Cell value by row number and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column(column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write as comma-separated values with a header row; missing cells are empty
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec!["".to_string(), "NA".to_string()]
    }

    #[test]
    fn test_missing_markers() {
        let table = Table::from_reader("id,x\n1,NA\n2,\n3,ok\n".as_bytes(), &markers()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "x"), None);
        assert_eq!(table.get(1, "x"), None);
        assert_eq!(table.get(2, "x"), Some("ok"));
        assert_eq!(table.get(2, "nope"), None);
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![Some("1".into()), None]],
        )
        .unwrap();
        table.write_csv(&path).unwrap();

        let reloaded = Table::load(&path, &markers()).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Table::new(vec!["a".into()], vec![vec![None, None]]);
        assert!(result.is_err());
    }
}
