//! Explicit categorical recoding and the missing-row filter.

use super::Table;
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Per-column lookup tables from raw codes to labels
///
/// Only configured columns are touched. Values without an entry become
/// missing, so they are visible to [`drop_incomplete`] instead of leaking
/// through as raw codes.
#[derive(Debug, Clone, Default)]
pub struct Recoder {
    mappings: BTreeMap<String, BTreeMap<String, String>>,
}

/// Counts from one recoding pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecodeReport {
    /// Column -> number of cells recoded
    pub recoded: BTreeMap<String, usize>,
    /// Column -> number of non-missing cells without a mapping
    pub unmapped: BTreeMap<String, usize>,
}

impl Recoder {
    pub fn new(mappings: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { mappings }
    }

    /// Add or replace the mapping of one column
    pub fn with_column<I, K, V>(mut self, column: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mapping = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.mappings.insert(column.to_string(), mapping);
        self
    }

    /// Recode every configured column; a configured column absent from the
    /// table is a schema error
    pub fn apply(&self, table: &Table) -> Result<(Table, RecodeReport)> {
        let mut out = table.clone();
        let mut report = RecodeReport::default();

        for (column, mapping) in &self.mappings {
            let col = table.require_column(column)?;
            let mut recoded = 0usize;
            let mut unmapped = 0usize;

            for row in &mut out.rows {
                let Some(raw) = row[col].take() else {
                    continue;
                };
                match mapping.get(&raw) {
                    Some(label) => {
                        row[col] = Some(label.clone());
                        recoded += 1;
                    }
                    None => unmapped += 1,
                }
            }

            if unmapped > 0 {
                warn!(column = %column, unmapped, "Values without a label set to missing");
            }
            report.recoded.insert(column.clone(), recoded);
            report.unmapped.insert(column.clone(), unmapped);
        }

        Ok((out, report))
    }
}

/// Remove every row with at least one missing cell
///
/// Returns the filtered table and the number of rows dropped.
pub fn drop_incomplete(table: &Table) -> (Table, usize) {
    let rows: Vec<Vec<Option<String>>> = table
        .rows
        .iter()
        .filter(|row| row.iter().all(Option::is_some))
        .cloned()
        .collect();
    let dropped = table.rows.len() - rows.len();

    info!(kept = rows.len(), dropped, "Dropped rows with missing values");

    (
        Table {
            headers: table.headers.clone(),
            rows,
        },
        dropped,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    fn survey() -> Table {
        Table::from_reader(
            "id,actor_type,quota\n1,1,0\n2,2,3\n3,9,NA\n4,1,2\n".as_bytes(),
            &["NA".to_string()],
        )
        .unwrap()
    }

    fn recoder() -> Recoder {
        Recoder::default()
            .with_column("actor_type", [("1", "Government"), ("2", "Party")])
            .with_column(
                "quota",
                [("0", "None"), ("1", "Weak"), ("2", "Moderate"), ("3", "Strong")],
            )
    }

    #[test]
    fn test_recode_labels_and_counts() {
        let (table, report) = recoder().apply(&survey()).unwrap();

        assert_eq!(table.get(0, "actor_type"), Some("Government"));
        assert_eq!(table.get(1, "quota"), Some("Strong"));
        // Code 9 has no label
        assert_eq!(table.get(2, "actor_type"), None);
        assert_eq!(report.unmapped["actor_type"], 1);
        assert_eq!(report.recoded["quota"], 3);
        assert_eq!(report.unmapped["quota"], 0);
    }

    #[test]
    fn test_unconfigured_columns_untouched() {
        let (table, _) = recoder().apply(&survey()).unwrap();
        assert_eq!(table.get(3, "id"), Some("4"));
    }

    #[test]
    fn test_unknown_column_is_schema_error() {
        let recoder = Recoder::default().with_column("region", [("1", "North")]);
        assert!(matches!(
            recoder.apply(&survey()),
            Err(PipelineError::Schema { .. })
        ));
    }

    #[test]
    fn test_drop_incomplete_counts_rows() {
        let (recoded, _) = recoder().apply(&survey()).unwrap();
        let (complete, dropped) = drop_incomplete(&recoded);

        assert_eq!(dropped, 1);
        assert_eq!(complete.len(), 3);
        assert!(complete.rows.iter().all(|r| r.iter().all(Option::is_some)));
    }
}
