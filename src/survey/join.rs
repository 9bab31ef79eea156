//! Left join of two tables on shared key columns.

use super::Table;
use crate::error::{PipelineError, Result};
use std::collections::HashMap;
use tracing::info;

/// Suffix appended to right-hand columns whose name is already taken
const RIGHT_SUFFIX: &str = "_right";

/// Join `right` onto every row of `left` by equal key values
///
/// A left row with several matches is repeated once per match; a left row
/// without a match (or with a missing key) gets missing right-hand cells.
/// Missing keys never match.
pub fn left_join(left: &Table, right: &Table, keys: &[&str]) -> Result<Table> {
    if keys.is_empty() {
        return Err(PipelineError::Config("join needs at least one key column".into()));
    }

    let mut missing = Vec::new();
    for key in keys {
        if left.column(key).is_none() {
            missing.push(format!("left.{key}"));
        }
        if right.column(key).is_none() {
            missing.push(format!("right.{key}"));
        }
    }
    if !missing.is_empty() {
        return Err(PipelineError::Schema { missing });
    }

    let left_keys: Vec<usize> = keys.iter().filter_map(|k| left.column(k)).collect();
    let right_keys: Vec<usize> = keys.iter().filter_map(|k| right.column(k)).collect();
    let right_value_cols: Vec<usize> = (0..right.headers.len())
        .filter(|c| !right_keys.contains(c))
        .collect();

    let mut headers = left.headers.clone();
    for &c in &right_value_cols {
        let mut name = right.headers[c].clone();
        while headers.contains(&name) {
            name.push_str(RIGHT_SUFFIX);
        }
        headers.push(name);
    }

    let mut lookup: HashMap<Vec<&str>, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        if let Some(key) = key_of(row, &right_keys) {
            lookup.entry(key).or_default().push(i);
        }
    }

    let mut rows = Vec::with_capacity(left.rows.len());
    let mut unmatched = 0usize;

    for row in &left.rows {
        let matches = key_of(row, &left_keys).and_then(|key| lookup.get(&key));
        match matches {
            Some(indices) => {
                for &i in indices {
                    let mut joined = row.clone();
                    joined.extend(right_value_cols.iter().map(|&c| right.rows[i][c].clone()));
                    rows.push(joined);
                }
            }
            None => {
                unmatched += 1;
                let mut joined = row.clone();
                joined.extend(std::iter::repeat(None).take(right_value_cols.len()));
                rows.push(joined);
            }
        }
    }

    info!(
        left_rows = left.len(),
        right_rows = right.len(),
        joined_rows = rows.len(),
        unmatched_left_rows = unmatched,
        "Joined tables"
    );

    Table::new(headers, rows)
}

fn key_of<'a>(row: &'a [Option<String>], cols: &[usize]) -> Option<Vec<&'a str>> {
    cols.iter().map(|&c| row[c].as_deref()).collect()
}
