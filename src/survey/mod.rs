//! Survey data preparation.
//!
//! Joins heterogeneous survey tables, recodes categorical codes into
//! labels (actor type, quota-policy strength, ...) and drops incomplete
//! rows, producing a flat CSV.

mod join;
mod recode;
mod table;

pub use join::left_join;
pub use recode::{drop_incomplete, RecodeReport, Recoder};
pub use table::Table;

use crate::error::Result;
use crate::utils::SurveyConfig;

/// Counts from a full preparation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareReport {
    pub joined_rows: usize,
    pub recode: RecodeReport,
    pub dropped_incomplete: usize,
}

/// Join, recode, then drop incomplete rows
pub fn prepare(
    left: &Table,
    right: &Table,
    keys: &[&str],
    config: &SurveyConfig,
) -> Result<(Table, PrepareReport)> {
    let joined = left_join(left, right, keys)?;
    let (recoded, recode) = Recoder::new(config.recode.clone()).apply(&joined)?;
    let (complete, dropped_incomplete) = drop_incomplete(&recoded);

    let report = PrepareReport {
        joined_rows: joined.len(),
        recode,
        dropped_incomplete,
    };
    Ok((complete, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_prepare_end_to_end() {
        let markers = SurveyConfig::default().missing_markers;
        let actors = Table::from_reader(
            "country,year,actor_type\nMX,2010,1\nMX,2011,2\nCO,2010,1\n".as_bytes(),
            &markers,
        )
        .unwrap();
        let quotas =
            Table::from_reader("country,year,quota\nMX,2010,2\nMX,2011,1\n".as_bytes(), &markers)
                .unwrap();

        let mut config = SurveyConfig::default();
        config.recode.insert(
            "actor_type".into(),
            BTreeMap::from([("1".into(), "Government".into()), ("2".into(), "Party".into())]),
        );
        config.recode.insert(
            "quota".into(),
            BTreeMap::from([("1".into(), "Weak".into()), ("2".into(), "Moderate".into())]),
        );

        let (table, report) = prepare(&actors, &quotas, &["country", "year"], &config).unwrap();

        assert_eq!(report.joined_rows, 3);
        // CO has no quota row
        assert_eq!(report.dropped_incomplete, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "actor_type"), Some("Party"));
        assert_eq!(table.get(1, "quota"), Some("Weak"));
    }
}
