//! Temporal normalization: calendar years to 1-based time steps.

use super::{EventRecord, EventTable, TimeStep};

/// An event with its derived time step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub actor_a: String,
    pub actor_b: String,
    pub year: i32,
    pub time_step: TimeStep,
}

/// Time step of `year` relative to the dataset minimum
///
/// `time_step = year - min_year + 1`, so the earliest year maps to 1.
/// `year` must not precede `min_year`. Spans wider than the time-step
/// range saturate at `TimeStep::MAX`.
pub fn time_step(year: i32, min_year: i32) -> TimeStep {
    debug_assert!(year >= min_year, "year {year} precedes minimum {min_year}");
    let step = i64::from(year) - i64::from(min_year) + 1;
    TimeStep::try_from(step).unwrap_or(TimeStep::MAX)
}

/// Attach a time step to every event of the table
///
/// An empty table yields an empty series.
pub fn normalize(table: &EventTable) -> Vec<TimedEvent> {
    let Some(min_year) = table.min_year() else {
        return Vec::new();
    };

    table
        .iter()
        .map(|record: &EventRecord| TimedEvent {
            actor_a: record.actor_a.clone(),
            actor_b: record.actor_b.clone(),
            year: record.year,
            time_step: time_step(record.year, min_year),
        })
        .collect()
}
