//! Data module for loading and preparing dyadic event tables.
//!
//! This module provides:
//! - CSV ingestion of `(actor_a, actor_b, year)` events
//! - Temporal normalization into 1-based time steps
//! - Actor name canonicalization into dense integer ids

mod canonical;
mod loader;
mod timestep;

pub use canonical::{canonicalize, ActorIndex, CanonicalEdges, Edge, SelfLoopPolicy};
pub use loader::{parse_year, EventLoader, LoadReport, RowPolicy};
pub use timestep::{normalize, time_step, TimedEvent};

use serde::{Deserialize, Serialize};

/// Dense integer identifier of an actor
pub type ActorId = u32;

/// 1-based period index derived from the event year
pub type TimeStep = u32;

/// One dyadic event as read from the input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// First side of the dyad
    pub actor_a: String,
    /// Second side of the dyad
    pub actor_b: String,
    /// Calendar year of the event
    pub year: i32,
}

impl EventRecord {
    /// Create a new event record
    pub fn new(actor_a: impl Into<String>, actor_b: impl Into<String>, year: i32) -> Self {
        Self {
            actor_a: actor_a.into(),
            actor_b: actor_b.into(),
            year,
        }
    }

    /// Whether both sides name the same actor
    pub fn is_self_loop(&self) -> bool {
        self.actor_a == self.actor_b
    }
}

/// In-memory table of events, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTable {
    records: Vec<EventRecord>,
}

impl EventTable {
    /// Create a table from already parsed records
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Get the number of events
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the table holds no events
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the events in file order
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Iterate over events in file order
    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.records.iter()
    }

    /// Earliest observed year (None for an empty table)
    pub fn min_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).min()
    }

    /// Latest observed year (None for an empty table)
    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// Number of periods spanned, `max_year - min_year + 1`
    pub fn num_periods(&self) -> usize {
        match (self.min_year(), self.max_year()) {
            (Some(min), Some(max)) => {
                usize::try_from(i64::from(max) - i64::from(min) + 1).unwrap_or(usize::MAX)
            }
            _ => 0,
        }
    }
}

impl From<Vec<EventRecord>> for EventTable {
    fn from(records: Vec<EventRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
