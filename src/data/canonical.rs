//! Identifier canonicalization.
//!
//! Actor names from both dyad columns are pooled, sorted lexicographically
//! and numbered `0..n`. The same input therefore always yields the same ids,
//! independent of row order.

use super::{ActorId, TimeStep, TimedEvent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Handling of events whose two sides name the same actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoopPolicy {
    /// Remove self-loops and count them
    #[default]
    Drop,
    /// Keep self-loops; each adds 2 to its actor's degree
    Keep,
}

/// An undirected dyad at a time step, stored with `source <= target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub source: ActorId,
    pub target: ActorId,
    pub time_step: TimeStep,
}

impl Edge {
    /// Create an edge, ordering the endpoints
    pub fn new(a: ActorId, b: ActorId, time_step: TimeStep) -> Self {
        Self {
            source: a.min(b),
            target: a.max(b),
            time_step,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Sort key used for canonical edge lists
    fn order_key(&self) -> (TimeStep, ActorId, ActorId) {
        (self.time_step, self.source, self.target)
    }
}

/// Bijective mapping between actor names and dense ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorIndex {
    names: Vec<String>,
    ids: BTreeMap<String, ActorId>,
}

impl ActorIndex {
    /// Build an index from any collection of names (duplicates allowed)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let names: Vec<String> = distinct.into_iter().collect();
        let ids = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as ActorId))
            .collect();

        Self { names, ids }
    }

    /// Build an index over the union of both dyad columns
    pub fn from_events(events: &[TimedEvent]) -> Self {
        Self::from_names(
            events
                .iter()
                .flat_map(|e| [e.actor_a.as_str(), e.actor_b.as_str()]),
        )
    }

    /// Id of an actor name
    pub fn id(&self, name: &str) -> Option<ActorId> {
        self.ids.get(name).copied()
    }

    /// Name of an actor id
    pub fn name(&self, id: ActorId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Number of distinct actors
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.names.len()).map(|i| i as ActorId)
    }

    /// `(id, name)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (i as ActorId, name.as_str()))
    }
}

/// Result of canonicalization: the id mapping and the deduplicated edge list
#[derive(Debug, Clone, Default)]
pub struct CanonicalEdges {
    pub index: ActorIndex,
    /// Edges sorted by `(time_step, source, target)`
    pub edges: Vec<Edge>,
    pub duplicates_dropped: usize,
    pub self_loops_dropped: usize,
}

impl CanonicalEdges {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Distinct time steps that carry at least one edge, ascending
    pub fn time_steps(&self) -> Vec<TimeStep> {
        let steps: BTreeSet<TimeStep> = self.edges.iter().map(|e| e.time_step).collect();
        steps.into_iter().collect()
    }
}

/// Map actor names to ids and deduplicate undirected dyads per time step
///
/// `(a, b, t)` and `(b, a, t)` collapse into one edge. The same dyad at two
/// different time steps stays as two edges.
pub fn canonicalize(events: &[TimedEvent], self_loops: SelfLoopPolicy) -> CanonicalEdges {
    let index = ActorIndex::from_events(events);

    let mut seen = BTreeSet::new();
    let mut duplicates_dropped = 0;
    let mut self_loops_dropped = 0;

    for event in events {
        // Every name is in the index by construction
        let (Some(a), Some(b)) = (index.id(&event.actor_a), index.id(&event.actor_b)) else {
            continue;
        };

        let edge = Edge::new(a, b, event.time_step);
        if edge.is_self_loop() && self_loops == SelfLoopPolicy::Drop {
            self_loops_dropped += 1;
            continue;
        }
        if !seen.insert(edge.order_key()) {
            duplicates_dropped += 1;
        }
    }

    let edges: Vec<Edge> = seen
        .into_iter()
        .map(|(time_step, source, target)| Edge {
            source,
            target,
            time_step,
        })
        .collect();

    debug!(actors = index.len(), "Built actor index");
    info!(
        edges = edges.len(),
        duplicates_dropped,
        self_loops_dropped,
        "Canonicalized edge list"
    );

    CanonicalEdges {
        index,
        edges,
        duplicates_dropped,
        self_loops_dropped,
    }
}
