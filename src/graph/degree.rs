//! Degree distribution of a graph snapshot.

use super::EventGraph;
use crate::data::ActorId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-node degree of one snapshot
///
/// Computed fresh from the snapshot it describes; multi-edges are summed
/// and a self-loop adds 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DegreeDistribution {
    degrees: BTreeMap<ActorId, usize>,
}

impl DegreeDistribution {
    /// Degrees of every node of the graph
    pub fn from_graph(graph: &EventGraph) -> Self {
        let mut degrees: BTreeMap<ActorId, usize> =
            graph.nodes().into_iter().map(|n| (n, 0)).collect();

        for edge in graph.edges() {
            *degrees.entry(edge.source).or_insert(0) += 1;
            *degrees.entry(edge.target).or_insert(0) += 1;
        }

        Self { degrees }
    }

    /// Degrees over an explicit node set
    ///
    /// Nodes absent from the graph get degree 0, which keeps actors that
    /// were inactive in a period visible in its distribution.
    pub fn with_nodes<I>(graph: &EventGraph, nodes: I) -> Self
    where
        I: IntoIterator<Item = ActorId>,
    {
        let mut dist = Self::from_graph(graph);
        for node in nodes {
            dist.degrees.entry(node).or_insert(0);
        }
        dist
    }

    pub fn get(&self, node: ActorId) -> Option<usize> {
        self.degrees.get(&node).copied()
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// `(node, degree)` pairs in node order
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, usize)> + '_ {
        self.degrees.iter().map(|(&n, &d)| (n, d))
    }

    /// Degree sequence in node order
    pub fn sequence(&self) -> Vec<usize> {
        self.degrees.values().copied().collect()
    }

    /// Sum of all degrees (twice the edge count)
    pub fn total(&self) -> usize {
        self.degrees.values().sum()
    }

    pub fn max(&self) -> usize {
        self.degrees.values().copied().max().unwrap_or(0)
    }

    pub fn mean(&self) -> f64 {
        if self.degrees.is_empty() {
            return 0.0;
        }
        self.total() as f64 / self.degrees.len() as f64
    }

    /// Number of nodes per degree value
    pub fn histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for &degree in self.degrees.values() {
            *histogram.entry(degree).or_insert(0) += 1;
        }
        histogram
    }

    /// The `n` highest-degree nodes, ties broken by lower id
    pub fn top(&self, n: usize) -> Vec<(ActorId, usize)> {
        let mut sorted: Vec<(ActorId, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sorted.truncate(n);
        sorted
    }
}
