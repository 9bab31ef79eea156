//! Graph construction and analysis module.
//!
//! This module provides the time-stamped event graph and its views:
//! - Full undirected multigraph over the canonical edge list
//! - Subgraphs selected by a time-step predicate
//! - Named pre/post partitions and per-step snapshots
//! - Degree distributions and descriptive metrics

mod builder;
mod degree;
mod metrics;

pub use builder::{EventNetwork, GraphBuilder};
pub use degree::DegreeDistribution;
pub use metrics::GraphMetrics;

use crate::data::{ActorId, CanonicalEdges, Edge, TimeStep};
use crate::error::{PipelineError, Result};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet};

/// An undirected multigraph of actors joined by time-stamped edges
///
/// Graphs are never mutated after construction; every view
/// ([`subgraph`](Self::subgraph), [`partition`](Self::partition), ...)
/// builds a fresh graph.
#[derive(Debug, Clone)]
pub struct EventGraph {
    /// Node weight is the actor id, edge weight the time step
    graph: UnGraph<ActorId, TimeStep>,
    /// Mapping from actor id to node index
    node_index: BTreeMap<ActorId, NodeIndex>,
}

/// The two sides of a threshold split
#[derive(Debug, Clone)]
pub struct Partition {
    /// First time step of `post`
    pub threshold: TimeStep,
    /// Edges with `time_step < threshold`
    pub pre: EventGraph,
    /// Edges with `time_step >= threshold`
    pub post: EventGraph,
}

impl EventGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_index: BTreeMap::new(),
        }
    }

    /// Build a graph from edges; nodes are the edge endpoints
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge(*edge);
        }
        graph
    }

    /// Build the full graph of a canonical edge list
    ///
    /// Every indexed actor becomes a node, including actors whose only
    /// events were dropped self-loops (they end up with degree 0).
    pub fn from_canonical(canonical: &CanonicalEdges) -> Self {
        let mut graph = Self::new();
        for id in canonical.index.ids() {
            graph.insert_node(id);
        }
        for edge in &canonical.edges {
            graph.insert_edge(*edge);
        }
        graph
    }

    fn insert_node(&mut self, id: ActorId) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.node_index.insert(id, idx);
        idx
    }

    /// Parallel edges are kept (multigraph)
    fn insert_edge(&mut self, edge: Edge) {
        let a = self.insert_node(edge.source);
        let b = self.insert_node(edge.target);
        self.graph.add_edge(a, b, edge.time_step);
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// A graph without edges (it may still hold isolated nodes)
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn contains_node(&self, node: ActorId) -> bool {
        self.node_index.contains_key(&node)
    }

    /// All actor ids in ascending order
    pub fn nodes(&self) -> Vec<ActorId> {
        self.node_index.keys().copied().collect()
    }

    /// All edges sorted by `(source, target, time_step)`
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .edge_references()
            .map(|e| Edge::new(self.graph[e.source()], self.graph[e.target()], *e.weight()))
            .collect();
        edges.sort();
        edges
    }

    /// Number of incident edges; a self-loop counts twice
    ///
    /// Returns 0 for actors that are not in the graph.
    pub fn degree(&self, node: ActorId) -> usize {
        let Some(&idx) = self.node_index.get(&node) else {
            return 0;
        };
        self.graph
            .edge_references()
            .map(|e| (e.source() == idx) as usize + (e.target() == idx) as usize)
            .sum()
    }

    /// Distinct neighbours of a node in ascending order
    pub fn neighbors(&self, node: ActorId) -> Vec<ActorId> {
        let Some(&idx) = self.node_index.get(&node) else {
            return Vec::new();
        };
        let neighbors: BTreeSet<ActorId> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n])
            .collect();
        neighbors.into_iter().collect()
    }

    /// Distinct time steps carried by the edges, ascending
    pub fn time_steps(&self) -> Vec<TimeStep> {
        let steps: BTreeSet<TimeStep> = self.graph.edge_weights().copied().collect();
        steps.into_iter().collect()
    }

    /// Calculate graph density over distinct dyads
    pub fn density(&self) -> f64 {
        let n = self.node_count() as f64;
        if n <= 1.0 {
            return 0.0;
        }

        let dyads: BTreeSet<(ActorId, ActorId)> = self
            .edges()
            .iter()
            .filter(|e| !e.is_self_loop())
            .map(|e| (e.source, e.target))
            .collect();

        let max_edges = n * (n - 1.0) / 2.0;
        dyads.len() as f64 / max_edges
    }

    /// Number of connected components; isolated nodes count as one each
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Connected components, each sorted, ordered by their smallest id
    pub fn components(&self) -> Vec<Vec<ActorId>> {
        let mut sets = UnionFind::<usize>::new(self.graph.node_count());
        for edge in self.graph.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut by_root: BTreeMap<usize, Vec<ActorId>> = BTreeMap::new();
        for idx in self.graph.node_indices() {
            by_root
                .entry(sets.find(idx.index()))
                .or_default()
                .push(self.graph[idx]);
        }

        let mut components: Vec<Vec<ActorId>> = by_root
            .into_values()
            .map(|mut members| {
                members.sort_unstable();
                members
            })
            .collect();
        components.sort_unstable_by_key(|members| members[0]);
        components
    }

    /// Graph of the edges whose time step satisfies `predicate`
    ///
    /// Nodes are exactly those incident to a kept edge. A predicate that
    /// matches nothing gives an empty graph.
    pub fn subgraph<F>(&self, predicate: F) -> EventGraph
    where
        F: Fn(TimeStep) -> bool,
    {
        let kept: Vec<Edge> = self
            .edges()
            .into_iter()
            .filter(|e| predicate(e.time_step))
            .collect();
        EventGraph::from_edges(&kept)
    }

    /// Split into `time_step < threshold` and `time_step >= threshold`
    pub fn partition(&self, threshold: TimeStep) -> Partition {
        Partition {
            threshold,
            pre: self.subgraph(|t| t < threshold),
            post: self.subgraph(|t| t >= threshold),
        }
    }

    /// Edges of a single time step
    pub fn snapshot_at(&self, time_step: TimeStep) -> EventGraph {
        self.subgraph(|t| t == time_step)
    }

    /// Edges up to and including `time_step` (the network as grown so far)
    pub fn cumulative_until(&self, time_step: TimeStep) -> EventGraph {
        self.subgraph(|t| t <= time_step)
    }

    /// One snapshot per observed time step
    pub fn snapshots(&self) -> Vec<(TimeStep, EventGraph)> {
        self.time_steps()
            .into_iter()
            .map(|t| (t, self.snapshot_at(t)))
            .collect()
    }

    /// Turn an empty graph into a soft [`PipelineError::EmptyResult`]
    pub fn ensure_non_empty(&self, label: &str) -> Result<&Self> {
        if self.is_empty() {
            return Err(PipelineError::EmptyResult(format!("{label} graph has no edges")));
        }
        Ok(self)
    }
}

impl Default for EventGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventGraph {
        EventGraph::from_edges(&[
            Edge::new(0, 1, 1),
            Edge::new(1, 2, 2),
            Edge::new(0, 2, 3),
            Edge::new(2, 3, 3),
            Edge::new(0, 1, 4),
        ])
    }

    #[test]
    fn test_graph_creation() {
        let graph = sample();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.nodes(), vec![0, 1, 2, 3]);
        assert_eq!(graph.time_steps(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_degree_sums_parallel_edges() {
        let graph = sample();
        // 0-1 at steps 1 and 4, 0-2 at step 3
        assert_eq!(graph.degree(0), 3);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.degree(99), 0);
        assert_eq!(graph.neighbors(0), vec![1, 2]);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let graph = EventGraph::from_edges(&[Edge::new(5, 5, 1), Edge::new(5, 6, 1)]);
        assert_eq!(graph.degree(5), 3);
        assert_eq!(graph.degree(6), 1);
    }

    #[test]
    fn test_subgraph_matches_predicate_exactly() {
        let graph = sample();
        let sub = graph.subgraph(|t| t % 2 == 1);

        assert!(sub.edges().iter().all(|e| e.time_step % 2 == 1));
        let expected: Vec<Edge> = graph
            .edges()
            .into_iter()
            .filter(|e| e.time_step % 2 == 1)
            .collect();
        assert_eq!(sub.edges(), expected);
        // Node 3 only appears at step 3
        assert_eq!(sub.nodes(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_components_with_isolated_node() {
        use crate::data::{canonicalize, normalize, EventRecord, EventTable, SelfLoopPolicy};

        let table = EventTable::new(vec![
            EventRecord::new("a", "b", 2000),
            EventRecord::new("c", "d", 2001),
            EventRecord::new("e", "e", 2001),
        ]);
        let canonical = canonicalize(&normalize(&table), SelfLoopPolicy::Drop);
        let graph = EventGraph::from_canonical(&canonical);

        // e (id 4) is isolated after its self-loop was dropped
        assert_eq!(graph.component_count(), 3);
        assert_eq!(graph.components(), vec![vec![0, 1], vec![2, 3], vec![4]]);
        assert_eq!(EventGraph::new().components(), Vec::<Vec<ActorId>>::new());
        assert_eq!(EventGraph::new().component_count(), 0);
    }

    #[test]
    fn test_subgraph_drops_non_incident_nodes() {
        let sub = sample().subgraph(|t| t == 2);
        assert_eq!(sub.nodes(), vec![1, 2]);
    }

    #[test]
    fn test_empty_subgraph_is_valid() {
        let sub = sample().subgraph(|t| t > 100);
        assert!(sub.is_empty());
        assert_eq!(sub.node_count(), 0);
        assert!(sub.ensure_non_empty("late").unwrap_err().is_soft());
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let graph = sample();
        let parts = graph.partition(3);

        let mut union = parts.pre.edges();
        union.extend(parts.post.edges());
        union.sort();
        assert_eq!(union, graph.edges());

        assert!(parts.pre.edges().iter().all(|e| e.time_step < 3));
        assert!(parts.post.edges().iter().all(|e| e.time_step >= 3));
    }

    #[test]
    fn test_snapshots_and_cumulative() {
        let graph = sample();
        let snapshots = graph.snapshots();
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[2].1.edge_count(), 2);

        assert_eq!(graph.cumulative_until(2).edge_count(), 2);
        assert_eq!(graph.cumulative_until(4).edge_count(), 5);
    }

    #[test]
    fn test_density() {
        // 4 nodes, distinct dyads 0-1, 1-2, 0-2, 2-3 out of 6
        assert!((sample().density() - 4.0 / 6.0).abs() < 1e-10);
        assert_eq!(EventGraph::new().density(), 0.0);
    }
}
