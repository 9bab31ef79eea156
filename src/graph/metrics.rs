//! Descriptive graph metrics.

use super::{DegreeDistribution, EventGraph};
use crate::data::ActorId;
use std::collections::BTreeMap;

/// Graph metrics calculator
#[derive(Debug)]
pub struct GraphMetrics<'a> {
    graph: &'a EventGraph,
}

impl<'a> GraphMetrics<'a> {
    /// Create a new metrics calculator for a graph
    pub fn new(graph: &'a EventGraph) -> Self {
        Self { graph }
    }

    /// Degree centrality for all nodes
    ///
    /// Degree centrality = degree / (n - 1); parallel edges count separately,
    /// so values can exceed 1 in a multigraph.
    pub fn degree_centrality(&self) -> BTreeMap<ActorId, f64> {
        let n = self.graph.node_count();
        if n <= 1 {
            return self.graph.nodes().into_iter().map(|node| (node, 0.0)).collect();
        }

        let max_degree = (n - 1) as f64;
        DegreeDistribution::from_graph(self.graph)
            .iter()
            .map(|(node, degree)| (node, degree as f64 / max_degree))
            .collect()
    }

    /// Average number of incident edges per node
    pub fn average_degree(&self) -> f64 {
        DegreeDistribution::from_graph(self.graph).mean()
    }

    /// Number of connected components (isolated nodes count as one each)
    pub fn component_count(&self) -> usize {
        self.graph.component_count()
    }

    /// Size of the largest connected component
    pub fn largest_component_size(&self) -> usize {
        self.components().iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Connected components, each sorted, ordered by their smallest id
    pub fn components(&self) -> Vec<Vec<ActorId>> {
        self.graph.components()
    }

    /// Local clustering coefficient of a node over distinct neighbours
    pub fn local_clustering(&self, node: ActorId) -> f64 {
        let neighbors: Vec<ActorId> = self
            .graph
            .neighbors(node)
            .into_iter()
            .filter(|&n| n != node)
            .collect();
        let k = neighbors.len();

        if k < 2 {
            return 0.0;
        }

        let mut edges_between_neighbors = 0;
        for i in 0..k {
            let adjacent = self.graph.neighbors(neighbors[i]);
            for &other in &neighbors[(i + 1)..] {
                if adjacent.binary_search(&other).is_ok() {
                    edges_between_neighbors += 1;
                }
            }
        }

        let max_edges = k * (k - 1) / 2;
        edges_between_neighbors as f64 / max_edges as f64
    }

    /// Average clustering coefficient
    pub fn average_clustering(&self) -> f64 {
        let nodes = self.graph.nodes();
        if nodes.is_empty() {
            return 0.0;
        }

        let total: f64 = nodes.iter().map(|&n| self.local_clustering(n)).sum();
        total / nodes.len() as f64
    }

    /// Detect hub nodes (highest degree)
    pub fn detect_hubs(&self, top_k: usize) -> Vec<(ActorId, usize)> {
        DegreeDistribution::from_graph(self.graph).top(top_k)
    }
}
