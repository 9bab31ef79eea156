//! Barabási–Albert network generator.
//!
//! Produces synthetic events with the same shape as the real data so the
//! whole pipeline (normalization, canonicalization, partitions) can run on
//! a network whose attachment exponent is known to be 1.

use crate::data::{ActorId, Edge, EventRecord, EventTable, TimeStep};
use crate::error::{PipelineError, Result};
use crate::utils::GeneratorConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tracing::debug;

/// Preferential-attachment growth model
///
/// Nodes `0..m` form the seed set. Node `m + t - 1` arrives at time step
/// `t` and links to `m` distinct existing nodes chosen with probability
/// proportional to their degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarabasiAlbert {
    /// Total number of nodes N
    pub nodes: usize,
    /// Edges added by each arriving node, m
    pub edges_per_node: usize,
    pub seed: u64,
}

impl BarabasiAlbert {
    pub fn new(nodes: usize, edges_per_node: usize, seed: u64) -> Self {
        Self {
            nodes,
            edges_per_node,
            seed,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.nodes, config.edges_per_node, config.seed)
    }

    fn validate(&self) -> Result<()> {
        if self.edges_per_node == 0 {
            return Err(PipelineError::Config(
                "edges_per_node must be at least 1".into(),
            ));
        }
        if self.nodes <= self.edges_per_node {
            return Err(PipelineError::Config(format!(
                "nodes ({}) must exceed edges_per_node ({})",
                self.nodes, self.edges_per_node
            )));
        }
        if self.nodes > ActorId::MAX as usize {
            return Err(PipelineError::Config(format!(
                "nodes ({}) exceeds the actor id range",
                self.nodes
            )));
        }
        Ok(())
    }

    /// Generate the time-stamped edge list
    ///
    /// Yields `(N - m) * m` edges, no self-loops and no duplicate dyads.
    pub fn generate_edges(&self) -> Result<Vec<Edge>> {
        self.validate()?;

        let m = self.edges_per_node;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut edges = Vec::with_capacity((self.nodes - m) * m);

        let mut targets: Vec<ActorId> = (0..m as ActorId).collect();
        // Each node appears once per incident edge, so a uniform draw from
        // this pool is a degree-proportional draw
        let mut pool: Vec<ActorId> = Vec::with_capacity(2 * edges.capacity());

        for source in m..self.nodes {
            let source = source as ActorId;
            let time_step = (source as usize - m + 1) as TimeStep;

            for &target in &targets {
                edges.push(Edge::new(source, target, time_step));
            }
            pool.extend_from_slice(&targets);
            pool.extend(std::iter::repeat(source).take(m));

            let mut chosen = BTreeSet::new();
            while chosen.len() < m {
                if let Some(&node) = pool.choose(&mut rng) {
                    chosen.insert(node);
                }
            }
            targets = chosen.into_iter().collect();
        }

        debug!(
            nodes = self.nodes,
            edges_per_node = m,
            edges = edges.len(),
            "Generated Barabási–Albert network"
        );
        Ok(edges)
    }

    /// Generate events shaped like the input file
    ///
    /// Actor names are zero-padded node numbers, so lexicographic
    /// canonicalization gives every node back its own number. The year is
    /// the arrival time step.
    pub fn generate(&self) -> Result<EventTable> {
        let edges = self.generate_edges()?;
        let width = (self.nodes - 1).to_string().len();

        let records = edges
            .iter()
            .map(|e| {
                EventRecord::new(
                    format!("{:0width$}", e.target),
                    format!("{:0width$}", e.source),
                    e.time_step as i32,
                )
            })
            .collect();

        Ok(EventTable::new(records))
    }
}
