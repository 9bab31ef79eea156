//! Graph builder for constructing event networks from dyadic event tables.

use super::{DegreeDistribution, EventGraph, Partition};
use crate::data::{
    canonicalize, normalize, ActorId, CanonicalEdges, EventLoader, EventTable, LoadReport,
    RowPolicy, SelfLoopPolicy, TimeStep,
};
use crate::error::{PipelineError, Result};
use crate::utils::{Config, IngestConfig};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Builder running ingestion, normalization, canonicalization and assembly
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    /// Column layout and row policy for file input
    ingest: IngestConfig,
    /// What to do with `A–A` events
    self_loops: SelfLoopPolicy,
    /// First time step of the "post" partition
    threshold: TimeStep,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new GraphBuilder with default settings
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create a builder from the relevant configuration sections
    pub fn from_config(config: &Config) -> Self {
        Self {
            ingest: config.ingest.clone(),
            self_loops: config.canonical.self_loops,
            threshold: config.partition.threshold,
        }
    }

    /// Set the row policy used when loading files
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.ingest.row_policy = policy;
        self
    }

    /// Set the self-loop policy
    pub fn with_self_loops(mut self, policy: SelfLoopPolicy) -> Self {
        self.self_loops = policy;
        self
    }

    /// Set the partition threshold
    pub fn with_threshold(mut self, threshold: TimeStep) -> Self {
        self.threshold = threshold;
        self
    }

    /// Load a file and build its network
    pub fn build_from_file<P: AsRef<Path>>(&self, path: P) -> Result<EventNetwork> {
        self.check_threshold()?;
        let (table, report) = EventLoader::new(self.ingest.clone()).load(path)?;
        let mut network = self.build(&table);
        network.load_report = Some(report);
        Ok(network)
    }

    /// Read events from any reader and build their network
    pub fn build_from_reader<R: Read>(&self, reader: R) -> Result<EventNetwork> {
        self.check_threshold()?;
        let (table, report) = EventLoader::new(self.ingest.clone()).load_reader(reader)?;
        let mut network = self.build(&table);
        network.load_report = Some(report);
        Ok(network)
    }

    /// Build the network of an in-memory table
    ///
    /// An empty table produces an empty network.
    pub fn build(&self, table: &EventTable) -> EventNetwork {
        let events = normalize(table);
        let canonical = canonicalize(&events, self.self_loops);
        let graph = EventGraph::from_canonical(&canonical);

        info!(
            actors = graph.node_count(),
            edges = graph.edge_count(),
            periods = table.num_periods(),
            threshold = self.threshold,
            "Built event network"
        );

        EventNetwork {
            min_year: table.min_year(),
            canonical,
            graph,
            threshold: self.threshold,
            load_report: None,
        }
    }

    fn check_threshold(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(PipelineError::Config(
                "partition threshold must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// A built network: id mapping, canonical edges and the full graph
#[derive(Debug, Clone)]
pub struct EventNetwork {
    /// Year that maps to time step 1
    pub min_year: Option<i32>,
    pub canonical: CanonicalEdges,
    /// Full multigraph, including actors left isolated by dropped self-loops
    pub graph: EventGraph,
    /// Default pre/post threshold
    pub threshold: TimeStep,
    /// Present when the network was loaded from a file or reader
    pub load_report: Option<LoadReport>,
}

impl EventNetwork {
    /// Pre/post split at the configured threshold
    pub fn partition(&self) -> Partition {
        self.graph.partition(self.threshold)
    }

    /// Name of an actor id
    pub fn actor_name(&self, id: ActorId) -> Option<&str> {
        self.canonical.index.name(id)
    }

    /// Calendar year of a time step
    pub fn year_of(&self, time_step: TimeStep) -> Option<i32> {
        self.min_year.map(|min| min + time_step as i32 - 1)
    }

    /// Degree distribution of the full graph
    pub fn degrees(&self) -> DegreeDistribution {
        DegreeDistribution::from_graph(&self.graph)
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
