//! # Popularity Network
//!
//! Preparation of dyadic event data for preferential-attachment
//! ("popularity") analysis of social networks, such as clashes between
//! cartels recorded as `(actor_a, actor_b, year)` rows.
//!
//! ## Features
//!
//! - **Data Module**: CSV ingestion, time-step normalization, actor id canonicalization
//! - **Graph Module**: time-stamped multigraph, subgraphs, pre/post partitions, degrees
//! - **Collab Module**: contracts for layout, attachment estimation and rendering,
//!   plus a Barabási–Albert generator for synthetic input
//! - **Survey Module**: join, recode and clean survey tables into a flat CSV
//! - **Utils Module**: configuration, logging, export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use popularity_network::graph::{DegreeDistribution, GraphBuilder};
//!
//! fn main() -> anyhow::Result<()> {
//!     let network = GraphBuilder::new()
//!         .with_threshold(5)
//!         .build_from_file("cartel_fights.csv")?;
//!
//!     let parts = network.partition();
//!     let pre = DegreeDistribution::from_graph(&parts.pre);
//!     let post = DegreeDistribution::from_graph(&parts.post);
//!     println!("max degree before: {}, after: {}", pre.max(), post.max());
//!
//!     Ok(())
//! }
//! ```

pub mod collab;
pub mod data;
pub mod error;
pub mod graph;
pub mod survey;
pub mod utils;

// Re-export commonly used types
pub use data::{ActorId, ActorIndex, Edge, EventRecord, EventTable, TimeStep};
pub use error::{PipelineError, Result};
pub use graph::{DegreeDistribution, EventGraph, EventNetwork, GraphBuilder};
pub use utils::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
