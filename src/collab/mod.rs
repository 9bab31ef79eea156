//! External collaborators.
//!
//! Layout, attachment estimation and rendering happen in other tools;
//! this module pins down their contracts. The Barabási–Albert generator
//! is implemented here so synthetic networks can flow through the same
//! pipeline as real data.

mod estimator;
mod generator;
mod layout;
mod render;

pub use estimator::{edges_by_step, AttachmentEstimate, AttachmentEstimator};
pub use generator::BarabasiAlbert;
pub use layout::{Layout, LayoutEngine, LayoutShape, SeededLayout};
pub use render::{Membership, RenderNode, RenderSpec};
