//! Preferential-attachment estimator contract.
//!
//! Estimation itself happens in an external statistical package. This
//! module fixes what goes in (a time-stamped edge list) and what comes
//! back, and prepares the per-step input those packages expect.

use crate::data::{Edge, TimeStep};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output of an attachment estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentEstimate {
    /// Attachment exponent; ~1 linear, >1 super-linear
    pub alpha: f64,
    /// Estimated attachment function as `(degree, A_k)` points
    pub attachment_curve: Vec<(usize, f64)>,
    /// Estimator-specific diagnostics (confidence intervals, fit summary)
    pub summary: serde_json::Value,
}

/// An estimator of the preferential-attachment exponent
pub trait AttachmentEstimator {
    fn estimate(&self, edges: &[Edge]) -> Result<AttachmentEstimate>;
}

/// Edges grouped by time step in ascending step order
///
/// Growth-based estimators walk the network one step at a time; steps
/// without edges are absent.
pub fn edges_by_step(edges: &[Edge]) -> BTreeMap<TimeStep, Vec<Edge>> {
    let mut by_step: BTreeMap<TimeStep, Vec<Edge>> = BTreeMap::new();
    for edge in edges {
        by_step.entry(edge.time_step).or_default().push(*edge);
    }
    by_step
}
