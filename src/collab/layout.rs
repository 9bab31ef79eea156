//! Layout contract: 2-D coordinates per node.

use crate::data::ActorId;
use crate::graph::EventGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Node coordinates produced by a layout engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub positions: BTreeMap<ActorId, (f64, f64)>,
}

impl Layout {
    pub fn get(&self, node: ActorId) -> Option<(f64, f64)> {
        self.positions.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Anything that can place the nodes of a graph in the plane
///
/// Force-directed engines live outside this crate; they are expected to
/// take their randomness from an explicit seed so that layouts repeat.
pub trait LayoutEngine {
    fn layout(&self, graph: &EventGraph) -> Layout;
}

/// Placement pattern of [`SeededLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutShape {
    /// Uniform positions on the unit square
    #[default]
    Square,
    /// Nodes evenly spaced on the unit circle, randomly rotated
    Circle,
}

/// Reproducible starting layout driven only by its seed
#[derive(Debug, Clone)]
pub struct SeededLayout {
    pub seed: u64,
    pub shape: LayoutShape,
}

impl SeededLayout {
    pub fn new(seed: u64, shape: LayoutShape) -> Self {
        Self { seed, shape }
    }
}

impl LayoutEngine for SeededLayout {
    fn layout(&self, graph: &EventGraph) -> Layout {
        let nodes = graph.nodes();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let positions = match self.shape {
            LayoutShape::Square => nodes
                .into_iter()
                .map(|node| (node, (rng.gen::<f64>(), rng.gen::<f64>())))
                .collect(),
            LayoutShape::Circle => {
                let offset = rng.gen::<f64>() * TAU;
                let n = nodes.len().max(1) as f64;
                nodes
                    .into_iter()
                    .enumerate()
                    .map(|(i, node)| {
                        let angle = offset + TAU * i as f64 / n;
                        (node, (angle.cos(), angle.sin()))
                    })
                    .collect()
            }
        };

        Layout { positions }
    }
}
