//! Renderer contract: everything an external plotting tool needs per node.

use super::Layout;
use crate::data::{ActorId, ActorIndex};
use crate::graph::{DegreeDistribution, EventGraph, Partition};
use serde::Serialize;

/// Which side of a pre/post split a node is active in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Pre,
    Post,
    Both,
    Neither,
}

/// One node as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: ActorId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Degree in the rendered graph; renderers scale node size from it
    pub degree: usize,
    /// Colour group
    pub group: Membership,
}

/// Render input for one graph snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSpec {
    pub nodes: Vec<RenderNode>,
}

impl RenderSpec {
    /// Combine a graph, its layout and a partition into per-node render rows
    ///
    /// Nodes without coordinates in `layout` are placed at the origin.
    pub fn build(
        graph: &EventGraph,
        index: &ActorIndex,
        layout: &Layout,
        partition: &Partition,
    ) -> Self {
        let degrees = DegreeDistribution::from_graph(graph);

        let nodes = degrees
            .iter()
            .map(|(id, degree)| {
                let (x, y) = layout.get(id).unwrap_or((0.0, 0.0));
                let in_pre = partition.pre.contains_node(id);
                let in_post = partition.post.contains_node(id);
                let group = match (in_pre, in_post) {
                    (true, true) => Membership::Both,
                    (true, false) => Membership::Pre,
                    (false, true) => Membership::Post,
                    (false, false) => Membership::Neither,
                };
                RenderNode {
                    id,
                    name: index.name(id).unwrap_or_default().to_string(),
                    x,
                    y,
                    degree,
                    group,
                }
            })
            .collect();

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
