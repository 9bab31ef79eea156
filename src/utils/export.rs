//! CSV/JSON export for external tools
//!
//! Writes the derived views (edge list, actor index, degrees, render rows)
//! in the shapes estimators and plotting tools read.

use crate::collab::RenderSpec;
use crate::data::{ActorId, ActorIndex, Edge};
use crate::error::Result;
use crate::graph::DegreeDistribution;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Serialize)]
struct ActorRow<'a> {
    id: ActorId,
    name: &'a str,
}

#[derive(Serialize)]
struct DegreeRow<'a> {
    id: ActorId,
    name: &'a str,
    degree: usize,
}

/// Write `source,target,time_step` rows
pub fn write_edge_list<P: AsRef<Path>>(edges: &[Edge], path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for edge in edges {
        writer.serialize(edge)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `id,name` rows in id order
pub fn write_actor_index<P: AsRef<Path>>(index: &ActorIndex, path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for (id, name) in index.iter() {
        writer.serialize(ActorRow { id, name })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `id,name,degree` rows in id order
pub fn write_degrees<P: AsRef<Path>>(
    degrees: &DegreeDistribution,
    index: &ActorIndex,
    path: P,
) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for (id, degree) in degrees.iter() {
        let name = index.name(id).unwrap_or_default();
        writer.serialize(DegreeRow { id, name, degree })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one row per node: `id,name,x,y,degree,group`
pub fn write_render_spec<P: AsRef<Path>>(spec: &RenderSpec, path: P) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for node in &spec.nodes {
        writer.serialize(node)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save any serializable value as pretty JSON
pub fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value).map_err(std::io::Error::from)?;
    Ok(())
}
