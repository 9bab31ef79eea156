//! Basic pipeline example.
//!
//! Builds the event network of a small clash table, splits it at a
//! threshold and compares the degree distributions of both halves.

use popularity_network::collab::{LayoutEngine, RenderSpec, SeededLayout};
use popularity_network::graph::{DegreeDistribution, GraphBuilder, GraphMetrics};

const EVENTS: &str = "\
actor_a,actor_b,year
Sinaloa,Juarez,2004
Juarez,Sinaloa,2004
Sinaloa,Gulf,2005
Gulf,Zetas,2007
Zetas,Sinaloa,2008
Familia,Zetas,2009
Sinaloa,Familia,2010
Zetas,Zetas,2010
";

fn main() -> anyhow::Result<()> {
    println!("=== Basic Pipeline Example ===\n");

    let network = GraphBuilder::new()
        .with_threshold(4)
        .build_from_reader(EVENTS.as_bytes())?;

    println!("Actors: {}", network.canonical.index.len());
    println!("Edges: {}", network.graph.edge_count());
    println!("Duplicates dropped: {}", network.canonical.duplicates_dropped);
    println!("Self-loops dropped: {}", network.canonical.self_loops_dropped);

    println!("\n--- Actor Index ---");
    for (id, name) in network.canonical.index.iter() {
        println!("  {id}: {name}");
    }

    println!("\n--- Edges (source, target, time step) ---");
    for edge in &network.canonical.edges {
        let year = network.year_of(edge.time_step).unwrap_or_default();
        println!(
            "  {} - {} @ t={} ({year})",
            network.actor_name(edge.source).unwrap_or("?"),
            network.actor_name(edge.target).unwrap_or("?"),
            edge.time_step
        );
    }

    let parts = network.partition();
    for (label, graph) in [("pre", &parts.pre), ("post", &parts.post)] {
        let degrees = DegreeDistribution::from_graph(graph);
        println!("\n--- {label} (threshold {}) ---", parts.threshold);
        println!("Nodes: {}  Edges: {}", graph.node_count(), graph.edge_count());
        for (id, degree) in degrees.iter() {
            println!("  {}: {degree}", network.actor_name(id).unwrap_or("?"));
        }
    }

    println!("\n--- Hubs ---");
    for (id, degree) in GraphMetrics::new(&network.graph).detect_hubs(2) {
        println!("  {}: {degree}", network.actor_name(id).unwrap_or("?"));
    }

    let layout = SeededLayout::new(42, Default::default()).layout(&network.graph);
    let spec = RenderSpec::build(&network.graph, &network.canonical.index, &layout, &parts);
    println!("\n--- Render Rows ---");
    for node in &spec.nodes {
        println!(
            "  {:<8} ({:>6.3}, {:>6.3}) degree={} group={:?}",
            node.name, node.x, node.y, node.degree, node.group
        );
    }

    Ok(())
}
