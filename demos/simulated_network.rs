//! Simulated network example.
//!
//! Grows a Barabási–Albert network and runs it through the same pipeline
//! as real event data. Early nodes should dominate the degree ranking.

use popularity_network::collab::{edges_by_step, BarabasiAlbert};
use popularity_network::graph::{DegreeDistribution, GraphBuilder};

fn main() -> anyhow::Result<()> {
    println!("=== Simulated Network Example ===\n");

    let generator = BarabasiAlbert::new(300, 2, 7);
    let table = generator.generate()?;
    println!(
        "Generated {} events over {} periods",
        table.len(),
        table.num_periods()
    );

    let network = GraphBuilder::new().with_threshold(150).build(&table);
    let parts = network.partition();

    let full = network.degrees();
    let pre = DegreeDistribution::from_graph(&parts.pre);
    let post = DegreeDistribution::from_graph(&parts.post);

    println!("\n--- Degree Summary ---");
    println!("{:<6} {:>7} {:>7} {:>8}", "view", "nodes", "max", "mean");
    for (label, degrees) in [("full", &full), ("pre", &pre), ("post", &post)] {
        println!(
            "{:<6} {:>7} {:>7} {:>8.3}",
            label,
            degrees.len(),
            degrees.max(),
            degrees.mean()
        );
    }

    println!("\n--- Top Actors ---");
    for (id, degree) in full.top(5) {
        println!("  {}: {degree}", network.actor_name(id).unwrap_or("?"));
    }

    println!("\n--- Degree Histogram (full) ---");
    for (degree, count) in full.histogram() {
        println!("  {degree:>3}: {count}");
    }

    let steps = edges_by_step(&network.canonical.edges);
    println!("\nEdges per step: {} steps, {} edges each", steps.len(), generator.edges_per_node);

    Ok(())
}
