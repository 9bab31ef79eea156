//! Popularity Network - preferential-attachment analysis of event networks
//!
//! # Usage
//!
//! ```bash
//! popularity-network analyze --input data/cartel_fights.csv --threshold 5 --out-dir out
//! popularity-network simulate --nodes 200 --edges-per-node 2 --seed 7
//! popularity-network prepare --left actors.csv --right quotas.csv \
//!     --key country --key year --output survey.csv
//! popularity-network init-config --output popularity.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use popularity_network::collab::{BarabasiAlbert, LayoutEngine, RenderSpec, SeededLayout};
use popularity_network::data::{RowPolicy, SelfLoopPolicy};
use popularity_network::graph::{
    DegreeDistribution, EventGraph, EventNetwork, GraphBuilder, GraphMetrics,
};
use popularity_network::survey::{self, Table};
use popularity_network::utils::{export, setup_logging, Config};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "popularity-network")]
#[command(about = "Preferential-attachment analysis of dyadic event networks")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the network of an event file and describe it
    Analyze {
        /// Path to the event CSV
        #[arg(short, long)]
        input: PathBuf,

        /// First time step of the "post" partition
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Skip unparseable rows instead of aborting
        #[arg(long)]
        lenient: bool,

        /// Keep events whose two actors are the same
        #[arg(long)]
        keep_self_loops: bool,

        /// Seed for the exported layout
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for CSV/JSON exports
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Run the pipeline on a simulated Barabási–Albert network
    Simulate {
        /// Number of nodes
        #[arg(short, long)]
        nodes: Option<usize>,

        /// Edges added by every new node
        #[arg(short, long)]
        edges_per_node: Option<usize>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// First time step of the "post" partition
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Directory for CSV/JSON exports
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Join, recode and clean two survey tables
    Prepare {
        /// Left table (all rows kept before cleaning)
        #[arg(long)]
        left: PathBuf,

        /// Right table
        #[arg(long)]
        right: PathBuf,

        /// Join key column (repeat for composite keys)
        #[arg(short, long = "key", required = true)]
        keys: Vec<String>,

        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write a default configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "popularity.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    setup_logging(&config.logging.level);

    match cli.command {
        Commands::Analyze {
            input,
            threshold,
            lenient,
            keep_self_loops,
            seed,
            out_dir,
        } => {
            if let Some(threshold) = threshold {
                config.partition.threshold = threshold;
            }
            if lenient {
                config.ingest.row_policy = RowPolicy::Lenient;
            }
            if keep_self_loops {
                config.canonical.self_loops = SelfLoopPolicy::Keep;
            }
            if let Some(seed) = seed {
                config.layout.seed = seed;
            }
            config.validate()?;

            info!(input = %input.display(), "Analyzing event file");
            let network = GraphBuilder::from_config(&config)
                .build_from_file(&input)
                .with_context(|| format!("Failed to build network from {}", input.display()))?;

            report(&network, &config, out_dir.as_deref())?;
        }

        Commands::Simulate {
            nodes,
            edges_per_node,
            seed,
            threshold,
            out_dir,
        } => {
            if let Some(nodes) = nodes {
                config.generator.nodes = nodes;
            }
            if let Some(m) = edges_per_node {
                config.generator.edges_per_node = m;
            }
            if let Some(seed) = seed {
                config.generator.seed = seed;
                config.layout.seed = seed;
            }
            if let Some(threshold) = threshold {
                config.partition.threshold = threshold;
            }
            config.validate()?;

            info!(
                nodes = config.generator.nodes,
                edges_per_node = config.generator.edges_per_node,
                seed = config.generator.seed,
                "Simulating Barabási–Albert network"
            );
            let table = BarabasiAlbert::from_config(&config.generator).generate()?;
            let network = GraphBuilder::from_config(&config).build(&table);

            report(&network, &config, out_dir.as_deref())?;
        }

        Commands::Prepare {
            left,
            right,
            keys,
            output,
        } => {
            let markers = &config.survey.missing_markers;
            let left_table = Table::load(&left, markers)
                .with_context(|| format!("Failed to load {}", left.display()))?;
            let right_table = Table::load(&right, markers)
                .with_context(|| format!("Failed to load {}", right.display()))?;

            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            let (table, prep) = survey::prepare(&left_table, &right_table, &keys, &config.survey)?;
            table
                .write_csv(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!("Joined rows:        {}", prep.joined_rows);
            for (column, unmapped) in &prep.recode.unmapped {
                println!("Unmapped in {column}: {unmapped}");
            }
            println!("Dropped incomplete: {}", prep.dropped_incomplete);
            println!("Written rows:       {} -> {}", table.len(), output.display());
        }

        Commands::InitConfig { output } => {
            Config::create_default(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Default configuration written to {}", output.display());
        }
    }

    Ok(())
}

/// Print the descriptive summary and optionally export the derived views
fn report(network: &EventNetwork, config: &Config, out_dir: Option<&Path>) -> Result<()> {
    let canonical = &network.canonical;
    let parts = network.partition();

    println!("=== Event Network ===\n");
    if let Some(load) = &network.load_report {
        println!("Rows read:          {}", load.rows_read);
        println!("Rows skipped:       {}", load.skipped());
    }
    println!("Actors:             {}", canonical.index.len());
    println!("Edges:              {}", canonical.len());
    println!("Duplicates dropped: {}", canonical.duplicates_dropped);
    println!("Self-loops dropped: {}", canonical.self_loops_dropped);
    if let (Some(first), Some(last)) = (
        canonical.time_steps().first().and_then(|&t| network.year_of(t)),
        canonical.time_steps().last().and_then(|&t| network.year_of(t)),
    ) {
        println!("Years:              {first}-{last}");
    }

    describe("Full network", &network.graph, network);
    describe(
        &format!("Pre (time step < {})", parts.threshold),
        &parts.pre,
        network,
    );
    describe(
        &format!("Post (time step >= {})", parts.threshold),
        &parts.post,
        network,
    );

    for (label, graph) in [("pre", &parts.pre), ("post", &parts.post)] {
        if let Err(err) = graph.ensure_non_empty(label) {
            warn!(error = %err, "Partition is empty");
        }
    }

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        export::write_edge_list(&canonical.edges, dir.join("edges.csv"))?;
        export::write_actor_index(&canonical.index, dir.join("actors.csv"))?;
        export::write_degrees(&network.degrees(), &canonical.index, dir.join("degrees_full.csv"))?;
        export::write_degrees(
            &DegreeDistribution::from_graph(&parts.pre),
            &canonical.index,
            dir.join("degrees_pre.csv"),
        )?;
        export::write_degrees(
            &DegreeDistribution::from_graph(&parts.post),
            &canonical.index,
            dir.join("degrees_post.csv"),
        )?;

        let layout =
            SeededLayout::new(config.layout.seed, config.layout.shape).layout(&network.graph);
        let spec = RenderSpec::build(&network.graph, &canonical.index, &layout, &parts);
        export::write_render_spec(&spec, dir.join("render.csv"))?;

        let metrics = GraphMetrics::new(&network.graph);
        let summary = serde_json::json!({
            "actors": canonical.index.len(),
            "edges": canonical.len(),
            "duplicates_dropped": canonical.duplicates_dropped,
            "self_loops_dropped": canonical.self_loops_dropped,
            "threshold": parts.threshold,
            "pre_edges": parts.pre.edge_count(),
            "post_edges": parts.post.edge_count(),
            "components": metrics.component_count(),
            "layout_seed": config.layout.seed,
        });
        export::write_json(&summary, dir.join("summary.json"))?;

        info!(dir = %dir.display(), "Exports written");
    }

    Ok(())
}

fn describe(title: &str, graph: &EventGraph, network: &EventNetwork) {
    let degrees = DegreeDistribution::from_graph(graph);
    let metrics = GraphMetrics::new(graph);

    println!("\n--- {title} ---");
    println!("Nodes: {}  Edges: {}", graph.node_count(), graph.edge_count());
    if graph.is_empty() {
        println!("(no edges)");
        return;
    }
    println!("Density: {:.4}", graph.density());
    println!("Mean degree: {:.3}  Max degree: {}", degrees.mean(), degrees.max());
    println!(
        "Components: {}  Largest: {}",
        metrics.component_count(),
        metrics.largest_component_size()
    );
    println!("Average clustering: {:.4}", metrics.average_clustering());

    println!("Degree histogram:");
    for (degree, count) in degrees.histogram() {
        println!("  {degree:>4}: {}", "#".repeat(count.min(60)));
    }

    println!("Top actors:");
    for (id, degree) in degrees.top(5) {
        let name = network.actor_name(id).unwrap_or("?");
        println!("  {name}: {degree}");
    }
}
