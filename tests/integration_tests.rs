//! Integration tests for the popularity network library.

use popularity_network::{
    collab::{BarabasiAlbert, LayoutEngine, Membership, RenderSpec, SeededLayout},
    data::{canonicalize, normalize, EventLoader, RowPolicy, SelfLoopPolicy},
    graph::{DegreeDistribution, EventGraph, GraphBuilder},
    survey::{self, Table},
    utils::{export, Config, SurveyConfig},
    Edge, EventRecord, EventTable, PipelineError,
};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

const FIGHTS: &str = "\
actor_a,actor_b,year
Sinaloa,Juarez,2004
Juarez,Sinaloa,2004
Sinaloa,Gulf,2005
Gulf,Zetas,2007
Zetas,Sinaloa,2008
Familia,Zetas,2009
Sinaloa,Familia,2010
";

fn table(rows: &[(&str, &str, i32)]) -> EventTable {
    rows.iter()
        .map(|&(a, b, year)| EventRecord::new(a, b, year))
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn test_worked_example() {
    let events = table(&[("A", "B", 2000), ("B", "A", 2000), ("A", "C", 2001)]);
    let network = GraphBuilder::new().with_threshold(2).build(&events);

    assert_eq!(network.canonical.index.id("A"), Some(0));
    assert_eq!(network.canonical.index.id("B"), Some(1));
    assert_eq!(network.canonical.index.id("C"), Some(2));
    assert_eq!(
        network.canonical.edges,
        vec![Edge::new(0, 1, 1), Edge::new(0, 2, 2)]
    );

    let parts = network.partition();
    assert_eq!(parts.pre.edges(), vec![Edge::new(0, 1, 1)]);
    assert_eq!(parts.post.edges(), vec![Edge::new(0, 2, 2)]);
    assert_eq!(network.graph.degree(0), 2);
    assert!(!parts.pre.contains_node(2));
}

#[test]
fn test_empty_input_gives_empty_graph() {
    let network = GraphBuilder::new()
        .build_from_reader("actor_a,actor_b,year\n".as_bytes())
        .unwrap();

    assert!(network.is_empty());
    assert_eq!(network.graph.node_count(), 0);
    assert_eq!(network.min_year, None);

    let parts = network.partition();
    assert!(parts.pre.is_empty());
    assert!(parts.post.is_empty());
    assert!(matches!(
        parts.post.ensure_non_empty("post"),
        Err(PipelineError::EmptyResult(_))
    ));
}

#[test]
fn test_time_steps_start_at_one_and_preserve_order() {
    let events = table(&[
        ("A", "B", 1998),
        ("B", "C", 2003),
        ("C", "D", 2001),
        ("D", "A", 1998),
    ]);
    let timed = normalize(&events);

    assert_eq!(timed.iter().map(|e| e.time_step).min(), Some(1));
    for a in &timed {
        for b in &timed {
            if a.year < b.year {
                assert!(a.time_step < b.time_step);
            }
            if a.year == b.year {
                assert_eq!(a.time_step, b.time_step);
            }
        }
    }
}

#[test]
fn test_ids_are_deterministic_and_bijective() {
    let forward = table(&[("Zetas", "Gulf", 2000), ("Beltran", "Gulf", 2001)]);
    let shuffled = table(&[("Beltran", "Gulf", 2001), ("Gulf", "Zetas", 2000)]);

    let a = canonicalize(&normalize(&forward), SelfLoopPolicy::Drop);
    let b = canonicalize(&normalize(&shuffled), SelfLoopPolicy::Drop);
    assert_eq!(a.index, b.index);

    let ids: BTreeSet<_> = a.index.ids().collect();
    assert_eq!(ids, (0..a.index.len() as u32).collect());
    for (id, name) in a.index.iter() {
        assert_eq!(a.index.id(name), Some(id));
    }
}

#[test]
fn test_dedup_is_symmetric() {
    let events = table(&[("A", "B", 2000), ("B", "A", 2000), ("A", "B", 2000)]);
    let canonical = canonicalize(&normalize(&events), SelfLoopPolicy::Drop);

    assert_eq!(canonical.edges, vec![Edge::new(0, 1, 1)]);
    assert_eq!(canonical.duplicates_dropped, 2);
}

#[test]
fn test_repeat_pair_in_other_period_is_kept() {
    let events = table(&[("A", "B", 2000), ("B", "A", 2003)]);
    let network = GraphBuilder::new().build(&events);

    assert_eq!(network.graph.edge_count(), 2);
    assert_eq!(network.graph.degree(0), 2);
}

#[test]
fn test_subgraph_and_partition_are_exact() {
    let network = GraphBuilder::new()
        .with_threshold(4)
        .build_from_reader(FIGHTS.as_bytes())
        .unwrap();
    let all = network.graph.edges();

    let odd = network.graph.subgraph(|t| t % 2 == 1);
    let expected: Vec<Edge> = all.iter().copied().filter(|e| e.time_step % 2 == 1).collect();
    assert_eq!(odd.edges(), expected);

    let parts = network.partition();
    let mut union = parts.pre.edges();
    union.extend(parts.post.edges());
    union.sort();
    assert_eq!(union, all);
    assert!(parts.pre.edges().iter().all(|e| e.time_step < 4));
    assert!(parts.post.edges().iter().all(|e| e.time_step >= 4));

    let cumulative = network.graph.cumulative_until(3);
    assert_eq!(cumulative.edges(), parts.pre.edges());
}

#[test]
fn test_degree_sum_is_twice_edge_count() {
    let network = GraphBuilder::new()
        .with_self_loops(SelfLoopPolicy::Keep)
        .build(&table(&[("A", "B", 2000), ("A", "A", 2000), ("B", "C", 2001)]));

    let degrees = network.degrees();
    assert_eq!(degrees.total(), 2 * network.graph.edge_count());
    assert_eq!(degrees.get(0), Some(3));
}

#[test]
fn test_self_loop_dropped_by_default_keeps_actor() {
    let network = GraphBuilder::new().build(&table(&[("A", "B", 2000), ("C", "C", 2000)]));

    assert_eq!(network.canonical.self_loops_dropped, 1);
    assert_eq!(network.graph.edge_count(), 1);
    assert_eq!(network.graph.degree(2), 0);
}

#[test]
fn test_strict_and_lenient_loading() {
    let csv = "actor_a,actor_b,year\nA,B,2000\nA,,2001\nB,C,soon\nC,D,2002\n";

    let err = EventLoader::default().load_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, PipelineError::Data { line: 3, .. }));

    let (events, report) = EventLoader::default()
        .with_row_policy(RowPolicy::Lenient)
        .load_reader(csv.as_bytes())
        .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(report.skipped_lines, vec![3, 4]);
}

#[test]
fn test_missing_columns_reported_together() {
    let err = EventLoader::default()
        .load_reader("actor_a,when\nA,2000\n".as_bytes())
        .unwrap_err();

    match err {
        PipelineError::Schema { missing } => {
            assert_eq!(missing, vec!["actor_b".to_string(), "year".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_file_pipeline_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fights.csv");
    std::fs::File::create(&input)
        .unwrap()
        .write_all(FIGHTS.as_bytes())
        .unwrap();

    let mut config = Config::default();
    config.partition.threshold = 4;
    let network = GraphBuilder::from_config(&config)
        .build_from_file(&input)
        .unwrap();

    assert_eq!(network.load_report.as_ref().map(|r| r.rows_read), Some(7));
    assert_eq!(network.canonical.duplicates_dropped, 1);
    assert_eq!(network.year_of(1), Some(2004));

    let edges_path = dir.path().join("edges.csv");
    export::write_edge_list(&network.canonical.edges, &edges_path).unwrap();
    let mut reader = csv::Reader::from_path(&edges_path).unwrap();
    let reread: Vec<Edge> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(reread, network.canonical.edges);

    let parts = network.partition();
    let layout = SeededLayout::new(config.layout.seed, config.layout.shape).layout(&network.graph);
    let spec = RenderSpec::build(&network.graph, &network.canonical.index, &layout, &parts);
    assert_eq!(spec.len(), network.graph.node_count());

    let sinaloa = network.canonical.index.id("Sinaloa").unwrap();
    let node = spec.nodes.iter().find(|n| n.id == sinaloa).unwrap();
    assert_eq!(node.group, Membership::Both);
}

#[test]
fn test_date_years_match_integer_years() {
    let csv_dates = "actor_a,actor_b,year\nA,B,2001-03-04\nB,C,2003/12/31\n";
    let csv_ints = "actor_a,actor_b,year\nA,B,2001\nB,C,2003\n";

    let from_dates = GraphBuilder::new().build_from_reader(csv_dates.as_bytes()).unwrap();
    let from_ints = GraphBuilder::new().build_from_reader(csv_ints.as_bytes()).unwrap();
    assert_eq!(from_dates.canonical.edges, from_ints.canonical.edges);
}

#[test]
fn test_barabasi_albert_runs_through_pipeline() {
    let generator = BarabasiAlbert::new(60, 2, 11);
    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();
    assert_eq!(first, second);

    let network = GraphBuilder::new().with_threshold(20).build(&first);
    assert_eq!(network.graph.edge_count(), (60 - 2) * 2);
    assert_eq!(network.canonical.duplicates_dropped, 0);
    assert_eq!(network.canonical.self_loops_dropped, 0);

    let parts = network.partition();
    let pre = DegreeDistribution::from_graph(&parts.pre);
    let post = DegreeDistribution::from_graph(&parts.post);
    assert_eq!(pre.total() + post.total(), network.degrees().total());
}

#[test]
fn test_snapshots_cover_every_edge_once() {
    let graph = EventGraph::from_edges(&[
        Edge::new(0, 1, 1),
        Edge::new(1, 2, 1),
        Edge::new(0, 2, 3),
    ]);

    let snapshots = graph.snapshots();
    assert_eq!(snapshots.len(), 2);
    let total: usize = snapshots.iter().map(|(_, g)| g.edge_count()).sum();
    assert_eq!(total, graph.edge_count());
}

#[test]
fn test_survey_prepare_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let left = dir.path().join("actors.csv");
    let right = dir.path().join("quotas.csv");
    let output = dir.path().join("survey.csv");
    std::fs::write(&left, "country,actor_type\nMX,1\nCO,3\nAR,NA\n").unwrap();
    std::fs::write(&right, "country,quota\nMX,2\nCO,1\nAR,1\n").unwrap();

    let mut config = SurveyConfig::default();
    config.recode.insert(
        "actor_type".into(),
        BTreeMap::from([("1".into(), "Government".into())]),
    );

    let markers = &config.missing_markers;
    let (table, report) = survey::prepare(
        &Table::load(&left, markers).unwrap(),
        &Table::load(&right, markers).unwrap(),
        &["country"],
        &config,
    )
    .unwrap();

    assert_eq!(report.joined_rows, 3);
    // CO's code 3 has no label; AR was missing from the start
    assert_eq!(report.recode.unmapped.get("actor_type"), Some(&1));
    assert_eq!(report.dropped_incomplete, 2);

    table.write_csv(&output).unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content, "country,actor_type,quota\nMX,Government,2\n");
}
