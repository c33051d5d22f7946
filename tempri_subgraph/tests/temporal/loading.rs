use std::fs;

use tempfile::TempDir;
use tempri_common::io::{GraphReader, GraphWriter, OccurrenceFormatter};
use tempri_common::sampling::extract_random_subgraph;
use tempri_common::{Config, Delta};
use tempri_subgraph::TemporalMatcher;
use tempri_subgraph::test_harness::setup_test_logging;

const TARGET: &str =
    "5\n0\tA\n1\tA\n2\tA\n3\tB\n4\tA\n0\t1\t1:e,5:e\n1\t2\t3:e\n1\t3\t4:e\n2\t4\t2:e\n";
const QUERY: &str = "3\n0\tA\n1\tA\n2\tA\n0\t1\t1:e\n1\t2\t2:e\n";

#[test]
fn files_load_match_and_format() -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();
    let dir = TempDir::new()?;
    let target_path = dir.path().join("target.txt");
    let query_path = dir.path().join("query.txt");
    fs::write(&target_path, TARGET)?;
    fs::write(&query_path, QUERY)?;

    let mut reader = GraphReader::new();
    let query = reader.read_graph(&query_path, None, true)?;
    let target = reader.read_graph(&target_path, Some(&query), true)?;
    assert_eq!(target.num_nodes(), 4);
    assert_eq!(target.num_edges(), 4);

    let cfg = Config::default();
    let matcher = TemporalMatcher::new(&query, &target, &cfg)?;
    let occurrences = matcher.enumerate_all();
    assert_eq!(occurrences.len(), 1);

    let formatter = OccurrenceFormatter::with_labels(reader.labels());
    let lines: Vec<String> = occurrences
        .iter()
        .map(|o| formatter.format(o.graph()))
        .collect();
    assert_eq!(lines, vec!["(0:A),(1:A),(2:A)\t(0,1,1:e),(1,2,3:e)".to_owned()]);
    Ok(())
}

#[test]
fn sampled_query_survives_a_write_and_occurs_in_itself() -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();
    let dir = TempDir::new()?;
    let target_path = dir.path().join("target.txt");
    fs::write(&target_path, TARGET)?;

    let mut reader = GraphReader::new();
    let target = reader.read_graph(&target_path, None, true)?;
    let sampled = (0..32)
        .find_map(|seed| extract_random_subgraph(&target, 3, seed))
        .ok_or("no connected 3-edge query could be sampled")?;

    let query_path = dir.path().join("sampled.txt");
    GraphWriter::new(reader.labels()).write_query(&sampled, &query_path)?;

    let mut again = GraphReader::with_labels(reader.labels().clone());
    let query = again.read_graph(&query_path, None, true)?;
    assert_eq!(query.num_nodes(), sampled.num_nodes());
    assert_eq!(query.num_edges(), sampled.num_edges());

    let cfg = Config::builder().delta(Delta::Within(3)).build();
    assert!(TemporalMatcher::new(&query, &query, &cfg)?.count() >= 1);
    Ok(())
}
