use std::collections::HashSet;

use rstest::rstest;
use tempri_common::sampling::extract_random_subgraph;
use tempri_common::{Config, Delta, EdgeId, TemporalGraph};
use tempri_subgraph::TemporalMatcher;
use tempri_subgraph::test_harness::setup_test_logging;

use crate::oracle::{brute_force_count, is_valid_occurrence, random_target};

fn config(directed: bool, delta: Delta) -> Config {
    Config::builder().directed(directed).delta(delta).build()
}

/// Seeded (target, query) pairs; seeds whose target cannot host a query of
/// the requested size are skipped.
fn workloads(directed: bool, query_edges: usize) -> Vec<(u64, TemporalGraph, TemporalGraph)> {
    (0..24u64)
        .filter_map(|seed| {
            let target = random_target(seed, directed, 6, 14, 6, 2);
            let query = extract_random_subgraph(&target, query_edges, seed.wrapping_mul(31))?;
            Some((seed, target, query))
        })
        .collect()
}

#[rstest]
#[case::directed_two_edges(true, 2, Delta::Unbounded)]
#[case::directed_three_edges(true, 3, Delta::Unbounded)]
#[case::directed_three_edges_tight(true, 3, Delta::Within(2))]
#[case::directed_three_edges_zero(true, 3, Delta::Within(0))]
#[case::undirected_two_edges(false, 2, Delta::Unbounded)]
#[case::undirected_three_edges(false, 3, Delta::Unbounded)]
#[case::undirected_three_edges_tight(false, 3, Delta::Within(1))]
fn count_matches_exhaustive_search(
    #[case] directed: bool,
    #[case] query_edges: usize,
    #[case] delta: Delta,
) {
    setup_test_logging();
    let cases = workloads(directed, query_edges);
    assert!(!cases.is_empty());
    let cfg = config(directed, delta);
    for (seed, target, query) in &cases {
        let expected = brute_force_count(query, target, delta);
        let found = TemporalMatcher::new(query, target, &cfg).unwrap().count();
        assert_eq!(found, expected, "seed {seed}\nquery:\n{query}\ntarget:\n{target}");
    }
}

#[rstest]
#[case::directed(true)]
#[case::undirected(false)]
fn enumerated_occurrences_are_valid_and_distinct(#[case] directed: bool) {
    setup_test_logging();
    let delta = Delta::Within(3);
    let cfg = config(directed, delta);
    for (seed, target, query) in workloads(directed, 3) {
        let matcher = TemporalMatcher::new(&query, &target, &cfg).unwrap();
        let all = matcher.enumerate_all();
        assert_eq!(all.len() as u64, matcher.count(), "seed {seed}");

        let mut seen: HashSet<Vec<(EdgeId, EdgeId)>> = HashSet::new();
        for occ in &all {
            assert!(
                is_valid_occurrence(&query, &target, delta, occ.node_mapping(), occ.edge_mapping()),
                "seed {seed}: invalid occurrence {:?}",
                occ.edge_mapping()
            );
            assert!(seen.insert(occ.edge_mapping().to_vec()), "seed {seed}: repeated occurrence");

            let graph = occ.graph();
            assert_eq!(graph.num_nodes(), query.num_nodes());
            assert_eq!(graph.num_edges(), query.num_edges());
            for &(_, t) in occ.edge_mapping() {
                assert!(graph.edges().contains(target.edge(t)));
            }
        }
    }
}

#[test]
fn searching_twice_gives_the_same_answer() {
    let cfg = config(true, Delta::Within(4));
    for (seed, target, query) in workloads(true, 3) {
        let matcher = TemporalMatcher::new(&query, &target, &cfg).unwrap();
        let first: Vec<_> = matcher
            .enumerate_all()
            .iter()
            .map(|o| o.edge_mapping().to_vec())
            .collect();
        let second: Vec<_> = matcher
            .enumerate_all()
            .iter()
            .map(|o| o.edge_mapping().to_vec())
            .collect();
        assert_eq!(first, second, "seed {seed}");
    }
}

#[cfg(feature = "rayon")]
#[rstest]
#[case::directed(true)]
#[case::undirected(false)]
fn parallel_search_agrees_with_sequential(#[case] directed: bool) {
    let sequential = config(directed, Delta::Unbounded);
    let parallel = Config::builder()
        .directed(directed)
        .parallel(true)
        .build();
    for (seed, target, query) in workloads(directed, 3) {
        let a = TemporalMatcher::new(&query, &target, &sequential).unwrap();
        let b = TemporalMatcher::new(&query, &target, &parallel).unwrap();
        assert_eq!(a.count(), b.count(), "seed {seed}");
        let seq: Vec<_> = a.enumerate_all().iter().map(|o| o.edge_mapping().to_vec()).collect();
        let par: Vec<_> = b
            .enumerate_parallel()
            .iter()
            .map(|o| o.edge_mapping().to_vec())
            .collect();
        assert_eq!(seq, par, "seed {seed}");
    }
}
