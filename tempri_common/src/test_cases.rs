//! Built-in scenarios with known occurrence counts.
//!
//! Each [`TestCase`] pairs a query with a target and the number of
//! occurrences the matcher must report under the given [`Config`]. The
//! matcher's integration tests iterate [`ALL_TEST_CASES`].

use crate::config::{Config, Delta};
use crate::graph::{Label, NodeId, TemporalGraph, Timestamp};

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The configuration for the search.
    pub config: Config,
    /// The query graph.
    pub query: &'static TemporalGraph,
    /// The target graph.
    pub target: &'static TemporalGraph,
    /// The expected number of occurrences.
    pub expected_matches: u64,
}

/// Build a graph from node `(id, label)` pairs and edge
/// `(source, dest, timestamp, label)` tuples.
#[must_use]
pub fn build_graph(
    directed: bool,
    nodes: &[(NodeId, Label)],
    edges: &[(NodeId, NodeId, Timestamp, Label)],
) -> TemporalGraph {
    let mut g = TemporalGraph::new(directed);
    for &(id, label) in nodes {
        g.add_node(id, label);
    }
    for &(source, dest, timestamp, label) in edges {
        g.add_edge(source, dest, timestamp, label);
    }
    g
}

fn uniform_nodes(n: NodeId) -> Vec<(NodeId, Label)> {
    (0..n).map(|id| (id, 0)).collect()
}

fn cfg(directed: bool, delta: Delta) -> Config {
    Config::builder().directed(directed).delta(delta).build()
}

// #####################
// QUERIES
// #####################
lazy_static::lazy_static! {
    /// `x -> y @1`, `y -> z @2`.
    static ref PATH_QUERY: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 1, 0), (1, 2, 2, 0)]);
    static ref UNDIRECTED_PATH_QUERY: TemporalGraph =
        build_graph(false, &uniform_nodes(3), &[(0, 1, 1, 0), (1, 2, 2, 0)]);
    static ref CYCLE_QUERY: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 0, 3, 0)]);
    static ref TRIANGLE_QUERY: TemporalGraph =
        build_graph(false, &uniform_nodes(3), &[(0, 1, 1, 0), (1, 2, 1, 0), (2, 0, 1, 0)]);
    static ref EDGE_QUERY: TemporalGraph =
        build_graph(true, &uniform_nodes(2), &[(0, 1, 5, 0)]);
    static ref UNDIRECTED_EDGE_QUERY: TemporalGraph =
        build_graph(false, &uniform_nodes(2), &[(0, 1, 5, 0)]);
    /// Same as [`EDGE_QUERY`] but the destination carries label 1.
    static ref FOREIGN_LABEL_QUERY: TemporalGraph =
        build_graph(true, &[(0, 0), (1, 1)], &[(0, 1, 5, 0)]);
    /// `x -> y @1`, `x -> z @1`.
    static ref SYNC_STAR_QUERY: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 1, 0), (0, 2, 1, 0)]);
    /// Two edges between the same pair, `@1` then `@2`.
    static ref REPEAT_QUERY: TemporalGraph =
        build_graph(true, &uniform_nodes(2), &[(0, 1, 1, 0), (0, 1, 2, 0)]);
    static ref ISOLATED_NODE_QUERY: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 1, 0)]);
}

// #####################
// TARGETS
// #####################
lazy_static::lazy_static! {
    /// `a -> b @1`, `b -> c @2`, `c -> d @10`.
    static ref PATH_TARGET: TemporalGraph =
        build_graph(true, &uniform_nodes(4), &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 3, 10, 0)]);
    static ref UNDIRECTED_PATH_TARGET: TemporalGraph =
        build_graph(false, &uniform_nodes(4), &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 3, 10, 0)]);
    static ref CYCLE_TARGET: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 0, 3, 0)]);
    static ref TRIANGLE_TARGET: TemporalGraph =
        build_graph(false, &uniform_nodes(3), &[(0, 1, 1, 0), (1, 2, 1, 0), (2, 0, 1, 0)]);
    /// Three label-0 edges and one label-1 edge on a 4-cycle.
    static ref MIXED_EDGE_TARGET: TemporalGraph = build_graph(
        true,
        &uniform_nodes(4),
        &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 3, 3, 0), (3, 0, 4, 1)],
    );
    static ref UNDIRECTED_MIXED_EDGE_TARGET: TemporalGraph = build_graph(
        false,
        &uniform_nodes(4),
        &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 3, 3, 0), (3, 0, 4, 1)],
    );
    /// `a -> b @5`, `b -> c @2`: the reverse of [`PATH_QUERY`]'s order.
    static ref REVERSED_PATH_TARGET: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 5, 0), (1, 2, 2, 0)]);
    /// `a -> b @3`, `a -> c @3`, `a -> d @4`.
    static ref STAR_TARGET: TemporalGraph =
        build_graph(true, &uniform_nodes(4), &[(0, 1, 3, 0), (0, 2, 3, 0), (0, 3, 4, 0)]);
    /// `a -> b @1`, `a -> b @3`, `b -> c @2`.
    static ref MULTI_EDGE_TARGET: TemporalGraph =
        build_graph(true, &uniform_nodes(3), &[(0, 1, 1, 0), (0, 1, 3, 0), (1, 2, 2, 0)]);
}

// #####################
// TEST CASES
// #####################
lazy_static::lazy_static! {
    pub static ref DIRECTED_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "path_unbounded",
            config: cfg(true, Delta::Unbounded),
            query: &PATH_QUERY,
            target: &PATH_TARGET,
            expected_matches: 2,
        },
        TestCase {
            name: "path_within_5",
            config: cfg(true, Delta::Within(5)),
            query: &PATH_QUERY,
            target: &PATH_TARGET,
            expected_matches: 1,
        },
        TestCase {
            name: "path_within_0",
            config: cfg(true, Delta::Within(0)),
            query: &PATH_QUERY,
            target: &PATH_TARGET,
            expected_matches: 0,
        },
        TestCase {
            name: "path_order_violated",
            config: cfg(true, Delta::Unbounded),
            query: &PATH_QUERY,
            target: &REVERSED_PATH_TARGET,
            expected_matches: 0,
        },
        TestCase {
            name: "cycle_single_rotation",
            config: cfg(true, Delta::Unbounded),
            query: &CYCLE_QUERY,
            target: &CYCLE_TARGET,
            expected_matches: 1,
        },
        TestCase {
            name: "edge_counts_label_matches",
            config: cfg(true, Delta::Unbounded),
            query: &EDGE_QUERY,
            target: &MIXED_EDGE_TARGET,
            expected_matches: 3,
        },
        TestCase {
            name: "foreign_node_label",
            config: cfg(true, Delta::Unbounded),
            query: &FOREIGN_LABEL_QUERY,
            target: &MIXED_EDGE_TARGET,
            expected_matches: 0,
        },
        TestCase {
            name: "sync_out_star",
            config: cfg(true, Delta::Unbounded),
            query: &SYNC_STAR_QUERY,
            target: &STAR_TARGET,
            expected_matches: 2,
        },
        TestCase {
            name: "repeated_pair",
            config: cfg(true, Delta::Unbounded),
            query: &REPEAT_QUERY,
            target: &MULTI_EDGE_TARGET,
            expected_matches: 1,
        },
        TestCase {
            name: "path_through_multi_edge",
            config: cfg(true, Delta::Unbounded),
            query: &PATH_QUERY,
            target: &MULTI_EDGE_TARGET,
            expected_matches: 1,
        },
        TestCase {
            name: "disconnected_query",
            config: cfg(true, Delta::Unbounded),
            query: &ISOLATED_NODE_QUERY,
            target: &PATH_TARGET,
            expected_matches: 0,
        },
    ];

    pub static ref UNDIRECTED_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "triangle_automorphisms",
            config: cfg(false, Delta::Unbounded),
            query: &TRIANGLE_QUERY,
            target: &TRIANGLE_TARGET,
            expected_matches: 6,
        },
        TestCase {
            name: "undirected_edge_both_orientations",
            config: cfg(false, Delta::Unbounded),
            query: &UNDIRECTED_EDGE_QUERY,
            target: &UNDIRECTED_MIXED_EDGE_TARGET,
            expected_matches: 6,
        },
        TestCase {
            name: "undirected_path_unbounded",
            config: cfg(false, Delta::Unbounded),
            query: &UNDIRECTED_PATH_QUERY,
            target: &UNDIRECTED_PATH_TARGET,
            expected_matches: 2,
        },
        TestCase {
            name: "undirected_path_within_5",
            config: cfg(false, Delta::Within(5)),
            query: &UNDIRECTED_PATH_QUERY,
            target: &UNDIRECTED_PATH_TARGET,
            expected_matches: 1,
        },
    ];

    pub static ref ALL_TEST_CASES: Vec<TestCase> = {
        let mut all = DIRECTED_TEST_CASES.clone();
        all.extend(UNDIRECTED_TEST_CASES.clone());
        all
    };
}
