//! Random extraction of connected query graphs from a target.
//!
//! Used offline to generate benchmark queries: the extracted structure comes
//! from the target, the timestamps are freshly drawn from `1..=num_edges`.

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use tracing::debug;

use crate::graph::{EdgeDirection, EdgeId, Label, NodeId, TemporalGraph, Timestamp};

/// Grow a connected subgraph of `num_edges` edges from a random start node.
///
/// Each step picks uniformly among the target edges that touch a node already
/// in the subgraph and were not picked before. Returns `None` when the
/// component of the start node runs out of edges first.
///
/// Node and edge labels are kept; timestamps are redrawn so that no
/// `(source, dest, timestamp)` triple repeats.
#[must_use]
pub fn extract_random_subgraph(
    graph: &TemporalGraph,
    num_edges: usize,
    seed: u64,
) -> Option<TemporalGraph> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let all_nodes: Vec<(NodeId, Label)> = graph.nodes().collect();
    if num_edges == 0 || all_nodes.is_empty() {
        return None;
    }

    let (start, start_label) = all_nodes[rng.gen_range(0..all_nodes.len())];
    let mut nodes: IndexMap<NodeId, Label> = IndexMap::new();
    nodes.insert(start, start_label);
    let mut picked: Vec<(NodeId, NodeId, EdgeId)> = Vec::with_capacity(num_edges);
    let mut taken: HashSet<EdgeId> = HashSet::new();

    while picked.len() < num_edges {
        let candidates = incident_edges(graph, &nodes, &taken);
        if candidates.is_empty() {
            debug!(
                "sampling from node {start} stalled after {} of {num_edges} edges",
                picked.len()
            );
            return None;
        }
        let (&edge, &(source, dest)) = candidates.get_index(rng.gen_range(0..candidates.len()))?;
        for endpoint in [source, dest] {
            if let Some(label) = graph.node_label(endpoint) {
                nodes.entry(endpoint).or_insert(label);
            }
        }
        taken.insert(edge);
        picked.push((source, dest, edge));
    }

    let upper = Timestamp::try_from(num_edges).ok()?;
    let mut used: HashSet<(NodeId, NodeId, Timestamp)> = HashSet::new();
    let mut subgraph = TemporalGraph::new(graph.is_directed());
    for (&id, &label) in &nodes {
        subgraph.add_node(id, label);
    }
    for &(source, dest, edge) in &picked {
        let key = if graph.is_directed() || source < dest {
            (source, dest)
        } else {
            (dest, source)
        };
        let timestamp = loop {
            let t = rng.gen_range(1..=upper);
            if used.insert((key.0, key.1, t)) {
                break t;
            }
        };
        subgraph.add_edge(source, dest, timestamp, graph.edge(edge).label);
    }
    Some(subgraph)
}

/// Unpicked edges touching the current node set, oriented as stored.
fn incident_edges(
    graph: &TemporalGraph,
    nodes: &IndexMap<NodeId, Label>,
    taken: &HashSet<EdgeId>,
) -> IndexMap<EdgeId, (NodeId, NodeId)> {
    let mut candidates = IndexMap::new();
    for &node in nodes.keys() {
        for direction in EdgeDirection::ALL {
            let Some(index) = graph.adjacency(node, direction) else {
                continue;
            };
            for neighbours in index.values() {
                for (&nbr, &edge) in neighbours {
                    if taken.contains(&edge) {
                        continue;
                    }
                    let oriented = match direction {
                        EdgeDirection::In => (nbr, node),
                        EdgeDirection::Out | EdgeDirection::Recip => (node, nbr),
                    };
                    candidates.entry(edge).or_insert(oriented);
                }
            }
        }
    }
    candidates
}
