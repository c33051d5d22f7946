//! Exhaustive reference counter and random graph generation.

use std::cmp::Ordering;
use std::collections::HashSet;

use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use tempri_common::{Delta, EdgeId, NodeId, TemporalEdge, TemporalGraph, Timestamp};

/// Count occurrences by trying every injective node mapping and every
/// injective edge assignment under it.
pub fn brute_force_count(query: &TemporalGraph, target: &TemporalGraph, delta: Delta) -> u64 {
    let q_nodes: Vec<NodeId> = query.nodes().map(|(id, _)| id).collect();
    let t_nodes: Vec<NodeId> = target.nodes().map(|(id, _)| id).collect();
    let mut mapping: Vec<(NodeId, NodeId)> = Vec::with_capacity(q_nodes.len());
    let mut total = 0;
    map_nodes(query, target, delta, &q_nodes, &t_nodes, &mut mapping, &mut total);
    total
}

fn map_nodes(
    query: &TemporalGraph,
    target: &TemporalGraph,
    delta: Delta,
    q_nodes: &[NodeId],
    t_nodes: &[NodeId],
    mapping: &mut Vec<(NodeId, NodeId)>,
    total: &mut u64,
) {
    let Some(&q) = q_nodes.get(mapping.len()) else {
        let mut chosen = Vec::with_capacity(query.num_edges());
        *total += map_edges(query, target, delta, mapping, &mut chosen);
        return;
    };
    for &t in t_nodes {
        if target.node_label(t) != query.node_label(q) || mapping.iter().any(|&(_, u)| u == t) {
            continue;
        }
        mapping.push((q, t));
        map_nodes(query, target, delta, q_nodes, t_nodes, mapping, total);
        mapping.pop();
    }
}

fn image(mapping: &[(NodeId, NodeId)], q: NodeId) -> NodeId {
    mapping
        .iter()
        .find(|&&(from, _)| from == q)
        .map(|&(_, to)| to)
        .unwrap()
}

fn hosts(directed: bool, q: (NodeId, NodeId), t: &TemporalEdge) -> bool {
    if directed {
        (t.source, t.dest) == q
    } else {
        (t.source, t.dest) == q || (t.dest, t.source) == q
    }
}

fn map_edges(
    query: &TemporalGraph,
    target: &TemporalGraph,
    delta: Delta,
    mapping: &[(NodeId, NodeId)],
    chosen: &mut Vec<EdgeId>,
) -> u64 {
    let Some(qe) = query.edges().get(chosen.len()) else {
        return u64::from(is_temporal_match(query, target, delta, chosen));
    };
    let ends = (image(mapping, qe.source), image(mapping, qe.dest));
    let mut found = 0;
    for (id, te) in target.edges().iter().enumerate() {
        if te.label != qe.label || chosen.contains(&id) || !hosts(query.is_directed(), ends, te) {
            continue;
        }
        chosen.push(id);
        found += map_edges(query, target, delta, mapping, chosen);
        chosen.pop();
    }
    found
}

fn is_temporal_match(
    query: &TemporalGraph,
    target: &TemporalGraph,
    delta: Delta,
    chosen: &[EdgeId],
) -> bool {
    let q: Vec<Timestamp> = query.edges().iter().map(|e| e.timestamp).collect();
    let t: Vec<Timestamp> = chosen.iter().map(|&id| target.edge(id).timestamp).collect();
    for i in 0..q.len() {
        for j in i + 1..q.len() {
            if q[i].cmp(&q[j]) != t[i].cmp(&t[j]) {
                return false;
            }
        }
    }
    let (Some(min), Some(max)) = (t.iter().min(), t.iter().max()) else {
        return false;
    };
    delta.admits(max - min)
}

/// A random graph without self-loops or repeated `(source, dest, timestamp)`
/// triples, so every edge is reachable through the adjacency indices.
pub fn random_target(
    seed: u64,
    directed: bool,
    nodes: NodeId,
    edges: usize,
    max_time: Timestamp,
    labels: u32,
) -> TemporalGraph {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let mut g = TemporalGraph::new(directed);
    for id in 0..nodes {
        g.add_node(id, rng.gen_range(0..labels));
    }
    let mut used: HashSet<(NodeId, NodeId, Timestamp)> = HashSet::new();
    let mut attempts = 0;
    while g.num_edges() < edges && attempts < edges * 20 {
        attempts += 1;
        let source = rng.gen_range(0..nodes);
        let dest = rng.gen_range(0..nodes);
        if source == dest {
            continue;
        }
        let timestamp = rng.gen_range(1..=max_time);
        let key = if directed || source < dest {
            (source, dest, timestamp)
        } else {
            (dest, source, timestamp)
        };
        if used.insert(key) {
            g.add_edge(source, dest, timestamp, rng.gen_range(0..labels));
        }
    }
    g
}

/// Whether the matcher's occurrence respects every constraint the oracle
/// checks.
pub fn is_valid_occurrence(
    query: &TemporalGraph,
    target: &TemporalGraph,
    delta: Delta,
    nodes: &[(NodeId, NodeId)],
    edges: &[(EdgeId, EdgeId)],
) -> bool {
    let images: HashSet<NodeId> = nodes.iter().map(|&(_, t)| t).collect();
    if images.len() != nodes.len() || nodes.len() != query.num_nodes() {
        return false;
    }
    if nodes
        .iter()
        .any(|&(q, t)| query.node_label(q) != target.node_label(t))
    {
        return false;
    }
    let mut chosen = vec![usize::MAX; query.num_edges()];
    for &(q, t) in edges {
        chosen[q] = t;
    }
    if chosen.iter().collect::<HashSet<_>>().len() != chosen.len() || chosen.contains(&usize::MAX) {
        return false;
    }
    let endpoints_ok = query.edges().iter().zip(&chosen).all(|(qe, &t)| {
        let te = target.edge(t);
        te.label == qe.label
            && hosts(
                query.is_directed(),
                (image(nodes, qe.source), image(nodes, qe.dest)),
                te,
            )
    });
    endpoints_ok && is_temporal_match(query, target, delta, &chosen)
}

#[cfg(test)]
mod tests {
    use tempri_common::build_graph;

    use super::*;

    #[test]
    fn oracle_agrees_with_hand_counts() {
        let query = build_graph(true, &[(0, 0), (1, 0), (2, 0)], &[(0, 1, 1, 0), (1, 2, 2, 0)]);
        let target = build_graph(
            true,
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
            &[(0, 1, 1, 0), (1, 2, 2, 0), (2, 3, 10, 0)],
        );
        assert_eq!(brute_force_count(&query, &target, Delta::Unbounded), 2);
        assert_eq!(brute_force_count(&query, &target, Delta::Within(5)), 1);
        assert_eq!(brute_force_count(&query, &target, Delta::Within(-1)), 0);
    }

    #[test]
    fn random_targets_have_no_shadowed_edges() {
        for seed in 0..8 {
            let g = random_target(seed, seed % 2 == 0, 6, 14, 5, 2);
            assert!(g.shadowed_edges().is_empty());
            assert!(g.edges().iter().all(|e| e.source != e.dest));
        }
    }
}
