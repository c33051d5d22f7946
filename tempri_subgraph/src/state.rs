//! Mutable state of one backtracking search.

use std::collections::{BTreeMap, HashSet};

use tempri_common::{EdgeId, NodeId, Timestamp};

use crate::candidates::Candidate;
use crate::order::OrderedEdge;

/// Multiset of the timestamps currently mapped, for O(log n) span queries.
#[derive(Clone, Debug, Default)]
pub(crate) struct TimeMultiset {
    counts: BTreeMap<Timestamp, usize>,
    len: usize,
}

impl TimeMultiset {
    pub(crate) fn insert(&mut self, t: Timestamp) {
        *self.counts.entry(t).or_insert(0) += 1;
        self.len += 1;
    }

    /// Remove one copy of `t`; returns whether it was present.
    pub(crate) fn remove(&mut self, t: Timestamp) -> bool {
        let Some(count) = self.counts.get_mut(&t) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&t);
        }
        self.len -= 1;
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// `(min, max)` of the stored timestamps.
    pub(crate) fn span(&self) -> Option<(Timestamp, Timestamp)> {
        let min = *self.counts.keys().next()?;
        let max = *self.counts.keys().next_back()?;
        Some((min, max))
    }
}

/// Partial mapping of query nodes and edges onto the target, plus the
/// candidate lists and cursors of every edge state on the current path.
#[derive(Debug)]
pub(crate) struct SearchContext {
    nodes: Vec<Option<NodeId>>,
    edges: Vec<Option<EdgeId>>,
    mapped_times: Vec<Timestamp>,
    active: Vec<Option<Candidate>>,
    matched_nodes: HashSet<NodeId>,
    matched_edges: HashSet<EdgeId>,
    times: TimeMultiset,
    candidates: Vec<Vec<Candidate>>,
    cursors: Vec<usize>,
}

impl SearchContext {
    #[contracts::debug_ensures(ret.matched_edges.is_empty())]
    #[contracts::debug_ensures(ret.matched_nodes.is_empty())]
    pub(crate) fn new(num_node_states: usize, num_edge_states: usize) -> Self {
        Self {
            nodes: vec![None; num_node_states],
            edges: vec![None; num_edge_states],
            mapped_times: vec![0; num_edge_states],
            active: vec![None; num_edge_states],
            matched_nodes: HashSet::new(),
            matched_edges: HashSet::new(),
            times: TimeMultiset::default(),
            candidates: vec![Vec::new(); num_edge_states],
            cursors: vec![0; num_edge_states],
        }
    }

    pub(crate) fn load(&mut self, state: usize, candidates: Vec<Candidate>) {
        self.candidates[state] = candidates;
        self.cursors[state] = 0;
    }

    pub(crate) fn next_candidate(&mut self, state: usize) -> Option<Candidate> {
        let candidate = self.candidates[state].get(self.cursors[state]).copied()?;
        self.cursors[state] += 1;
        Some(candidate)
    }

    /// Map edge state `state` (and the node states it introduces) using
    /// `candidate`.
    #[contracts::debug_requires(self.edges[state].is_none())]
    #[contracts::debug_requires(self.matched_edges.len() == self.times.len())]
    #[contracts::debug_ensures(self.matched_edges.len() == self.times.len())]
    #[contracts::debug_ensures(self.edges[state].is_some())]
    pub(crate) fn bind(
        &mut self,
        state: usize,
        ordered: &OrderedEdge,
        candidate: Candidate,
        timestamp: Timestamp,
    ) {
        match candidate {
            Candidate::Start { root, far, .. } => {
                self.bind_node(ordered.dest_state, root);
                self.bind_node(ordered.source_state, far);
            }
            Candidate::Extend { node, .. } => self.bind_node(ordered.source_state, node),
            Candidate::Close { .. } => {}
        }
        let edge = candidate.edge();
        self.edges[state] = Some(edge);
        self.matched_edges.insert(edge);
        self.mapped_times[state] = timestamp;
        self.times.insert(timestamp);
        self.active[state] = Some(candidate);
    }

    /// Undo [`SearchContext::bind`] for `state`.
    #[contracts::debug_requires(self.edges[state].is_some())]
    #[contracts::debug_requires(self.matched_edges.len() == self.times.len())]
    #[contracts::debug_ensures(self.matched_edges.len() == self.times.len())]
    #[contracts::debug_ensures(self.edges[state].is_none())]
    pub(crate) fn unbind(&mut self, state: usize, ordered: &OrderedEdge) {
        let Some(candidate) = self.active[state].take() else {
            return;
        };
        match candidate {
            Candidate::Start { .. } => {
                self.unbind_node(ordered.source_state);
                self.unbind_node(ordered.dest_state);
            }
            Candidate::Extend { .. } => self.unbind_node(ordered.source_state),
            Candidate::Close { .. } => {}
        }
        if let Some(edge) = self.edges[state].take() {
            self.matched_edges.remove(&edge);
        }
        self.times.remove(self.mapped_times[state]);
    }

    fn bind_node(&mut self, node_state: usize, node: NodeId) {
        self.nodes[node_state] = Some(node);
        self.matched_nodes.insert(node);
    }

    fn unbind_node(&mut self, node_state: usize) {
        if let Some(node) = self.nodes[node_state].take() {
            self.matched_nodes.remove(&node);
        }
    }

    pub(crate) fn node(&self, node_state: usize) -> Option<NodeId> {
        self.nodes[node_state]
    }

    pub(crate) fn edge(&self, state: usize) -> Option<EdgeId> {
        self.edges[state]
    }

    /// Timestamp mapped at a bound edge state.
    #[contracts::debug_requires(self.edges[state].is_some())]
    pub(crate) fn mapped_time(&self, state: usize) -> Timestamp {
        self.mapped_times[state]
    }

    pub(crate) fn time_span(&self) -> Option<(Timestamp, Timestamp)> {
        self.times.span()
    }

    pub(crate) fn is_node_matched(&self, node: NodeId) -> bool {
        self.matched_nodes.contains(&node)
    }

    pub(crate) fn is_edge_matched(&self, edge: EdgeId) -> bool {
        self.matched_edges.contains(&edge)
    }

    pub(crate) fn num_matched_nodes(&self) -> usize {
        self.matched_nodes.len()
    }
}
