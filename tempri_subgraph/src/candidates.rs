//! Candidate generation for edge states.
//!
//! Every lookup starts from the target node mapped to the edge state's
//! destination and walks its adjacency in the direction that reaches the
//! source, restricted to the time window allowed by the bound table and Δ.

use std::ops::Bound;

use tempri_common::{EdgeId, NodeId, TimeWindow};

use crate::search::Search;
use crate::state::SearchContext;

/// One way to extend the current partial occurrence by a single edge state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Candidate {
    /// First edge state: binds the root and the node at the far end.
    Start {
        edge: EdgeId,
        root: NodeId,
        far: NodeId,
    },
    /// Binds the edge and the so-far unmapped source node.
    Extend { edge: EdgeId, node: NodeId },
    /// Both endpoints are mapped already; binds only the edge.
    Close { edge: EdgeId },
}

impl Candidate {
    pub(crate) fn edge(&self) -> EdgeId {
        match *self {
            Candidate::Start { edge, .. } | Candidate::Extend { edge, .. } | Candidate::Close { edge } => {
                edge
            }
        }
    }
}

impl Search<'_> {
    /// Candidates for edge state 0 with `root` at node state 0.
    pub(crate) fn start_candidates(&self, root: NodeId) -> Vec<Candidate> {
        let order = &self.plan.order;
        let first = order.edge(0);
        let far_pos = order.node_at(first.source_state);
        let label = self.query.edge(first.edge).label;

        let Some(index) = self.target.adjacency(root, first.direction.reversed()) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for neighbours in index.values() {
            for (&far, &edge) in neighbours {
                if far != root
                    && self.plan.domains.contains(far_pos, far)
                    && self.target.edge(edge).label == label
                {
                    out.push(Candidate::Start { edge, root, far });
                }
            }
        }
        out
    }

    /// Candidates for edge state `state > 0` given the bindings in `ctx`.
    pub(crate) fn extension_candidates(&self, ctx: &SearchContext, state: usize) -> Vec<Candidate> {
        let ordered = self.plan.order.edge(state);
        let label = self.query.edge(ordered.edge).label;
        let Some(dest) = ctx.node(ordered.dest_state) else {
            return Vec::new();
        };
        let Some(index) = self.target.adjacency(dest, ordered.direction.reversed()) else {
            return Vec::new();
        };
        let window = self.window(ctx, state);

        match ctx.node(ordered.source_state) {
            Some(source) => window
                .slice(index)
                .filter_map(|(_, neighbours)| neighbours.get(&source).copied())
                .filter(|&edge| !ctx.is_edge_matched(edge) && self.target.edge(edge).label == label)
                .map(|edge| Candidate::Close { edge })
                .collect(),
            None => {
                let source_pos = self.plan.order.node_at(ordered.source_state);
                let mut out = Vec::new();
                for (_, neighbours) in window.slice(index) {
                    for (&node, &edge) in neighbours {
                        if !ctx.is_node_matched(node)
                            && self.plan.domains.contains(source_pos, node)
                            && !ctx.is_edge_matched(edge)
                            && self.target.edge(edge).label == label
                        {
                            out.push(Candidate::Extend { edge, node });
                        }
                    }
                }
                out
            }
        }
    }

    /// Timestamps edge state `state` may take: between the mapped times of
    /// its bounding states, and never stretching the span past Δ.
    fn window(&self, ctx: &SearchContext, state: usize) -> TimeWindow {
        let Some((min, max)) = ctx.time_span() else {
            return TimeWindow::all();
        };
        let slack = self.delta.slack(min, max);
        let earliest = slack.map_or(Bound::Unbounded, |s| Bound::Included(min.saturating_sub(s)));
        let latest = slack.map_or(Bound::Unbounded, |s| Bound::Included(max.saturating_add(s)));

        let bound = self.plan.bounds.get(state);
        match (bound.lower, bound.upper) {
            (Some(l), Some(u)) if l == u => TimeWindow::exactly(ctx.mapped_time(l)),
            (Some(l), Some(u)) => TimeWindow::strictly_between(ctx.mapped_time(l), ctx.mapped_time(u)),
            (None, Some(u)) => TimeWindow::new(earliest, Bound::Excluded(ctx.mapped_time(u))),
            (Some(l), None) => TimeWindow::new(Bound::Excluded(ctx.mapped_time(l)), latest),
            (None, None) => TimeWindow::new(earliest, latest),
        }
    }
}
