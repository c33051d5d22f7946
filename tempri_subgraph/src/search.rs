//! Iterative backtracking over the edge states of a [`MatchPlan`].
//!
//! The loop keeps one candidate list per edge state. Taking the next
//! candidate of state `si` binds it; a bound last state is an occurrence and
//! is undone immediately, any other bound state computes the candidates of
//! `si + 1` and descends. An exhausted state climbs back to `si - 1` and
//! unbinds it; an exhausted state 0 moves on to the next root.

use tempri_common::{Delta, NodeId, TemporalGraph};
use tracing::{debug, trace};

use crate::control::{SearchControl, SearchSummary};
use crate::matcher::MatchPlan;
use crate::occurrence::{Occurrence, OccurrenceSink};
use crate::profiling::Timer;
use crate::state::SearchContext;

pub(crate) struct Search<'a> {
    pub(crate) query: &'a TemporalGraph,
    pub(crate) target: &'a TemporalGraph,
    pub(crate) plan: &'a MatchPlan,
    pub(crate) delta: Delta,
    pub(crate) control: &'a SearchControl,
}

impl Search<'_> {
    /// Explore every occurrence whose node state 0 is one of `roots`.
    pub(crate) fn run(
        &self,
        roots: &[NodeId],
        mut sink: Option<&mut dyn OccurrenceSink>,
    ) -> SearchSummary {
        let _t = Timer::new("Search::run");
        let order = &self.plan.order;
        let last = order.num_edge_states() - 1;
        let mut ctx = SearchContext::new(order.num_node_states(), order.num_edge_states());
        let mut summary = SearchSummary::default();
        let mut next_root = 0;

        if !self.load_root(&mut ctx, roots, &mut next_root, &mut summary) {
            return summary;
        }

        let mut si = 0;
        let mut steps: u64 = 0;
        loop {
            steps += 1;
            if steps % SearchControl::CHECK_INTERVAL == 0 && self.control.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let Some(candidate) = ctx.next_candidate(si) else {
                if si == 0 {
                    if !self.load_root(&mut ctx, roots, &mut next_root, &mut summary) {
                        break;
                    }
                } else {
                    si -= 1;
                    ctx.unbind(si, order.edge(si));
                }
                continue;
            };

            let timestamp = self.target.edge(candidate.edge()).timestamp;
            ctx.bind(si, order.edge(si), candidate, timestamp);

            if si == last {
                summary.occurrences += 1;
                self.control.progress().inc_occurrences(1);
                trace!("occurrence #{} found", summary.occurrences);
                if let Some(sink) = sink.as_mut() {
                    sink.on_occurrence(self.materialize(&ctx));
                }
                ctx.unbind(si, order.edge(si));
            } else {
                let next = self.extension_candidates(&ctx, si + 1);
                ctx.load(si + 1, next);
                si += 1;
            }
        }
        summary
    }

    /// Advance `next_root` to the first remaining root with start candidates
    /// and load them into state 0. Returns `false` when the roots are
    /// exhausted or the search was cancelled.
    fn load_root(
        &self,
        ctx: &mut SearchContext,
        roots: &[NodeId],
        next_root: &mut usize,
        summary: &mut SearchSummary,
    ) -> bool {
        while let Some(&root) = roots.get(*next_root) {
            if self.control.is_cancelled() {
                summary.cancelled = true;
                return false;
            }
            *next_root += 1;
            self.control.progress().inc_scanned_roots(1);

            let candidates = self.start_candidates(root);
            debug!("root {root}: {} start candidates", candidates.len());
            if !candidates.is_empty() {
                ctx.load(0, candidates);
                return true;
            }
        }
        false
    }

    /// Build the [`Occurrence`] for the complete mapping in `ctx`.
    fn materialize(&self, ctx: &SearchContext) -> Occurrence {
        let order = &self.plan.order;
        let index = &self.plan.index;

        let mut nodes: Vec<(usize, NodeId, NodeId)> = (0..order.num_node_states())
            .filter_map(|state| {
                let pos = order.node_at(state);
                ctx.node(state).map(|t| (pos, index.node(pos), t))
            })
            .collect();
        nodes.sort_unstable_by_key(|&(pos, _, _)| pos);

        let mut graph = TemporalGraph::new(self.target.is_directed());
        for &(_, _, t) in &nodes {
            if let Some(label) = self.target.node_label(t) {
                graph.add_node(t, label);
            }
        }

        let mut edges: Vec<(usize, usize)> = order
            .edges()
            .iter()
            .enumerate()
            .filter_map(|(state, ordered)| ctx.edge(state).map(|t| (ordered.edge, t)))
            .collect();
        edges.sort_unstable();
        for &(_, t) in &edges {
            let e = self.target.edge(t);
            graph.add_edge(e.source, e.dest, e.timestamp, e.label);
        }

        Occurrence::new(
            nodes.into_iter().map(|(_, q, t)| (q, t)).collect(),
            edges,
            graph,
        )
    }
}
