use indexmap::IndexSet;
use tempri_common::{Config, Delta, NodeId, TemporalGraph};
use tracing::{info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::bounds::TimeBoundTable;
use crate::control::{SearchControl, SearchSummary};
use crate::domain::{DomainBuilder, Domains};
use crate::error::MatchError;
use crate::occurrence::{OccurrenceSet, OccurrenceSink};
use crate::order::MatchingOrder;
use crate::query_index::QueryIndex;
use crate::search::Search;

/// Everything computed once per (query, target, Δ) before the search starts.
#[derive(Clone, Debug)]
pub struct MatchPlan {
    pub(crate) index: QueryIndex,
    pub(crate) domains: Domains,
    pub(crate) order: MatchingOrder,
    pub(crate) bounds: TimeBoundTable,
}

impl MatchPlan {
    /// Plan a search, or `None` when the query cannot have occurrences
    /// because it has no edges or is disconnected.
    #[must_use]
    pub fn build(query: &TemporalGraph, target: &TemporalGraph, delta: Delta) -> Option<Self> {
        if query.num_edges() == 0 {
            warn!("query has no edges; nothing to match");
            return None;
        }
        let index = QueryIndex::build(query);
        let domains = DomainBuilder::new(query, target, &index).build(delta);
        let order = MatchingOrder::build(query, &index, &domains.sizes())?;
        let bounds = TimeBoundTable::build(query, &order);
        Some(Self {
            index,
            domains,
            order,
            bounds,
        })
    }

    #[must_use]
    pub fn query_index(&self) -> &QueryIndex {
        &self.index
    }

    #[must_use]
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    #[must_use]
    pub fn order(&self) -> &MatchingOrder {
        &self.order
    }

    #[must_use]
    pub fn bounds(&self) -> &TimeBoundTable {
        &self.bounds
    }

    /// Target candidates for node state 0.
    #[must_use]
    pub fn roots(&self) -> &IndexSet<NodeId> {
        self.domains.get(self.order.node_at(0))
    }
}

/// Counts and enumerates the temporal occurrences of `query` in `target`.
///
/// An occurrence maps query nodes injectively to target nodes with the same
/// labels and query edges injectively to target edges with the same labels
/// and endpoints, such that query timestamps that are equal map to equal
/// target timestamps, query timestamps that are ordered map to target
/// timestamps ordered the same way, and the mapped timestamps span at most Δ.
pub struct TemporalMatcher<'q, 't, 'cfg> {
    query: &'q TemporalGraph,
    target: &'t TemporalGraph,
    config: &'cfg Config,
    plan: Option<MatchPlan>,
    control: SearchControl,
}

impl<'q, 't, 'cfg> TemporalMatcher<'q, 't, 'cfg> {
    /// Validate the inputs and build the [`MatchPlan`].
    ///
    /// # Errors
    /// Returns [`MatchError`] when query, target and configuration disagree
    /// on directedness.
    pub fn new(
        query: &'q TemporalGraph,
        target: &'t TemporalGraph,
        config: &'cfg Config,
    ) -> Result<Self, MatchError> {
        if query.is_directed() != target.is_directed() {
            return Err(MatchError::DirectednessMismatch {
                query: query.is_directed(),
                target: target.is_directed(),
            });
        }
        if config.directed != query.is_directed() {
            return Err(MatchError::ConfigDirectedness {
                config: config.directed,
                graphs: query.is_directed(),
            });
        }

        info!(
            "planning temporal search: query {} nodes / {} edges, target {} nodes / {} edges, delta={}",
            query.num_nodes(),
            query.num_edges(),
            target.num_nodes(),
            target.num_edges(),
            config.delta
        );
        let plan = match config.delta {
            Delta::Within(v) if v < 0 => {
                warn!("negative delta {v} admits no occurrence");
                None
            }
            delta => MatchPlan::build(query, target, delta),
        };

        Ok(Self {
            query,
            target,
            config,
            plan,
            control: SearchControl::default(),
        })
    }

    /// Attach a control handle for cancellation and progress reporting.
    #[must_use]
    pub fn with_control(mut self, control: SearchControl) -> Self {
        self.control = control;
        self
    }

    #[must_use]
    pub fn plan(&self) -> Option<&MatchPlan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    fn searcher<'s>(&'s self, plan: &'s MatchPlan) -> Search<'s> {
        Search {
            query: self.query,
            target: self.target,
            plan,
            delta: self.config.delta,
            control: &self.control,
        }
    }

    /// Root candidates, or `None` when the search can be skipped entirely.
    fn runnable_plan(&self) -> Option<(&MatchPlan, Vec<NodeId>)> {
        let plan = self.plan.as_ref()?;
        if plan.domains.any_empty() {
            info!("a query node has an empty domain; no occurrences");
            return None;
        }
        let roots: Vec<NodeId> = plan.roots().iter().copied().collect();
        self.control.progress().add_total_roots(roots.len() as u64);
        Some((plan, roots))
    }

    /// Run the search sequentially, feeding each occurrence to `sink` if given.
    pub fn search(&self, sink: Option<&mut dyn OccurrenceSink>) -> SearchSummary {
        let Some((plan, roots)) = self.runnable_plan() else {
            return SearchSummary::default();
        };
        let summary = self.searcher(plan).run(&roots, sink);
        info!(
            "search complete: {} occurrences{}",
            summary.occurrences,
            if summary.cancelled { " (cancelled)" } else { "" }
        );
        summary
    }

    /// Number of occurrences. Honors `config.parallel` when the `rayon`
    /// feature is enabled.
    #[must_use]
    pub fn count(&self) -> u64 {
        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return self.count_parallel();
        }
        self.search(None).occurrences
    }

    /// Stream every occurrence into `sink`; returns how many were found.
    pub fn enumerate_with<S: OccurrenceSink>(&self, sink: &mut S) -> u64 {
        self.search(Some(sink as &mut dyn OccurrenceSink)).occurrences
    }

    #[must_use]
    pub fn enumerate_all(&self) -> OccurrenceSet {
        let mut set = OccurrenceSet::new();
        self.enumerate_with(&mut set);
        set
    }

    /// Like [`TemporalMatcher::count`], splitting the search by root candidate.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn count_parallel(&self) -> u64 {
        let Some((plan, roots)) = self.runnable_plan() else {
            return 0;
        };
        let search = self.searcher(plan);
        let summary = roots
            .par_iter()
            .map(|&root| search.run(&[root], None))
            .reduce(SearchSummary::default, SearchSummary::merge);
        info!("parallel search complete: {} occurrences", summary.occurrences);
        summary.occurrences
    }

    /// Like [`TemporalMatcher::enumerate_all`], splitting the search by root
    /// candidate. Occurrences keep the sequential discovery order.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn enumerate_parallel(&self) -> OccurrenceSet {
        let Some((plan, roots)) = self.runnable_plan() else {
            return OccurrenceSet::new();
        };
        let search = self.searcher(plan);
        roots
            .par_iter()
            .map(|&root| {
                let mut local = OccurrenceSet::new();
                search.run(&[root], Some(&mut local as &mut dyn OccurrenceSink));
                local.items
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Count occurrences of `query` in `target` under `config`.
///
/// # Errors
/// Returns [`MatchError`] when the inputs disagree on directedness.
pub fn count_occurrences(
    query: &TemporalGraph,
    target: &TemporalGraph,
    config: &Config,
) -> Result<u64, MatchError> {
    Ok(TemporalMatcher::new(query, target, config)?.count())
}
