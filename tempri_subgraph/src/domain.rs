//! Candidate domains: for each query node, the target nodes that could host
//! it in some occurrence.
//!
//! A target node `t` enters the domain of query node `q` iff the labels are
//! equal and `t` dominates `q` slot-wise on both the degree profile and the
//! flow profile. Query flows use an unbounded window, so they are the largest
//! counts a query node can have and the filter is as strict as it gets. It
//! stays sound because every pair of query edges lands on a target pair whose
//! timestamps lie within delta of each other.

use std::collections::HashSet;

use indexmap::IndexSet;
use tempri_common::{Delta, Label, NodeId, Profile, TemporalGraph};
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::profiling::Timer;
use crate::query_index::QueryIndex;

/// Per-position candidate sets, in target insertion order.
#[derive(Clone, Debug, Default)]
pub struct Domains {
    sets: Vec<IndexSet<NodeId>>,
}

impl Domains {
    /// Candidates of the query node at `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> &IndexSet<NodeId> {
        &self.sets[pos]
    }

    #[must_use]
    pub fn contains(&self, pos: usize, node: NodeId) -> bool {
        self.sets[pos].contains(&node)
    }

    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.sets.iter().map(IndexSet::len).collect()
    }

    /// Whether some query node has no candidate at all.
    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.sets.iter().any(IndexSet::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

struct Signature {
    label: Label,
    degree: Profile,
    flow: Profile,
}

pub struct DomainBuilder<'a> {
    query: &'a TemporalGraph,
    target: &'a TemporalGraph,
    index: &'a QueryIndex,
}

impl<'a> DomainBuilder<'a> {
    #[must_use]
    pub fn new(query: &'a TemporalGraph, target: &'a TemporalGraph, index: &'a QueryIndex) -> Self {
        Self {
            query,
            target,
            index,
        }
    }

    #[must_use]
    pub fn build(&self, delta: Delta) -> Domains {
        let _t = Timer::new("DomainBuilder::build");

        let signatures: Vec<Signature> = (0..self.index.len())
            .map(|pos| {
                let node = self.index.node(pos);
                Signature {
                    label: self.index.label(pos),
                    degree: self.query.degree(node, None),
                    flow: self.query.flow_profile(node, None, Delta::Unbounded),
                }
            })
            .collect();

        let mut degree_limits = Profile::default();
        let mut flow_limits = Profile::default();
        for sig in &signatures {
            degree_limits.merge_max(&sig.degree);
            flow_limits.merge_max(&sig.flow);
        }
        debug!(
            "profile limits: degree={:?} flow={:?}",
            degree_limits.as_slice(),
            flow_limits.as_slice()
        );

        let wanted: HashSet<Label> = signatures.iter().map(|s| s.label).collect();
        let nodes: Vec<(NodeId, Label)> = self
            .target
            .nodes()
            .filter(|(_, label)| wanted.contains(label))
            .collect();

        #[cfg(feature = "rayon")]
        let iter = nodes.par_iter();
        #[cfg(not(feature = "rayon"))]
        let iter = nodes.iter();

        let profiled: Vec<(NodeId, Label, Profile, Profile)> = iter
            .map(|&(node, label)| {
                (
                    node,
                    label,
                    self.target.degree(node, Some(&degree_limits)),
                    self.target.flow_profile(node, Some(&flow_limits), delta),
                )
            })
            .collect();

        let mut sets = vec![IndexSet::new(); signatures.len()];
        for (node, label, degree, flow) in &profiled {
            for (pos, sig) in signatures.iter().enumerate() {
                if sig.label == *label && degree.dominates(&sig.degree) && flow.dominates(&sig.flow)
                {
                    sets[pos].insert(*node);
                }
            }
        }

        let domains = Domains { sets };
        info!(
            "domains built: {} query nodes, {} of {} target nodes profiled, sizes {:?}",
            domains.len(),
            profiled.len(),
            self.target.num_nodes(),
            domains.sizes()
        );
        domains
    }
}
