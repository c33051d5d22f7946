use std::collections::HashMap;

use tempri_common::{Label, NodeId, TemporalGraph};

/// Dense positions `0..n` for the query's node ids, in insertion order.
///
/// Domains, the matching order and the search state are all indexed by
/// position so they can live in plain vectors.
#[derive(Clone, Debug, Default)]
pub struct QueryIndex {
    ids: Vec<NodeId>,
    labels: Vec<Label>,
    positions: HashMap<NodeId, usize>,
}

impl QueryIndex {
    #[must_use]
    pub fn build(query: &TemporalGraph) -> Self {
        let (ids, labels): (Vec<NodeId>, Vec<Label>) = query.nodes().unzip();
        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        Self {
            ids,
            labels,
            positions,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node id at `pos`.
    ///
    /// # Panics
    /// Panics if `pos >= self.len()`.
    #[must_use]
    pub fn node(&self, pos: usize) -> NodeId {
        self.ids[pos]
    }

    #[must_use]
    pub fn label(&self, pos: usize) -> Label {
        self.labels[pos]
    }

    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }
}
