use tempri_common::{EdgeId, NodeId, TemporalGraph};

/// One occurrence of the query in the target.
#[derive(Clone, Debug)]
pub struct Occurrence {
    /// `(query node, target node)`, in query node insertion order.
    nodes: Vec<(NodeId, NodeId)>,
    /// `(query edge, target edge)`, sorted by query edge id.
    edges: Vec<(EdgeId, EdgeId)>,
    /// The matched target nodes and edges as a standalone graph.
    graph: TemporalGraph,
}

impl Occurrence {
    pub(crate) fn new(
        nodes: Vec<(NodeId, NodeId)>,
        edges: Vec<(EdgeId, EdgeId)>,
        graph: TemporalGraph,
    ) -> Self {
        Self {
            nodes,
            edges,
            graph,
        }
    }

    #[must_use]
    pub fn node_mapping(&self) -> &[(NodeId, NodeId)] {
        &self.nodes
    }

    #[must_use]
    pub fn edge_mapping(&self) -> &[(EdgeId, EdgeId)] {
        &self.edges
    }

    #[must_use]
    pub fn graph(&self) -> &TemporalGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> TemporalGraph {
        self.graph
    }

    /// The target node hosting `query_node`.
    #[must_use]
    pub fn target_node(&self, query_node: NodeId) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(q, _)| *q == query_node)
            .map(|&(_, t)| t)
    }

    /// The target edge hosting `query_edge`.
    #[must_use]
    pub fn target_edge(&self, query_edge: EdgeId) -> Option<EdgeId> {
        self.edges
            .binary_search_by_key(&query_edge, |&(q, _)| q)
            .ok()
            .map(|i| self.edges[i].1)
    }
}

/// Receives occurrences as the search finds them.
pub trait OccurrenceSink {
    fn on_occurrence(&mut self, occurrence: Occurrence);
}

impl<F> OccurrenceSink for F
where
    F: FnMut(Occurrence),
{
    fn on_occurrence(&mut self, occurrence: Occurrence) {
        self(occurrence);
    }
}

/// All occurrences of a search, in discovery order.
#[derive(Clone, Debug, Default)]
pub struct OccurrenceSet {
    pub items: Vec<Occurrence>,
}

impl OccurrenceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.items.iter()
    }
}

impl OccurrenceSink for OccurrenceSet {
    fn on_occurrence(&mut self, occurrence: Occurrence) {
        self.items.push(occurrence);
    }
}

impl IntoIterator for OccurrenceSet {
    type Item = Occurrence;
    type IntoIter = std::vec::IntoIter<Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a OccurrenceSet {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Occurrence> for OccurrenceSet {
    fn from_iter<I: IntoIterator<Item = Occurrence>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
