//! Labeled temporal multigraph with time-indexed adjacency.
//!
//! Edges live in a dense arena (`edge id == insertion index`). Each node owns
//! up to three adjacency indices (`out`/`in` for directed graphs, `recip` for
//! undirected ones) mapping a timestamp to the neighbours reached at that
//! timestamp and the edge id used to reach them. The middle level is ordered
//! by timestamp so candidate searches can be restricted to a time window.

mod profile;
mod window;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;

pub use profile::{
    DEGREE_SLOTS, DIRECTED_FLOW_SLOTS, DirectedFlow, Profile, UNDIRECTED_FLOW_SLOTS,
    UndirectedFlow,
};
pub use window::TimeWindow;

/// Identifier of a node, as read from the input file.
pub type NodeId = u32;
/// Dense identifier of an edge (its insertion index).
pub type EdgeId = usize;
/// Interned node or edge label.
pub type Label = u32;
/// Edge timestamp.
pub type Timestamp = i64;

/// Neighbours reached at one timestamp, mapped to the edge that reaches them.
pub type Neighbours = IndexMap<NodeId, EdgeId>;
/// Timestamp-ordered adjacency of a single node.
pub type TimeIndex = BTreeMap<Timestamp, Neighbours>;

/// Direction of an adjacency index relative to the node that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeDirection {
    /// Edges leaving the node.
    Out,
    /// Edges entering the node.
    In,
    /// Undirected edges.
    Recip,
}

impl EdgeDirection {
    /// All three adjacency directions, in canonical order.
    pub const ALL: [EdgeDirection; 3] = [EdgeDirection::Out, EdgeDirection::In, EdgeDirection::Recip];

    /// The index to consult on the *other* endpoint of an edge seen in `self`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            EdgeDirection::Out => EdgeDirection::In,
            EdgeDirection::In => EdgeDirection::Out,
            EdgeDirection::Recip => EdgeDirection::Recip,
        }
    }
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EdgeDirection::Out => "OUT",
            EdgeDirection::In => "IN",
            EdgeDirection::Recip => "RECIP",
        };
        f.write_str(s)
    }
}

/// One entry of the edge arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TemporalEdge {
    /// Tail node; for undirected graphs the endpoint given first.
    pub source: NodeId,
    /// Head node.
    pub dest: NodeId,
    /// Time at which the interaction happened.
    pub timestamp: Timestamp,
    /// Interned edge label.
    pub label: Label,
}

/// A directed or undirected labeled temporal multigraph.
#[derive(Clone, Debug, Default)]
pub struct TemporalGraph {
    directed: bool,
    node_labels: IndexMap<NodeId, Label>,
    edges: Vec<TemporalEdge>,
    out_adj: HashMap<NodeId, TimeIndex>,
    in_adj: HashMap<NodeId, TimeIndex>,
    recip_adj: HashMap<NodeId, TimeIndex>,
}

impl TemporalGraph {
    /// An empty graph; `directed` fixes how edges are indexed for its lifetime.
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.node_labels.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.node_labels.contains_key(&node)
    }

    #[must_use]
    pub fn node_label(&self, node: NodeId) -> Option<Label> {
        self.node_labels.get(&node).copied()
    }

    /// Nodes with their labels, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Label)> + '_ {
        self.node_labels.iter().map(|(&id, &label)| (id, label))
    }

    /// The edge with the given id.
    ///
    /// # Panics
    /// Panics if `edge` is not a valid edge id of this graph.
    #[must_use]
    pub fn edge(&self, edge: EdgeId) -> &TemporalEdge {
        &self.edges[edge]
    }

    /// The edge arena, indexed by edge id.
    #[must_use]
    pub fn edges(&self) -> &[TemporalEdge] {
        &self.edges
    }

    /// Adds a node. Re-adding an existing id keeps the first label.
    pub fn add_node(&mut self, id: NodeId, label: Label) {
        self.node_labels.entry(id).or_insert(label);
        if self.directed {
            self.out_adj.entry(id).or_default();
            self.in_adj.entry(id).or_default();
        } else {
            self.recip_adj.entry(id).or_default();
        }
    }

    /// Appends an edge and indexes it, returning its id.
    ///
    /// A second edge between the same ordered pair at the same timestamp
    /// replaces the first one in the adjacency indices; the first edge stays
    /// in the arena (see [`TemporalGraph::shadowed_edges`]).
    pub fn add_edge(
        &mut self,
        source: NodeId,
        dest: NodeId,
        timestamp: Timestamp,
        label: Label,
    ) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(TemporalEdge {
            source,
            dest,
            timestamp,
            label,
        });

        if self.directed {
            Self::index_edge(&mut self.out_adj, source, dest, timestamp, id);
            Self::index_edge(&mut self.in_adj, dest, source, timestamp, id);
        } else {
            Self::index_edge(&mut self.recip_adj, source, dest, timestamp, id);
            Self::index_edge(&mut self.recip_adj, dest, source, timestamp, id);
        }
        id
    }

    fn index_edge(
        adjacency: &mut HashMap<NodeId, TimeIndex>,
        owner: NodeId,
        neighbour: NodeId,
        timestamp: Timestamp,
        edge: EdgeId,
    ) {
        adjacency
            .entry(owner)
            .or_default()
            .entry(timestamp)
            .or_default()
            .insert(neighbour, edge);
    }

    /// The adjacency index of `node` in the given direction, if any.
    #[must_use]
    pub fn adjacency(&self, node: NodeId, direction: EdgeDirection) -> Option<&TimeIndex> {
        match direction {
            EdgeDirection::Out => self.out_adj.get(&node),
            EdgeDirection::In => self.in_adj.get(&node),
            EdgeDirection::Recip => self.recip_adj.get(&node),
        }
    }

    /// Whether `a` and `b` share an edge in any direction at any timestamp.
    #[must_use]
    pub fn are_neighbors(&self, a: NodeId, b: NodeId) -> bool {
        EdgeDirection::ALL.iter().any(|&direction| {
            self.adjacency(a, direction)
                .is_some_and(|index| index.values().any(|nbrs| nbrs.contains_key(&b)))
        })
    }

    /// Number of members of `set` adjacent to `node`.
    pub fn relative_degree<I>(&self, node: NodeId, set: I) -> usize
    where
        I: IntoIterator<Item = NodeId>,
    {
        set.into_iter()
            .filter(|&other| self.are_neighbors(node, other))
            .count()
    }

    /// Ids of edges that a later `(source, dest, timestamp)` duplicate pushed
    /// out of the adjacency indices.
    #[must_use]
    pub fn shadowed_edges(&self) -> Vec<EdgeId> {
        let lookup = if self.directed {
            EdgeDirection::Out
        } else {
            EdgeDirection::Recip
        };
        self.edges
            .iter()
            .enumerate()
            .filter(|(id, e)| {
                self.adjacency(e.source, lookup)
                    .and_then(|index| index.get(&e.timestamp))
                    .and_then(|nbrs| nbrs.get(&e.dest))
                    != Some(id)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Distinct node labels present in the graph.
    #[must_use]
    pub fn node_label_set(&self) -> HashSet<Label> {
        self.node_labels.values().copied().collect()
    }

    /// Distinct edge labels present in the graph.
    #[must_use]
    pub fn edge_label_set(&self) -> HashSet<Label> {
        self.edges.iter().map(|e| e.label).collect()
    }
}

impl fmt::Display for TemporalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NODES:")?;
        for (id, label) in self.nodes() {
            writeln!(f, "{id}:{label}")?;
        }
        writeln!(f, "\nEDGES:")?;
        for e in &self.edges {
            if self.directed || e.source < e.dest {
                writeln!(f, "({},{},{}:{})", e.source, e.dest, e.timestamp, e.label)?;
            } else {
                writeln!(f, "({},{},{}:{})", e.dest, e.source, e.timestamp, e.label)?;
            }
        }
        Ok(())
    }
}
