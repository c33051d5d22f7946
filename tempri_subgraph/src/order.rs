//! Static matching order for query nodes and query edges.
//!
//! Node states are chosen greedily: the root is the node with most
//! neighbours in the whole query, every later state is the frontier node
//! with most neighbours among the nodes already ordered. Ties go to the
//! smaller domain. Edge states then list, for each node state `i` and each
//! earlier node state `j < i`, every query edge between them, so the first
//! edge state always connects node states 1 and 0.

use indexmap::IndexSet;
use tempri_common::{EdgeDirection, EdgeId, TemporalGraph};
use tracing::{info, warn};

use crate::profiling::Timer;
use crate::query_index::QueryIndex;

/// How a node joined the frontier: through which ordered node and in which
/// direction relative to that node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentLink {
    pub state: usize,
    pub direction: EdgeDirection,
}

/// A query edge at a fixed position of the edge order.
///
/// `direction` is seen from the source state's node: `Out` means the edge
/// leaves it and enters the destination state's node, `In` the opposite,
/// `Recip` an undirected edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderedEdge {
    pub edge: EdgeId,
    pub source_state: usize,
    pub dest_state: usize,
    pub direction: EdgeDirection,
}

#[derive(Clone, Debug)]
pub struct MatchingOrder {
    /// Query position of each node state.
    nodes: Vec<usize>,
    /// Parent link of each node state; `None` for the root.
    parents: Vec<Option<ParentLink>>,
    edges: Vec<OrderedEdge>,
}

impl MatchingOrder {
    /// Plan the order, or `None` if the query has no edges or is disconnected.
    #[must_use]
    pub fn build(query: &TemporalGraph, index: &QueryIndex, domain_sizes: &[usize]) -> Option<Self> {
        let _t = Timer::new("MatchingOrder::build");
        let n = index.len();
        if n == 0 {
            warn!("query has no nodes");
            return None;
        }

        let mut ordered: IndexSet<usize> = IndexSet::with_capacity(n);
        let mut frontier: IndexSet<usize> = IndexSet::new();
        let mut unseen: IndexSet<usize> = (0..n).collect();
        let mut parent_of: Vec<Option<ParentLink>> = vec![None; n];

        for state in 0..n {
            let (pool, reference) = if state == 0 {
                (&unseen, &unseen)
            } else {
                (&frontier, &ordered)
            };
            let Some(best) = Self::pick(query, index, domain_sizes, pool, reference) else {
                warn!(
                    "query is disconnected: only {} of {n} nodes reachable from the root",
                    ordered.len()
                );
                return None;
            };

            ordered.insert(best);
            unseen.shift_remove(&best);
            frontier.shift_remove(&best);

            for direction in EdgeDirection::ALL {
                let Some(adjacency) = query.adjacency(index.node(best), direction) else {
                    continue;
                };
                for neighbours in adjacency.values() {
                    for &nbr in neighbours.keys() {
                        let Some(pos) = index.position(nbr) else {
                            continue;
                        };
                        if unseen.shift_remove(&pos) {
                            frontier.insert(pos);
                            parent_of[pos] = Some(ParentLink { state, direction });
                        }
                    }
                }
            }
        }

        let nodes: Vec<usize> = ordered.into_iter().collect();
        let parents = nodes.iter().map(|&pos| parent_of[pos]).collect();
        let edges = Self::order_edges(query, index, &nodes);
        if edges.is_empty() {
            warn!("query has no edges");
            return None;
        }
        debug_assert_eq!((edges[0].source_state, edges[0].dest_state), (1, 0));

        info!(
            "matching order built: {} node states, {} edge states",
            nodes.len(),
            edges.len()
        );
        Some(Self {
            nodes,
            parents,
            edges,
        })
    }

    /// Highest degree towards `reference`, ties to the smaller domain, then
    /// to the earliest in `pool`.
    fn pick(
        query: &TemporalGraph,
        index: &QueryIndex,
        domain_sizes: &[usize],
        pool: &IndexSet<usize>,
        reference: &IndexSet<usize>,
    ) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for &pos in pool {
            let degree = query.relative_degree(
                index.node(pos),
                reference.iter().map(|&p| index.node(p)),
            );
            let better = match best {
                None => true,
                Some((b, b_degree)) => {
                    degree > b_degree || (degree == b_degree && domain_sizes[pos] < domain_sizes[b])
                }
            };
            if better {
                best = Some((pos, degree));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn order_edges(query: &TemporalGraph, index: &QueryIndex, nodes: &[usize]) -> Vec<OrderedEdge> {
        let mut edges = Vec::with_capacity(query.num_edges());
        for (i, &source_pos) in nodes.iter().enumerate() {
            let source = index.node(source_pos);
            for (j, &dest_pos) in nodes.iter().enumerate().take(i) {
                let dest = index.node(dest_pos);
                for direction in EdgeDirection::ALL {
                    let Some(adjacency) = query.adjacency(source, direction) else {
                        continue;
                    };
                    for neighbours in adjacency.values() {
                        if let Some(&edge) = neighbours.get(&dest) {
                            edges.push(OrderedEdge {
                                edge,
                                source_state: i,
                                dest_state: j,
                                direction,
                            });
                        }
                    }
                }
            }
        }
        edges
    }

    #[must_use]
    pub fn num_node_states(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn num_edge_states(&self) -> usize {
        self.edges.len()
    }

    /// Query position matched at node state `state`.
    #[must_use]
    pub fn node_at(&self, state: usize) -> usize {
        self.nodes[state]
    }

    #[must_use]
    pub fn parent(&self, state: usize) -> Option<ParentLink> {
        self.parents[state]
    }

    #[must_use]
    pub fn edge(&self, state: usize) -> &OrderedEdge {
        &self.edges[state]
    }

    #[must_use]
    pub fn edges(&self) -> &[OrderedEdge] {
        &self.edges
    }
}
