//! Degree and temporal-flow signatures used to prune candidate domains.
//!
//! A target node can only stand in for a query node if every slot of its
//! profile is at least the query node's. Target profiles are computed with
//! per-slot limits so counting can stop once a slot is known to be large
//! enough for every query node.

use super::{EdgeDirection, NodeId, Neighbours, TemporalGraph, TimeIndex, TimeWindow};
use crate::config::Delta;

/// Number of degree slots: `[out, in, recip]`.
pub const DEGREE_SLOTS: usize = 3;
/// Number of flow slots for directed graphs.
pub const DIRECTED_FLOW_SLOTS: usize = 12;
/// Number of flow slots for undirected graphs.
pub const UNDIRECTED_FLOW_SLOTS: usize = 3;

/// Slots of a directed flow profile.
///
/// The `*3` variants count paths through three distinct nodes, the `*2`
/// variants count back-and-forth pairs with a single neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum DirectedFlow {
    /// In-edge followed by a later out-edge within the window.
    ForwardIo3 = 0,
    /// In-edge preceded by an out-edge within the window.
    BackwardIo3 = 1,
    /// In-edge and out-edge at the same timestamp.
    SyncIo3 = 2,
    /// In-edge followed by a later out-edge within the window (kept as a
    /// separate slot, always equal to `ForwardIo3`).
    AsyncIi3 = 3,
    /// Ordered pairs of distinct in-neighbours at the same timestamp.
    SyncIi = 4,
    /// Out-edge followed by a later out-edge within the window.
    AsyncOo3 = 5,
    /// Ordered pairs of distinct out-neighbours at the same timestamp.
    SyncOo = 6,
    ForwardIo2 = 7,
    BackwardIo2 = 8,
    SyncIo2 = 9,
    AsyncIi2 = 10,
    AsyncOo2 = 11,
}

/// Slots of an undirected flow profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum UndirectedFlow {
    /// Edge followed by a later edge to another neighbour within the window.
    Async3 = 0,
    /// Ordered pairs of distinct neighbours at the same timestamp.
    Sync = 1,
    /// Edge followed by a later edge to the same neighbour within the window.
    Async2 = 2,
}

/// A fixed-width vector of non-negative counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Profile {
    counts: Vec<usize>,
}

impl Profile {
    #[must_use]
    pub fn zeros(slots: usize) -> Self {
        Self {
            counts: vec![0; slots],
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> usize {
        self.counts.get(slot).copied().unwrap_or(0)
    }

    /// `true` iff every slot of `self` is at least the matching slot of `other`.
    #[must_use]
    pub fn dominates(&self, other: &Profile) -> bool {
        (0..self.len().max(other.len())).all(|slot| self.get(slot) >= other.get(slot))
    }

    /// Raises each slot to the maximum of `self` and `other`.
    pub fn merge_max(&mut self, other: &Profile) {
        if self.counts.len() < other.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (mine, &theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine = (*mine).max(theirs);
        }
    }
}

impl From<Vec<usize>> for Profile {
    fn from(counts: Vec<usize>) -> Self {
        Self { counts }
    }
}

/// Accumulates slot counts, closing each slot once it reaches its limit.
struct SlotCounter<'l> {
    counts: Vec<usize>,
    finished: Vec<bool>,
    limits: Option<&'l Profile>,
    open: usize,
}

impl<'l> SlotCounter<'l> {
    fn new(slots: usize, limits: Option<&'l Profile>) -> Self {
        let finished: Vec<bool> = (0..slots)
            .map(|slot| limits.is_some_and(|l| l.get(slot) == 0))
            .collect();
        let open = finished.iter().filter(|&&done| !done).count();
        Self {
            counts: vec![0; slots],
            finished,
            limits,
            open,
        }
    }

    fn is_open(&self, slot: usize) -> bool {
        !self.finished[slot]
    }

    fn any_open(&self, slots: &[usize]) -> bool {
        slots.iter().any(|&slot| self.is_open(slot))
    }

    fn all_finished(&self) -> bool {
        self.open == 0
    }

    fn add(&mut self, slot: usize, amount: usize) {
        if self.finished[slot] {
            return;
        }
        self.counts[slot] += amount;
        if let Some(limits) = self.limits {
            if self.counts[slot] >= limits.get(slot) {
                self.finished[slot] = true;
                self.open -= 1;
            }
        }
    }

    /// Splits `|n1| * |n2|` into three-node pairs and same-neighbour pairs.
    fn add_pairs(&mut self, three: usize, two: usize, n1: &Neighbours, n2: &Neighbours) {
        let common = n1.keys().filter(|k| n2.contains_key(*k)).count();
        self.add(three, n1.len() * n2.len() - common);
        self.add(two, common);
    }

    fn into_profile(self) -> Profile {
        Profile::from(self.counts)
    }
}

const IN_DRIVEN: [usize; 9] = [0, 1, 2, 3, 4, 7, 8, 9, 10];
const OUT_DRIVEN: [usize; 3] = [5, 6, 11];

impl TemporalGraph {
    /// `[out, in, recip]` edge counts of `node`, each summed over timestamps.
    ///
    /// With `limits`, a slot stops counting once it reaches its limit and a
    /// slot whose limit is zero is never counted.
    #[must_use]
    pub fn degree(&self, node: NodeId, limits: Option<&Profile>) -> Profile {
        let mut counter = SlotCounter::new(DEGREE_SLOTS, limits);
        for (slot, direction) in EdgeDirection::ALL.into_iter().enumerate() {
            if counter.all_finished() {
                break;
            }
            let Some(index) = self.adjacency(node, direction) else {
                continue;
            };
            for neighbours in index.values() {
                if !counter.is_open(slot) {
                    break;
                }
                counter.add(slot, neighbours.len());
            }
        }
        counter.into_profile()
    }

    /// Counts temporally ordered edge pairs around `node` whose timestamps are
    /// at most `delta` apart.
    ///
    /// Returns [`DIRECTED_FLOW_SLOTS`] slots (indexed by [`DirectedFlow`]) for
    /// directed graphs and [`UNDIRECTED_FLOW_SLOTS`] slots (indexed by
    /// [`UndirectedFlow`]) otherwise.
    #[must_use]
    pub fn flow_profile(&self, node: NodeId, limits: Option<&Profile>, delta: Delta) -> Profile {
        let empty = TimeIndex::new();
        if self.is_directed() {
            let ins = self.adjacency(node, EdgeDirection::In).unwrap_or(&empty);
            let outs = self.adjacency(node, EdgeDirection::Out).unwrap_or(&empty);
            directed_flow(ins, outs, limits, delta)
        } else {
            let recip = self.adjacency(node, EdgeDirection::Recip).unwrap_or(&empty);
            undirected_flow(recip, limits, delta)
        }
    }
}

fn directed_flow(
    ins: &TimeIndex,
    outs: &TimeIndex,
    limits: Option<&Profile>,
    delta: Delta,
) -> Profile {
    use DirectedFlow as F;

    let mut c = SlotCounter::new(DIRECTED_FLOW_SLOTS, limits);

    if c.any_open(&IN_DRIVEN) {
        for (&t1, n1) in ins {
            if c.any_open(&[F::ForwardIo3 as usize, F::ForwardIo2 as usize]) {
                for (_, n2) in delta.after(t1).slice(outs) {
                    c.add_pairs(F::ForwardIo3 as usize, F::ForwardIo2 as usize, n1, n2);
                }
            }
            if c.any_open(&[F::BackwardIo3 as usize, F::BackwardIo2 as usize]) {
                for (_, n2) in delta.before(t1).slice(outs) {
                    c.add_pairs(F::BackwardIo3 as usize, F::BackwardIo2 as usize, n1, n2);
                }
            }
            if c.any_open(&[F::SyncIo3 as usize, F::SyncIo2 as usize]) {
                if let Some(n2) = outs.get(&t1) {
                    c.add_pairs(F::SyncIo3 as usize, F::SyncIo2 as usize, n1, n2);
                }
            }
            if c.any_open(&[F::AsyncIi3 as usize, F::AsyncIi2 as usize]) {
                for (_, n2) in delta.after(t1).slice(outs) {
                    c.add_pairs(F::AsyncIi3 as usize, F::AsyncIi2 as usize, n1, n2);
                }
            }
            if c.is_open(F::SyncIi as usize) {
                c.add(F::SyncIi as usize, n1.len() * n1.len().saturating_sub(1));
            }
            if !c.any_open(&IN_DRIVEN) {
                break;
            }
        }
    }

    if c.any_open(&OUT_DRIVEN) {
        for (&t1, n1) in outs {
            if c.any_open(&[F::AsyncOo3 as usize, F::AsyncOo2 as usize]) {
                for (_, n2) in delta.after(t1).slice(outs) {
                    c.add_pairs(F::AsyncOo3 as usize, F::AsyncOo2 as usize, n1, n2);
                }
            }
            if c.is_open(F::SyncOo as usize) {
                c.add(F::SyncOo as usize, n1.len() * n1.len().saturating_sub(1));
            }
            if !c.any_open(&OUT_DRIVEN) {
                break;
            }
        }
    }

    c.into_profile()
}

fn undirected_flow(recip: &TimeIndex, limits: Option<&Profile>, delta: Delta) -> Profile {
    use UndirectedFlow as F;

    let mut c = SlotCounter::new(UNDIRECTED_FLOW_SLOTS, limits);
    for (&t1, n1) in recip {
        if c.all_finished() {
            break;
        }
        if c.any_open(&[F::Async3 as usize, F::Async2 as usize]) {
            for (_, n2) in delta.after(t1).slice(recip) {
                c.add_pairs(F::Async3 as usize, F::Async2 as usize, n1, n2);
            }
        }
        if c.is_open(F::Sync as usize) {
            c.add(F::Sync as usize, n1.len() * n1.len().saturating_sub(1));
        }
    }
    c.into_profile()
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rstest::rstest;

    use super::*;

    /// Hub `0` with in-edges at 1 and 3, out-edges at 2, 3 and 9.
    fn hub() -> TemporalGraph {
        let mut g = TemporalGraph::new(true);
        for id in 0..5 {
            g.add_node(id, 0);
        }
        g.add_edge(1, 0, 1, 0);
        g.add_edge(2, 0, 3, 0);
        g.add_edge(0, 3, 2, 0);
        g.add_edge(0, 1, 3, 0);
        g.add_edge(0, 4, 9, 0);
        g
    }

    #[test]
    fn degree_counts_each_direction() {
        let g = hub();
        assert_eq!(g.degree(0, None).as_slice(), &[3, 2, 0]);
        assert_eq!(g.degree(4, None).as_slice(), &[0, 1, 0]);
    }

    #[test]
    fn degree_limits_stop_early_but_stay_at_least_the_limit() {
        let g = hub();
        let limits = Profile::from(vec![1, 0, 5]);
        let capped = g.degree(0, Some(&limits));
        assert!(capped.get(0) >= 1);
        assert_eq!(capped.get(1), 0);
        assert_eq!(capped.get(2), 0);
    }

    #[rstest]
    #[case::unbounded(Delta::Unbounded, [3, 1, 1, 3, 0, 3, 0, 1, 0, 0, 1, 0])]
    #[case::within_two(Delta::Within(2), [1, 1, 1, 1, 0, 1, 0, 1, 0, 0, 1, 0])]
    #[case::within_zero(Delta::Within(0), [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0])]
    fn directed_flow_profile(#[case] delta: Delta, #[case] expected: [usize; 12]) {
        let g = hub();
        assert_eq!(g.flow_profile(0, None, delta).as_slice(), &expected);
    }

    #[test]
    fn sync_pairs_count_ordered_distinct_neighbours() {
        let mut g = TemporalGraph::new(true);
        for id in 0..4 {
            g.add_node(id, 0);
        }
        g.add_edge(0, 1, 5, 0);
        g.add_edge(0, 2, 5, 0);
        g.add_edge(0, 3, 5, 0);
        g.add_edge(1, 2, 5, 0);
        g.add_edge(3, 2, 5, 0);
        let hub = g.flow_profile(0, None, Delta::Unbounded);
        assert_eq!(hub.get(DirectedFlow::SyncOo as usize), 6);
        let sink = g.flow_profile(2, None, Delta::Unbounded);
        assert_eq!(sink.get(DirectedFlow::SyncIi as usize), 6);
    }

    #[test]
    fn undirected_flow_profile() {
        let mut g = TemporalGraph::new(false);
        for id in 0..3 {
            g.add_node(id, 0);
        }
        g.add_edge(0, 1, 1, 0);
        g.add_edge(0, 2, 1, 0);
        g.add_edge(0, 1, 4, 0);
        let p = g.flow_profile(0, None, Delta::Unbounded);
        // t=1 {1,2} then t=4 {1}: 2*1 - 1 three-node, 1 two-node.
        assert_eq!(p.get(UndirectedFlow::Async3 as usize), 1);
        assert_eq!(p.get(UndirectedFlow::Async2 as usize), 1);
        assert_eq!(p.get(UndirectedFlow::Sync as usize), 2);
        let tight = g.flow_profile(0, None, Delta::Within(2));
        assert_eq!(tight.get(UndirectedFlow::Async3 as usize), 0);
        assert_eq!(tight.get(UndirectedFlow::Async2 as usize), 0);
    }

    #[test]
    fn forward_and_async_in_slots_agree() {
        let g = hub();
        for delta in [Delta::Unbounded, Delta::Within(1), Delta::Within(7)] {
            for node in 0..5 {
                let p = g.flow_profile(node, None, delta);
                assert_eq!(
                    p.get(DirectedFlow::ForwardIo3 as usize),
                    p.get(DirectedFlow::AsyncIi3 as usize)
                );
                assert_eq!(
                    p.get(DirectedFlow::ForwardIo2 as usize),
                    p.get(DirectedFlow::AsyncIi2 as usize)
                );
            }
        }
    }

    #[test]
    fn dominance_and_merge() {
        let mut a = Profile::from(vec![1, 4, 0]);
        let b = Profile::from(vec![2, 1, 0]);
        assert!(!a.dominates(&b));
        assert!(!b.dominates(&a));
        a.merge_max(&b);
        assert_eq!(a.as_slice(), &[2, 4, 0]);
        assert!(a.dominates(&b));
    }

    quickcheck! {
        fn limited_flow_never_undershoots(edges: Vec<(u8, u8, u8)>, caps: Vec<u8>) -> bool {
            let mut g = TemporalGraph::new(true);
            for id in 0..6 {
                g.add_node(id, 0);
            }
            for (s, d, t) in edges {
                let (s, d) = (u32::from(s % 6), u32::from(d % 6));
                if s != d {
                    g.add_edge(s, d, i64::from(t % 16), 0);
                }
            }
            let limits = Profile::from(
                (0..DIRECTED_FLOW_SLOTS)
                    .map(|i| caps.get(i).map_or(3, |&c| usize::from(c % 8)))
                    .collect::<Vec<_>>(),
            );
            (0..6).all(|node| {
                let full = g.flow_profile(node, None, Delta::Within(4));
                let capped = g.flow_profile(node, Some(&limits), Delta::Within(4));
                (0..DIRECTED_FLOW_SLOTS).all(|slot| {
                    let want = full.get(slot).min(limits.get(slot));
                    capped.get(slot) >= want && capped.get(slot) <= full.get(slot)
                })
            })
        }
    }
}
