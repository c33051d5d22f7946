//! Temporal bounds between edge states.
//!
//! For each edge state, the bound names the earlier edge states whose mapped
//! timestamps enclose the timestamp this state may take: the one carrying the
//! closest smaller query timestamp and the one carrying the closest larger
//! query timestamp. An edge state whose query timestamp already occurred
//! earlier is pinned to that earlier state (`lower == upper`).

use std::collections::BTreeSet;
use std::ops::Bound;

use tempri_common::{TemporalGraph, Timestamp};

use crate::order::MatchingOrder;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeBound {
    pub lower: Option<usize>,
    pub upper: Option<usize>,
}

impl TimeBound {
    /// Whether the state must reuse the timestamp of an earlier state.
    #[must_use]
    pub fn is_equality(&self) -> bool {
        self.lower.is_some() && self.lower == self.upper
    }
}

#[derive(Clone, Debug, Default)]
pub struct TimeBoundTable {
    bounds: Vec<TimeBound>,
}

impl TimeBoundTable {
    #[must_use]
    pub fn build(query: &TemporalGraph, order: &MatchingOrder) -> Self {
        let times: Vec<Timestamp> = order
            .edges()
            .iter()
            .map(|e| query.edge(e.edge).timestamp)
            .collect();
        let last_with = |before: usize, t: Timestamp| times[..before].iter().rposition(|&u| u == t);

        let mut seen: BTreeSet<Timestamp> = BTreeSet::new();
        let bounds = times
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                if seen.contains(&t) {
                    let same = last_with(i, t);
                    return TimeBound {
                        lower: same,
                        upper: same,
                    };
                }
                seen.insert(t);
                let below = seen.range(..t).next_back().copied();
                let above = seen
                    .range((Bound::Excluded(t), Bound::Unbounded))
                    .next()
                    .copied();
                TimeBound {
                    lower: below.and_then(|p| last_with(i, p)),
                    upper: above.and_then(|s| last_with(i, s)),
                }
            })
            .collect();
        Self { bounds }
    }

    #[must_use]
    pub fn get(&self, state: usize) -> TimeBound {
        self.bounds[state]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}
