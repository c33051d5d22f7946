use quickcheck::{Arbitrary, Gen, quickcheck};
use tempri_common::sampling::extract_random_subgraph;
use tempri_common::{Config, Delta, TemporalGraph};
use tempri_subgraph::TemporalMatcher;

use crate::oracle::random_target;

/// A small random target with a query drawn from it.
#[derive(Clone, Debug)]
struct ArbitraryWorkload {
    directed: bool,
    target: TemporalGraph,
    query: TemporalGraph,
}

impl Arbitrary for ArbitraryWorkload {
    fn arbitrary(g: &mut Gen) -> Self {
        let directed = bool::arbitrary(g);
        loop {
            let seed = u64::arbitrary(g);
            let target = random_target(seed, directed, 7, 16, 8, 2);
            let edges = 2 + usize::arbitrary(g) % 2;
            if let Some(query) = extract_random_subgraph(&target, edges, seed ^ 0x5eed) {
                return Self {
                    directed,
                    target,
                    query,
                };
            }
        }
    }
}

fn count(w: &ArbitraryWorkload, delta: Delta) -> u64 {
    let cfg = Config::builder().directed(w.directed).delta(delta).build();
    TemporalMatcher::new(&w.query, &w.target, &cfg)
        .map(|m| m.count())
        .unwrap_or(u64::MAX)
}

quickcheck! {
    fn prop_wider_window_never_loses_occurrences(w: ArbitraryWorkload, d: u8) -> bool {
        let d = i64::from(d % 10);
        let narrow = count(&w, Delta::Within(d));
        let wide = count(&w, Delta::Within(d + 1));
        let unbounded = count(&w, Delta::Unbounded);
        narrow <= wide && wide <= unbounded
    }

    fn prop_query_occurs_in_itself(w: ArbitraryWorkload) -> bool {
        let cfg = Config::builder().directed(w.directed).build();
        TemporalMatcher::new(&w.query, &w.query, &cfg).is_ok_and(|m| m.count() >= 1)
    }

    fn prop_negative_window_is_empty(w: ArbitraryWorkload, d: u8) -> bool {
        count(&w, Delta::Within(-1 - i64::from(d))) == 0
    }
}
