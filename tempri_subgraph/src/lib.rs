//! Temporal subgraph isomorphism.
//!
//! Given a query and a target [`TemporalGraph`](tempri_common::TemporalGraph),
//! the [`TemporalMatcher`] counts or enumerates every occurrence of the query
//! whose edges keep the query's timestamp order and fit inside a window of
//! width Δ. The search is planned once ([`MatchPlan`]): node domains are
//! filtered by label, degree and temporal flow, nodes and edges are put in a
//! matching order, and each edge state gets the time bounds it must respect.
//! The search itself is an iterative backtracking over the edge states.

mod bounds;
mod candidates;
mod control;
mod domain;
mod error;
mod matcher;
mod occurrence;
mod order;
mod query_index;
mod search;
mod state;
mod util;

pub mod profiling;
pub mod test_harness;

pub use bounds::{TimeBound, TimeBoundTable};
pub use control::{SearchControl, SearchSummary};
pub use domain::{DomainBuilder, Domains};
pub use error::MatchError;
pub use matcher::{MatchPlan, TemporalMatcher, count_occurrences};
pub use occurrence::{Occurrence, OccurrenceSet, OccurrenceSink};
pub use order::{MatchingOrder, OrderedEdge, ParentLink};
pub use query_index::QueryIndex;
pub use util::progress::{Progress, ProgressSnapshot};
