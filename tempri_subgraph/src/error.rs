//! Error types for matcher construction.

use thiserror::Error;

/// Errors raised when a [`crate::TemporalMatcher`] is set up with inputs that
/// cannot be compared.
///
/// Inputs that merely have no occurrences (empty domains, disconnected or
/// edgeless queries) are not errors; they yield a zero count.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Query and target disagree on whether edges are directed.
    #[error("query is {} but target is {}", kind(*query), kind(*target))]
    DirectednessMismatch { query: bool, target: bool },

    /// The graphs disagree with the configured directedness.
    #[error("configuration expects {} graphs but the inputs are {}", kind(*config), kind(*graphs))]
    ConfigDirectedness { config: bool, graphs: bool },
}

fn kind(directed: bool) -> &'static str {
    if directed { "directed" } else { "undirected" }
}
