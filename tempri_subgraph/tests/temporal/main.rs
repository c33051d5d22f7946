//! Integration tests for the temporal matcher.
//!
//! Random graphs are checked against an exhaustive oracle; fixed scenarios
//! go through the text loader and the `temporal_query_test!` harness.

mod cross_check;
mod loading;
mod oracle;
mod properties;
mod scenarios;
