//! Common types shared across the tempri workspace.
//!
//! This crate provides the labeled temporal graph model and its degree/flow
//! profiles, the text loader and writer, random query extraction, the search
//! configuration, and the built-in test cases used by the matcher's tests.

mod config;
mod error;
pub mod graph;
pub mod io;
pub mod sampling;
mod test_cases;

pub use crate::config::*;
pub use crate::error::GraphError;
pub use crate::graph::{
    EdgeDirection, EdgeId, Label, NodeId, Profile, TemporalEdge, TemporalGraph, TimeIndex,
    TimeWindow, Timestamp,
};
pub use crate::test_cases::*;
