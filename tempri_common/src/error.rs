//! Error types for reading and writing graph files.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading or saving a graph.
///
/// Line numbers are 1-based and count every line of the file, blank ones
/// included.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The file could not be opened, read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no node-count header.
    #[error("missing node count header")]
    MissingNodeCount,

    /// The node-count header is not a non-negative integer.
    #[error("line {line}: invalid node count '{value}'")]
    InvalidNodeCount { line: usize, value: String },

    /// A node line does not have an id and a label.
    #[error("line {line}: malformed node line '{content}'")]
    MalformedNode { line: usize, content: String },

    /// An edge line does not have a source, a destination and a
    /// `timestamp:label` list.
    #[error("line {line}: malformed edge line '{content}'")]
    MalformedEdge { line: usize, content: String },

    /// A node id or timestamp could not be parsed.
    #[error("line {line}: invalid integer '{value}'")]
    InvalidInteger { line: usize, value: String },

    /// The file ended before the announced number of nodes was read.
    #[error("expected {expected} node lines, found {found}")]
    TruncatedNodeList { expected: usize, found: usize },

    /// More distinct labels than fit in a [`crate::Label`].
    #[error("too many distinct {kind} labels for 32-bit label ids")]
    TooManyLabels { kind: &'static str },
}

impl GraphError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed_node(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedNode {
            line,
            content: content.into(),
        }
    }

    pub(crate) fn malformed_edge(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedEdge {
            line,
            content: content.into(),
        }
    }

    pub(crate) fn invalid_integer(line: usize, value: impl Into<String>) -> Self {
        Self::InvalidInteger {
            line,
            value: value.into(),
        }
    }
}
