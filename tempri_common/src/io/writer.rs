use std::collections::HashMap;
use std::path::Path;

use itertools::Itertools;

use super::LabelInterner;
use crate::error::GraphError;
use crate::graph::{EdgeDirection, Label, NodeId, TemporalGraph};

/// Writes graphs in the format read by [`super::GraphReader`].
///
/// Nodes are renumbered `0..n` in insertion order and label ids are written
/// back as their original strings.
#[derive(Clone, Copy, Debug)]
pub struct GraphWriter<'l> {
    labels: &'l LabelInterner,
}

impl<'l> GraphWriter<'l> {
    #[must_use]
    pub const fn new(labels: &'l LabelInterner) -> Self {
        Self { labels }
    }

    /// Render `graph` as text. Each reachable edge is written once, one
    /// `src\tdst\tts:label` line per edge.
    #[must_use]
    pub fn render(&self, graph: &TemporalGraph) -> String {
        let ids: Vec<NodeId> = graph.nodes().map(|(id, _)| id).collect();
        let position: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let direction = if graph.is_directed() {
            EdgeDirection::Out
        } else {
            EdgeDirection::Recip
        };

        let nodes = graph
            .nodes()
            .enumerate()
            .map(|(i, (_, label))| format!("{i}\t{}", self.node_name(label)));

        let mut edges = Vec::new();
        for (i, &id) in ids.iter().enumerate() {
            let Some(index) = graph.adjacency(id, direction) else {
                continue;
            };
            for (timestamp, neighbours) in index {
                let mut row: Vec<(usize, usize)> = neighbours
                    .iter()
                    .filter_map(|(nbr, &edge)| position.get(nbr).map(|&j| (j, edge)))
                    .filter(|&(j, _)| graph.is_directed() || i < j)
                    .collect();
                row.sort_unstable();
                edges.extend(row.into_iter().map(|(j, edge)| {
                    let label = graph.edge(edge).label;
                    format!("{i}\t{j}\t{timestamp}:{}", self.edge_name(label))
                }));
            }
        }

        std::iter::once(ids.len().to_string())
            .chain(nodes)
            .chain(edges)
            .map(|line| line + "\n")
            .join("")
    }

    /// Write `graph` to `path`.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] if the file cannot be written.
    pub fn write_query(&self, graph: &TemporalGraph, path: impl AsRef<Path>) -> Result<(), GraphError> {
        let path = path.as_ref();
        std::fs::write(path, self.render(graph)).map_err(|e| GraphError::io(path, e))?;
        tracing::debug!(
            "wrote {} nodes and {} edges to '{}'",
            graph.num_nodes(),
            graph.num_edges(),
            path.display()
        );
        Ok(())
    }

    fn node_name(&self, label: Label) -> String {
        self.labels
            .node_label_name(label)
            .map_or_else(|| label.to_string(), str::to_owned)
    }

    fn edge_name(&self, label: Label) -> String {
        self.labels
            .edge_label_name(label)
            .map_or_else(|| label.to_string(), str::to_owned)
    }
}
