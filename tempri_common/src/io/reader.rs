use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use super::LabelInterner;
use crate::error::GraphError;
use crate::graph::{Label, NodeId, TemporalGraph, Timestamp};

/// Loads graphs from the tab-separated text format:
///
/// ```text
/// <node count>
/// <id>\t<label>                      (node count lines)
/// <src>\t<dst>\t<ts>:<label>[,<ts>:<label>]*
/// ```
///
/// Labels are interned through a [`LabelInterner`] that lives as long as the
/// reader, so a query and a target read by the same reader share label ids.
#[derive(Clone, Debug, Default)]
pub struct GraphReader {
    labels: LabelInterner,
}

/// Label sets of a pattern graph, used to prune a target while loading it.
struct LabelFilter {
    nodes: HashSet<Label>,
    edges: HashSet<Label>,
}

#[derive(Default)]
struct LoadStats {
    self_loops: usize,
    pruned_nodes: usize,
    pruned_edges: usize,
    dangling_edges: usize,
}

impl GraphReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_labels(labels: LabelInterner) -> Self {
        Self { labels }
    }

    #[must_use]
    pub fn labels(&self) -> &LabelInterner {
        &self.labels
    }

    #[must_use]
    pub fn into_labels(self) -> LabelInterner {
        self.labels
    }

    /// Read a graph from `path`.
    ///
    /// With a `pattern`, target nodes and edges whose label does not occur in
    /// the pattern are dropped, as are edges left without an endpoint.
    /// Self-loops are always dropped.
    ///
    /// # Errors
    /// Returns a [`GraphError`] if the file cannot be read or is malformed.
    pub fn read_graph(
        &mut self,
        path: impl AsRef<Path>,
        pattern: Option<&TemporalGraph>,
        directed: bool,
    ) -> Result<TemporalGraph, GraphError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
        let graph = self.read_from(BufReader::new(file), path, pattern, directed)?;
        info!(
            "loaded '{}': {} nodes, {} edges",
            path.display(),
            graph.num_nodes(),
            graph.num_edges()
        );
        Ok(graph)
    }

    /// Parse a graph held in memory.
    ///
    /// # Errors
    /// Returns a [`GraphError`] if the text is malformed.
    pub fn parse_str(
        &mut self,
        text: &str,
        pattern: Option<&TemporalGraph>,
        directed: bool,
    ) -> Result<TemporalGraph, GraphError> {
        self.read_from(text.as_bytes(), Path::new("<memory>"), pattern, directed)
    }

    fn read_from<R: BufRead>(
        &mut self,
        reader: R,
        origin: &Path,
        pattern: Option<&TemporalGraph>,
        directed: bool,
    ) -> Result<TemporalGraph, GraphError> {
        let filter = pattern.map(|p| LabelFilter {
            nodes: p.node_label_set(),
            edges: p.edge_label_set(),
        });
        let mut stats = LoadStats::default();
        let mut graph = TemporalGraph::new(directed);

        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !matches!(line, Ok(l) if l.trim().is_empty()));

        let (line, header) = match lines.next() {
            Some((line, text)) => (line, text.map_err(|e| GraphError::io(origin, e))?),
            None => return Err(GraphError::MissingNodeCount),
        };
        let expected: usize = header
            .trim()
            .parse()
            .map_err(|_| GraphError::InvalidNodeCount {
                line,
                value: header.trim().to_owned(),
            })?;

        for found in 0..expected {
            let Some((line, text)) = lines.next() else {
                return Err(GraphError::TruncatedNodeList { expected, found });
            };
            let text = text.map_err(|e| GraphError::io(origin, e))?;
            let (id, label) = self.parse_node(line, &text)?;
            match &filter {
                Some(f) if !f.nodes.contains(&label) => stats.pruned_nodes += 1,
                _ => graph.add_node(id, label),
            }
        }

        for (line, text) in lines {
            let text = text.map_err(|e| GraphError::io(origin, e))?;
            self.parse_edges(line, &text, &mut graph, filter.as_ref(), &mut stats)?;
        }

        debug!(
            "{}: skipped {} self-loops, pruned {} nodes and {} edges, {} dangling edges",
            origin.display(),
            stats.self_loops,
            stats.pruned_nodes,
            stats.pruned_edges,
            stats.dangling_edges
        );
        if stats.dangling_edges > 0 && filter.is_none() {
            warn!(
                "{}: {} edges reference undeclared nodes and were skipped",
                origin.display(),
                stats.dangling_edges
            );
        }
        let shadowed = graph.shadowed_edges().len();
        if shadowed > 0 {
            warn!(
                "{}: {shadowed} edges repeat an earlier (source, dest, timestamp) and are unreachable",
                origin.display()
            );
        }
        Ok(graph)
    }

    fn parse_node(&mut self, line: usize, text: &str) -> Result<(NodeId, Label), GraphError> {
        let mut fields = text.split('\t');
        let (Some(id), Some(name)) = (fields.next(), fields.next()) else {
            return Err(GraphError::malformed_node(line, text));
        };
        let id = parse_int::<NodeId>(line, id)?;
        Ok((id, self.labels.intern_node(name.trim())?))
    }

    fn parse_edges(
        &mut self,
        line: usize,
        text: &str,
        graph: &mut TemporalGraph,
        filter: Option<&LabelFilter>,
        stats: &mut LoadStats,
    ) -> Result<(), GraphError> {
        let mut fields = text.split('\t');
        let (Some(source), Some(dest), Some(stamps)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(GraphError::malformed_edge(line, text));
        };
        let source = parse_int::<NodeId>(line, source)?;
        let dest = parse_int::<NodeId>(line, dest)?;
        if source == dest {
            stats.self_loops += 1;
            return Ok(());
        }

        for item in stamps.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((timestamp, name)) = item.split_once(':') else {
                return Err(GraphError::malformed_edge(line, text));
            };
            let timestamp = parse_int::<Timestamp>(line, timestamp)?;
            let label = self.labels.intern_edge(name.trim())?;

            if filter.is_some_and(|f| !f.edges.contains(&label)) {
                stats.pruned_edges += 1;
                continue;
            }
            if !graph.contains_node(source) || !graph.contains_node(dest) {
                stats.dangling_edges += 1;
                continue;
            }
            graph.add_edge(source, dest, timestamp, label);
        }
        Ok(())
    }
}

fn parse_int<T: std::str::FromStr>(line: usize, value: &str) -> Result<T, GraphError> {
    value
        .trim()
        .parse()
        .map_err(|_| GraphError::invalid_integer(line, value.trim()))
}
