use itertools::Itertools;

use super::LabelInterner;
use crate::graph::{Label, TemporalGraph};

/// Renders an occurrence graph on one line:
///
/// ```text
/// (id:label),(id:label)<TAB>(src,dst,ts:label),(src,dst,ts:label)
/// ```
///
/// Labels are printed as their interned ids unless an interner is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct OccurrenceFormatter<'l> {
    labels: Option<&'l LabelInterner>,
}

impl<'l> OccurrenceFormatter<'l> {
    #[must_use]
    pub const fn new() -> Self {
        Self { labels: None }
    }

    #[must_use]
    pub const fn with_labels(labels: &'l LabelInterner) -> Self {
        Self {
            labels: Some(labels),
        }
    }

    #[must_use]
    pub fn format(&self, occurrence: &TemporalGraph) -> String {
        let nodes = occurrence
            .nodes()
            .map(|(id, label)| format!("({id}:{})", self.node_name(label)))
            .join(",");
        let edges = occurrence
            .edges()
            .iter()
            .map(|e| {
                let (source, dest) = if occurrence.is_directed() || e.source < e.dest {
                    (e.source, e.dest)
                } else {
                    (e.dest, e.source)
                };
                format!("({source},{dest},{}:{})", e.timestamp, self.edge_name(e.label))
            })
            .join(",");
        format!("{nodes}\t{edges}")
    }

    fn node_name(&self, label: Label) -> String {
        self.labels
            .and_then(|l| l.node_label_name(label))
            .map_or_else(|| label.to_string(), str::to_owned)
    }

    fn edge_name(&self, label: Label) -> String {
        self.labels
            .and_then(|l| l.edge_label_name(label))
            .map_or_else(|| label.to_string(), str::to_owned)
    }
}
