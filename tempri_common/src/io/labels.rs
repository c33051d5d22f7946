use indexmap::IndexSet;

use crate::error::GraphError;
use crate::graph::Label;

/// Maps label strings to dense integer ids, separately for nodes and edges.
///
/// Ids are handed out in first-seen order. Sharing one interner between the
/// query and the target load is what makes their label ids comparable.
#[derive(Clone, Debug, Default)]
pub struct LabelInterner {
    node_labels: IndexSet<String>,
    edge_labels: IndexSet<String>,
}

impl LabelInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the node label `name`, allocating one on first sight.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyLabels`] once every `u32` id is taken.
    pub fn intern_node(&mut self, name: &str) -> Result<Label, GraphError> {
        intern(&mut self.node_labels, name, "node")
    }

    /// Id of the edge label `name`, allocating one on first sight.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyLabels`] once every `u32` id is taken.
    pub fn intern_edge(&mut self, name: &str) -> Result<Label, GraphError> {
        intern(&mut self.edge_labels, name, "edge")
    }

    #[must_use]
    pub fn node_label_name(&self, label: Label) -> Option<&str> {
        self.node_labels.get_index(label as usize).map(String::as_str)
    }

    #[must_use]
    pub fn edge_label_name(&self, label: Label) -> Option<&str> {
        self.edge_labels.get_index(label as usize).map(String::as_str)
    }

    #[must_use]
    pub fn num_node_labels(&self) -> usize {
        self.node_labels.len()
    }

    #[must_use]
    pub fn num_edge_labels(&self) -> usize {
        self.edge_labels.len()
    }
}

fn intern(set: &mut IndexSet<String>, name: &str, kind: &'static str) -> Result<Label, GraphError> {
    if let Some(index) = set.get_index_of(name) {
        return label_id(index, kind);
    }
    let id = label_id(set.len(), kind)?;
    set.insert(name.to_owned());
    Ok(id)
}

fn label_id(index: usize, kind: &'static str) -> Result<Label, GraphError> {
    Label::try_from(index).map_err(|_| GraphError::TooManyLabels { kind })
}
