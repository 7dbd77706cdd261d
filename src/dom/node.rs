//! Node storage for the headless document.

use indexmap::{IndexMap, IndexSet};

use crate::config::ConfigValue;
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeKind {
    Element { local_name: String },
    Text(String),
}

/// One arena slot. Element-only fields stay empty on text nodes.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub id: Option<String>,
    pub classes: IndexSet<String>,
    /// Kebab-case property -> value.
    pub style: IndexMap<String, String>,
    pub attributes: IndexMap<String, String>,
    pub properties: IndexMap<String, ConfigValue>,
}

impl NodeData {
    pub fn element(local_name: String) -> Self {
        Self::with_kind(NodeKind::Element { local_name })
    }

    pub fn text(content: String) -> Self {
        Self::with_kind(NodeKind::Text(content))
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            id: None,
            classes: IndexSet::new(),
            style: IndexMap::new(),
            attributes: IndexMap::new(),
            properties: IndexMap::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn local_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { local_name } => Some(local_name),
            NodeKind::Text(_) => None,
        }
    }
}
