use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Opaque node label. Nodes carry no structure beyond their name; identity is
/// plain equality, and the ordering only exists so labels can key canonical
/// link pairs and sorted output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(label: impl Into<String>) -> Self {
        NodeId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        NodeId(label.to_string())
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        NodeId(label)
    }
}
