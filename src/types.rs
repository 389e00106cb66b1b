//! Various types shared by the preparation and evaluation stages.

/// The node identifier type.
pub type NodeId = String;

/// The edge type (layer) label.
pub type EdgeType = String;

/// The dense vocabulary index of a node.
pub type NodeIndex = usize;

/// The position of an edge type in declaration order.
pub type LayerId = usize;

/// An undirected edge as it appears in an edge file.
pub type Edge = (NodeId, NodeId);

/// A walk over one layer.
pub type Walk = Vec<NodeId>;

/// A skip-gram training pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrainingPair {
    pub center: NodeIndex,
    pub context: NodeIndex,
    pub layer: LayerId,
}

impl TrainingPair {
    pub fn new(center: NodeIndex, context: NodeIndex, layer: LayerId) -> Self {
        Self {
            center,
            context,
            layer,
        }
    }
}
