use crate::model::filesystem::DriveKind;
use std::fmt;
use std::path::PathBuf;

/// Unique identifier for a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Enumeration state of a node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Children not yet enumerated; the node shows an expander
    Collapsed,
    /// Children enumerated (possibly none)
    Expanded,
}

/// Icon class shown next to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIcon {
    Drive(DriveKind),
    Folder,
    Locked,
}

/// A drive or directory in the tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Unique identifier
    pub id: NodeId,
    /// Display label (`C:\`, `/` or the directory name)
    pub label: String,
    /// Directory this node stands for
    pub path: Option<PathBuf>,
    /// Drive classification, for top-level nodes
    pub drive: Option<DriveKind>,
    /// Enumeration was refused by the host
    pub locked: bool,
    /// Parent node ID (None for drives)
    pub parent: Option<NodeId>,
    /// Child node IDs, in display order
    pub children: Vec<NodeId>,
    /// Whether the children have been enumerated
    pub state: NodeState,
    /// Whether the children are currently shown
    pub is_open: bool,
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(id: NodeId, label: String, path: Option<PathBuf>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            label,
            path,
            drive: None,
            locked: false,
            parent,
            children: Vec::new(),
            state: NodeState::Collapsed,
            is_open: false,
        }
    }

    /// Icon class derived from the drive kind and lock flag
    pub fn icon(&self) -> NodeIcon {
        if self.locked {
            NodeIcon::Locked
        } else {
            self.drive.map(NodeIcon::Drive).unwrap_or(NodeIcon::Folder)
        }
    }

    /// Check if this node is expanded
    pub fn is_expanded(&self) -> bool {
        self.state == NodeState::Expanded
    }

    /// Check if this node is collapsed
    pub fn is_collapsed(&self) -> bool {
        self.state == NodeState::Collapsed
    }

    /// Whether the node offers an expand affordance
    pub fn has_expander(&self) -> bool {
        self.is_collapsed() || !self.children.is_empty()
    }

    pub fn is_drive(&self) -> bool {
        self.drive.is_some()
    }
}
