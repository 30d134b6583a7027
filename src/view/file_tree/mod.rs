// Directory tree of drives and folders
//
// Drives are enumerated once; folders are read one level at a time when a
// node is first expanded. The view keeps the selection in step with the
// current location.

pub mod node;
pub mod tree;
pub mod view;

pub use node::{NodeIcon, NodeId, NodeState, TreeNode};
pub use tree::FileTree;
pub use view::FileTreeView;
