use super::node::{NodeId, NodeState, TreeNode};
use crate::model::filesystem::FileSystem;
use crate::model::location;
use crate::services::notifier::{Notifier, NOTIFICATION_TITLE};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory tree over all logical drives, loaded lazily
///
/// Drive nodes are created once by `initialize()`. A directory's children
/// are only read when the node is expanded, one level at a time; a node
/// that has not been read yet is `Collapsed` and shows an expander.
pub struct FileTree {
    /// All nodes indexed by ID
    nodes: HashMap<NodeId, TreeNode>,
    /// Drive nodes, in the order the host reported them
    roots: Vec<NodeId>,
    /// Next node ID to assign
    next_id: usize,
    fs: Arc<dyn FileSystem>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for FileTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTree")
            .field("roots", &self.roots)
            .field("node_count", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl FileTree {
    /// Create an empty tree; call `initialize()` to populate the drives
    pub fn new(fs: Arc<dyn FileSystem>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 0,
            fs,
            notifier,
        }
    }

    /// Create one node per logical drive.
    ///
    /// Drives that are ready get an expander; the others start expanded with
    /// no children.
    pub fn initialize(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.next_id = 0;

        let drives = match self.fs.drives() {
            Ok(drives) => drives,
            Err(e) => {
                tracing::warn!("Failed to enumerate drives: {}", e);
                self.notifier.error(NOTIFICATION_TITLE, &e.to_string());
                return;
            }
        };

        for drive in drives {
            let id = self.add_node(drive.label.clone(), Some(drive.path.clone()), None);
            if let Some(node) = self.get_node_mut(id) {
                node.drive = Some(drive.kind);
                if !drive.ready {
                    node.state = NodeState::Expanded;
                }
            }
            self.roots.push(id);
        }

        tracing::debug!("Initialized tree with {} drives", self.roots.len());
    }

    /// Drive nodes
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    fn get_node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&id)
    }

    /// Get all nodes
    pub fn all_nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    /// Get number of nodes currently in memory
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drive node with exactly this label
    pub fn find_root(&self, label: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|id| self.get_node(*id).is_some_and(|n| n.label == label))
    }

    /// Already-loaded child of `parent` with exactly this label
    pub fn find_child(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.get_node(parent)?
            .children
            .iter()
            .copied()
            .find(|id| self.get_node(*id).is_some_and(|n| n.label == label))
    }

    /// Enumerate the subdirectories of a collapsed node.
    ///
    /// Already expanded nodes are left alone. Failures never reach the caller:
    /// - access denied: the node becomes expanded, empty and locked
    /// - path gone: the user is notified and the node is not touched
    /// - anything else: the user is notified and the node is not touched
    ///
    /// Each new child gets an expander only if it has subdirectories of its
    /// own. A child that cannot be probed is still added, without expander.
    pub fn expand(&mut self, id: NodeId) {
        let Some(node) = self.get_node(id) else {
            return;
        };
        if node.is_expanded() {
            return;
        }
        let Some(path) = node.path.clone() else {
            return;
        };

        let subdirs = match self.fs.list_subdirectories(&path) {
            Ok(subdirs) => subdirs,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::debug!("Access denied expanding {:?}", path);
                if let Some(node) = self.get_node_mut(id) {
                    node.locked = true;
                    node.state = NodeState::Expanded;
                }
                return;
            }
            Err(e) => {
                self.notify_failure(&path, &e);
                return;
            }
        };

        let mut child_ids = Vec::with_capacity(subdirs.len());
        for subdir in subdirs {
            let label = location::file_name(&location::of_path(&subdir));

            let (state, locked) = self.probe(&subdir);
            let child_id = self.add_node(label, Some(subdir), Some(id));
            if let Some(child) = self.get_node_mut(child_id) {
                child.state = state;
                child.locked = locked;
            }
            child_ids.push(child_id);
        }

        tracing::debug!("Expanded {:?} with {} children", path, child_ids.len());

        if let Some(node) = self.get_node_mut(id) {
            node.children = child_ids;
            node.state = NodeState::Expanded;
        }
    }

    /// Expand a node and show its children
    pub fn open_node(&mut self, id: NodeId) {
        self.expand(id);
        if let Some(node) = self.get_node_mut(id) {
            node.is_open = true;
        }
    }

    /// Hide a node's children; loaded children are kept
    pub fn collapse_node(&mut self, id: NodeId) {
        if let Some(node) = self.get_node_mut(id) {
            node.is_open = false;
        }
    }

    /// Hide the children of every node
    pub fn collapse_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.is_open = false;
        }
    }

    /// Open a closed node, close an open one
    pub fn toggle_node(&mut self, id: NodeId) {
        match self.get_node(id) {
            Some(node) if node.is_open => self.collapse_node(id),
            Some(_) => self.open_node(id),
            None => {}
        }
    }

    /// Drop a node's children and enumerate it again from scratch.
    ///
    /// This is the only way a locked node is retried.
    pub fn refresh_node(&mut self, id: NodeId) {
        let Some(node) = self.get_node(id) else {
            return;
        };
        let was_open = node.is_open;
        let is_drive = node.is_drive();
        let path = node.path.clone();
        let children = node.children.clone();

        for child_id in children {
            self.remove_node_recursive(child_id);
        }

        let (state, locked) = match &path {
            Some(path) if is_drive => {
                let ready = self.fs.is_dir(path);
                (Self::state_for(ready), false)
            }
            Some(path) => self.probe(path),
            None => (NodeState::Expanded, false),
        };

        if let Some(node) = self.get_node_mut(id) {
            node.children.clear();
            node.state = state;
            node.locked = locked;
            node.is_open = false;
        }

        if was_open {
            self.open_node(id);
        }
    }

    /// Show the padlock on a node
    pub fn mark_locked(&mut self, id: NodeId) {
        if let Some(node) = self.get_node_mut(id) {
            node.locked = true;
        }
    }

    /// Get all visible nodes in tree order
    ///
    /// Returns a flat list of nodes that should be visible, respecting
    /// the open state of their ancestors.
    pub fn get_visible_nodes(&self) -> Vec<NodeId> {
        let mut visible = Vec::new();
        for &root in &self.roots {
            self.collect_visible_recursive(root, &mut visible);
        }
        visible
    }

    fn collect_visible_recursive(&self, id: NodeId, visible: &mut Vec<NodeId>) {
        visible.push(id);

        if let Some(node) = self.get_node(id) {
            if node.is_open {
                for &child_id in &node.children {
                    self.collect_visible_recursive(child_id, visible);
                }
            }
        }
    }

    /// Get the parent chain for a node (from drive to node)
    pub fn get_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            ancestors.push(node_id);
            current = self.get_node(node_id).and_then(|n| n.parent);
        }

        ancestors.reverse();
        ancestors
    }

    /// Get the depth of a node (drives are 0)
    pub fn get_depth(&self, id: NodeId) -> usize {
        self.get_ancestors(id).len().saturating_sub(1)
    }

    /// Decide whether a freshly found directory gets an expander
    fn probe(&self, path: &Path) -> (NodeState, bool) {
        match self.fs.has_subdirectories(path) {
            Ok(has_subdirs) => (Self::state_for(has_subdirs), false),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => (NodeState::Expanded, true),
            Err(e) => {
                self.notify_failure(path, &e);
                (NodeState::Expanded, false)
            }
        }
    }

    fn state_for(has_children: bool) -> NodeState {
        if has_children {
            NodeState::Collapsed
        } else {
            NodeState::Expanded
        }
    }

    fn notify_failure(&self, path: &Path, e: &io::Error) {
        tracing::warn!("Failed to enumerate {:?}: {}", path, e);
        let message = format!("{}: {}", location::of_path(path), e);
        self.notifier.error(NOTIFICATION_TITLE, &message);
    }

    fn add_node(&mut self, label: String, path: Option<PathBuf>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, TreeNode::new(id, label, path, parent));
        id
    }

    fn remove_node_recursive(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child_id in node.children {
                self.remove_node_recursive(child_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filesystem::DriveKind;
    use crate::model::memory_fs::MemoryFileSystem;
    use crate::services::notifier::RecordingNotifier;
    use crate::view::file_tree::node::NodeIcon;

    fn create_test_tree() -> (Arc<MemoryFileSystem>, Arc<RecordingNotifier>, FileTree) {
        // C:\
        // ├── Users/
        // │   ├── alice/
        // │   └── bob/
        // │       └── Documents/
        // ├── Windows/
        // └── pagefile.sys
        // D:\ (not ready)
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_drive("C:", DriveKind::Fixed, true)
            .add_drive("D:", DriveKind::CdRom, false)
            .add_dir("C:/Users/alice")
            .add_dir("C:/Users/bob/Documents")
            .add_dir("C:/Windows")
            .add_file("C:/pagefile.sys", 4096);

        let notifier = Arc::new(RecordingNotifier::new());
        let mut tree = FileTree::new(fs.clone(), notifier.clone());
        tree.initialize();
        (fs, notifier, tree)
    }

    fn child(tree: &FileTree, parent: NodeId, label: &str) -> NodeId {
        tree.find_child(parent, label).unwrap()
    }

    #[test]
    fn test_initialize_drives() {
        let (_fs, _notifier, tree) = create_test_tree();

        assert_eq!(tree.roots().len(), 2);
        let c = tree.get_node(tree.roots()[0]).unwrap();
        let d = tree.get_node(tree.roots()[1]).unwrap();

        assert_eq!(c.label, "C:\\");
        assert_eq!(c.icon(), NodeIcon::Drive(DriveKind::Fixed));
        assert!(c.has_expander());

        assert_eq!(d.label, "D:\\");
        assert_eq!(d.icon(), NodeIcon::Drive(DriveKind::CdRom));
        assert!(!d.has_expander());
    }

    #[test]
    fn test_expand_drive() {
        let (_fs, notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();

        tree.expand(c);

        let node = tree.get_node(c).unwrap();
        assert!(node.is_expanded());
        let labels: Vec<_> = node
            .children
            .iter()
            .map(|id| tree.get_node(*id).unwrap().label.clone())
            .collect();
        assert_eq!(labels, vec!["Users", "Windows"]);

        let users = tree.get_node(child(&tree, c, "Users")).unwrap();
        assert!(users.is_collapsed(), "Users has subdirectories");
        assert_eq!(users.icon(), NodeIcon::Folder);

        let windows = tree.get_node(child(&tree, c, "Windows")).unwrap();
        assert!(windows.is_expanded());
        assert!(!windows.has_expander(), "Windows has no subdirectories");

        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_expand_is_noop_once_expanded() {
        let (_fs, _notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();

        tree.expand(c);
        let count = tree.node_count();
        tree.expand(c);

        assert_eq!(tree.node_count(), count);
    }

    #[test]
    fn test_expand_denied_locks_node() {
        let (fs, notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();
        tree.expand(c);
        let users = child(&tree, c, "Users");

        fs.deny("C:/Users");
        tree.expand(users);

        let node = tree.get_node(users).unwrap();
        assert_eq!(node.icon(), NodeIcon::Locked);
        assert!(node.is_expanded());
        assert!(node.children.is_empty());
        assert_eq!(notifier.count(), 0);

        // Not retried on a later expand
        fs.allow("C:/Users");
        tree.expand(users);
        assert!(tree.get_node(users).unwrap().children.is_empty());
    }

    #[test]
    fn test_denied_child_is_locked_without_expander() {
        let (fs, notifier, mut tree) = create_test_tree();
        fs.deny("C:/Windows");
        let c = tree.find_root("C:\\").unwrap();

        tree.expand(c);

        let windows = tree.get_node(child(&tree, c, "Windows")).unwrap();
        assert_eq!(windows.icon(), NodeIcon::Locked);
        assert!(!windows.has_expander());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_expand_missing_path_notifies() {
        let (fs, notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();
        tree.expand(c);
        let users = child(&tree, c, "Users");

        fs.remove("C:/Users");
        tree.expand(users);

        let node = tree.get_node(users).unwrap();
        assert!(node.children.is_empty());
        assert!(node.is_collapsed(), "aborted expansion leaves the node as it was");
        assert_eq!(notifier.count(), 1);
        assert!(notifier.any_contains("C:/Users"));
    }

    #[test]
    fn test_failing_child_is_still_added() {
        let (fs, notifier, mut tree) = create_test_tree();
        fs.fail("C:/Users", "The device is not ready.");
        let c = tree.find_root("C:\\").unwrap();

        tree.expand(c);

        let node = tree.get_node(c).unwrap();
        assert_eq!(node.children.len(), 2);
        let users = tree.get_node(child(&tree, c, "Users")).unwrap();
        assert_eq!(users.path, Some(PathBuf::from("C:/Users")));
        assert!(!users.has_expander());
        assert_eq!(notifier.count(), 1);
        assert!(notifier.any_contains("The device is not ready."));
    }

    #[test]
    fn test_dot_directories_are_children() {
        let (fs, notifier, mut tree) = create_test_tree();
        fs.add_dir("C:/.git/objects");

        let c = tree.find_root("C:\\").unwrap();
        tree.expand(c);

        let subdirs = fs.list_subdirectories(Path::new("C:/")).unwrap();
        assert_eq!(tree.get_node(c).unwrap().children.len(), subdirs.len());
        let git = tree.get_node(child(&tree, c, ".git")).unwrap();
        assert!(git.has_expander());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_visible_nodes_follow_open_state() {
        let (_fs, _notifier, mut tree) = create_test_tree();
        assert_eq!(tree.get_visible_nodes().len(), 2);

        let c = tree.find_root("C:\\").unwrap();
        tree.open_node(c);
        assert_eq!(tree.get_visible_nodes().len(), 4);

        let users = child(&tree, c, "Users");
        tree.open_node(users);
        assert_eq!(tree.get_visible_nodes().len(), 6);

        tree.collapse_all();
        assert_eq!(tree.get_visible_nodes().len(), 2);
        // Loaded children survive a collapse
        assert_eq!(tree.get_node(users).unwrap().children.len(), 2);
    }

    #[test]
    fn test_toggle_node() {
        let (_fs, _notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();

        tree.toggle_node(c);
        assert!(tree.get_node(c).unwrap().is_open);

        tree.toggle_node(c);
        assert!(!tree.get_node(c).unwrap().is_open);
    }

    #[test]
    fn test_refresh_node_retries_locked() {
        let (fs, _notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();
        tree.open_node(c);
        let users = child(&tree, c, "Users");

        fs.deny("C:/Users");
        tree.open_node(users);
        assert!(tree.get_node(users).unwrap().locked);

        fs.allow("C:/Users");
        fs.add_dir("C:/Users/carol");
        tree.refresh_node(users);

        let node = tree.get_node(users).unwrap();
        assert!(!node.locked);
        assert!(node.is_open);
        assert_eq!(node.children.len(), 3);
    }

    #[test]
    fn test_refresh_drops_stale_children() {
        let (fs, _notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();
        tree.open_node(c);
        let before = tree.node_count();

        fs.remove("C:/Windows");
        tree.refresh_node(c);

        assert_eq!(tree.node_count(), before - 1);
        assert!(tree.find_child(c, "Windows").is_none());
    }

    #[test]
    fn test_ancestors_and_depth() {
        let (_fs, _notifier, mut tree) = create_test_tree();
        let c = tree.find_root("C:\\").unwrap();
        tree.expand(c);
        let users = child(&tree, c, "Users");
        tree.expand(users);
        let bob = child(&tree, users, "bob");

        assert_eq!(tree.get_ancestors(bob), vec![c, users, bob]);
        assert_eq!(tree.get_depth(c), 0);
        assert_eq!(tree.get_depth(bob), 2);
    }
}
