use super::node::NodeId;
use super::tree::FileTree;
use crate::model::location;
use std::path::Path;

/// Selection and scrolling over a `FileTree`
#[derive(Debug)]
pub struct FileTreeView {
    /// The underlying tree model
    tree: FileTree,
    /// Currently selected node
    selected_node: Option<NodeId>,
    /// Scroll offset (index into visible nodes)
    scroll_offset: usize,
    /// Last known viewport height (for scrolling calculations)
    pub(crate) viewport_height: usize,
}

impl FileTreeView {
    /// Create a new file tree view
    pub fn new(tree: FileTree) -> Self {
        let selected_node = tree.roots().first().copied();
        Self {
            tree,
            selected_node,
            scroll_offset: 0,
            viewport_height: 10, // Default, will be updated during rendering
        }
    }

    /// Set the viewport height (should be called during rendering)
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.ensure_visible();
    }

    /// Get the underlying tree
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Get mutable reference to the underlying tree
    pub fn tree_mut(&mut self) -> &mut FileTree {
        &mut self.tree
    }

    /// Get currently visible nodes with their indent levels
    ///
    /// Returns a list of (NodeId, indent_level) tuples for rendering.
    pub fn get_display_nodes(&self) -> Vec<(NodeId, usize)> {
        self.tree
            .get_visible_nodes()
            .into_iter()
            .map(|id| (id, self.tree.get_depth(id)))
            .collect()
    }

    /// Get the currently selected node ID
    pub fn get_selected(&self) -> Option<NodeId> {
        self.selected_node
    }

    /// Select a node; its siblings are collapsed so only one branch stays open.
    ///
    /// Drives are never collapsed by selecting another drive.
    pub fn select(&mut self, id: NodeId) {
        let Some(node) = self.tree.get_node(id) else {
            return;
        };

        if let Some(parent) = node.parent {
            let siblings: Vec<NodeId> = self
                .tree
                .get_node(parent)
                .map(|p| p.children.clone())
                .unwrap_or_default();
            for sibling in siblings.into_iter().filter(|s| *s != id) {
                self.tree.collapse_node(sibling);
            }
        }

        self.selected_node = Some(id);
        self.ensure_visible();
    }

    /// Select the next visible node
    pub fn select_next(&mut self) {
        let visible = self.tree.get_visible_nodes();
        let next = match self.selected_index_in(&visible) {
            Some(pos) => visible.get(pos + 1).copied(),
            None => visible.first().copied(),
        };
        if let Some(id) = next {
            self.select(id);
        }
    }

    /// Select the previous visible node
    pub fn select_prev(&mut self) {
        let visible = self.tree.get_visible_nodes();
        let prev = match self.selected_index_in(&visible) {
            Some(pos) if pos > 0 => visible.get(pos - 1).copied(),
            Some(_) => None,
            None => visible.first().copied(),
        };
        if let Some(id) = prev {
            self.select(id);
        }
    }

    /// Move selection up by a page (viewport height)
    pub fn select_page_up(&mut self) {
        let visible = self.tree.get_visible_nodes();
        if let Some(pos) = self.selected_index_in(&visible) {
            let new_pos = pos.saturating_sub(self.viewport_height.max(1));
            self.select(visible[new_pos]);
        }
    }

    /// Move selection down by a page (viewport height)
    pub fn select_page_down(&mut self) {
        let visible = self.tree.get_visible_nodes();
        if let Some(pos) = self.selected_index_in(&visible) {
            let new_pos = (pos + self.viewport_height.max(1)).min(visible.len() - 1);
            self.select(visible[new_pos]);
        }
    }

    /// Show the selected node's children (or step into them if already shown)
    pub fn open_selected(&mut self) {
        let Some(id) = self.selected_node else {
            return;
        };
        let Some(node) = self.tree.get_node(id) else {
            return;
        };

        if node.is_open {
            if let Some(&first) = node.children.first() {
                self.select(first);
            }
        } else {
            self.tree.open_node(id);
            self.ensure_visible();
        }
    }

    /// Hide the selected node's children, or move to its parent
    pub fn close_selected(&mut self) {
        let Some(id) = self.selected_node else {
            return;
        };
        let Some(node) = self.tree.get_node(id) else {
            return;
        };

        if node.is_open && !node.children.is_empty() {
            self.tree.collapse_node(id);
        } else if let Some(parent) = node.parent {
            self.select(parent);
        }
    }

    /// Show the padlock on the selected node
    pub fn mark_selected_locked(&mut self) {
        if let Some(id) = self.selected_node {
            self.tree.mark_locked(id);
        }
    }

    /// Make the tree reflect `location`.
    ///
    /// Once a drive's label matches the first segment, collapses everything
    /// and walks down from that drive, expanding one level at a time and
    /// following the child whose label matches each later segment. Segments
    /// with no matching child are skipped. The deepest node reached is
    /// selected, opened and scrolled into view. A location with no segments,
    /// or with no matching drive, is ignored.
    pub fn synchronize(&mut self, location: &str) {
        let Some((root_label, segments)) = location::split_for_tree(location) else {
            return;
        };

        let Some(mut found) = self.tree.find_root(&root_label) else {
            tracing::debug!("No drive matches {:?}", root_label);
            return;
        };

        self.tree.collapse_all();
        self.tree.expand(found);

        for segment in &segments {
            if let Some(child) = self.tree.find_child(found, segment) {
                found = child;
                self.tree.expand(found);
            }
        }

        self.select(found);
        self.tree.open_node(found);
        self.reveal(found);
    }

    /// Open every ancestor of `id` and scroll it into view
    pub fn reveal(&mut self, id: NodeId) {
        let ancestors = self.tree.get_ancestors(id);
        for ancestor in ancestors.iter().take(ancestors.len().saturating_sub(1)) {
            self.tree.open_node(*ancestor);
        }
        self.ensure_visible();
    }

    /// Get the scroll offset
    pub fn get_scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Adjust the scroll offset so the selected node is within the viewport
    pub fn ensure_visible(&mut self) {
        if self.viewport_height == 0 {
            return;
        }

        let Some(pos) = self.get_selected_index() else {
            return;
        };

        if pos < self.scroll_offset {
            self.scroll_offset = pos;
        } else if pos >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = pos - self.viewport_height + 1;
        }
    }

    /// Path of the selected node
    pub fn get_selected_path(&self) -> Option<&Path> {
        self.selected_node
            .and_then(|id| self.tree.get_node(id))
            .and_then(|node| node.path.as_deref())
    }

    /// Get the index of the selected node in the visible list
    pub fn get_selected_index(&self) -> Option<usize> {
        self.selected_index_in(&self.tree.get_visible_nodes())
    }

    fn selected_index_in(&self, visible: &[NodeId]) -> Option<usize> {
        let selected = self.selected_node?;
        visible.iter().position(|&id| id == selected)
    }

    /// Get the number of visible nodes
    pub fn visible_count(&self) -> usize {
        self.tree.get_visible_nodes().len()
    }
}
