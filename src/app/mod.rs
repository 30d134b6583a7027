//! Explorer controller
//!
//! Every user action arrives here as a `Command`. Navigation always follows
//! the same path: resolve the target, render it, then treat the renderer's
//! reported location as a completed navigation, which updates the address
//! bar, re-synchronizes the tree and recounts the status bar.

#[cfg(feature = "runtime")]
pub mod input;

use crate::config::Config;
use crate::model::environment::Environment;
use crate::model::filesystem::FileSystem;
use crate::model::location;
use crate::nav::Navigator;
use crate::services::notifier::{Notifier, NOTIFICATION_TITLE};
use crate::view::address_bar::AddressBar;
use crate::view::file_tree::{FileTree, FileTreeView, NodeId};
use crate::view::listing::ContentRenderer;
use crate::view::status::StatusReport;
use std::io;
use std::sync::Arc;

/// Pane receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    AddressBar,
    Listing,
}

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Go to whatever was typed
    Navigate(String),
    /// Navigate to the address bar text
    SubmitAddress,
    Back,
    Forward,
    Up,
    Refresh,
    /// Double-click / Enter on a tree node
    ActivateNode(NodeId),
    ExpandNode(NodeId),
    CollapseNode(NodeId),
    SelectNode(NodeId),
    /// Re-read a node's children from scratch
    RefreshNode(NodeId),
    Focus(Focus),
}

/// The file explorer: tree, navigator, content pane and status bar
pub struct Explorer<R: ContentRenderer> {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn Environment>,
    notifier: Arc<dyn Notifier>,
    navigator: Navigator,
    renderer: R,
    tree_view: FileTreeView,
    address: AddressBar,
    status: Option<StatusReport>,
    current: Option<String>,
    focus: Focus,
}

impl<R: ContentRenderer> Explorer<R> {
    /// Build the explorer and enumerate the drives
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn Environment>,
        notifier: Arc<dyn Notifier>,
        renderer: R,
        config: &Config,
    ) -> Self {
        let mut tree = FileTree::new(fs.clone(), notifier.clone());
        tree.initialize();

        let navigator = Navigator::new(fs.clone(), env.clone(), notifier.clone())
            .with_history_limit(config.history_limit);

        Self {
            fs,
            env,
            notifier,
            navigator,
            renderer,
            tree_view: FileTreeView::new(tree),
            address: AddressBar::new(),
            status: None,
            current: None,
            focus: Focus::Tree,
        }
    }

    /// Navigate to the first location.
    ///
    /// `start` wins when given; otherwise the home directory, otherwise the
    /// first drive.
    pub fn start(&mut self, start: Option<&str>) {
        let target = start
            .map(str::to_string)
            .or_else(|| self.env.home_dir().map(|home| location::of_path(&home)))
            .or_else(|| {
                let tree = self.tree_view.tree();
                tree.roots()
                    .first()
                    .and_then(|id| tree.get_node(*id))
                    .and_then(|node| node.path.as_deref())
                    .map(location::of_path)
            });

        match target {
            Some(target) => {
                tracing::info!("Starting at {}", target);
                self.navigate(&target);
            }
            None => tracing::warn!("No start location available"),
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        tracing::trace!("Command: {:?}", command);
        match command {
            Command::Navigate(input) => self.navigate(&input),
            Command::SubmitAddress => self.submit_address(),
            Command::Back => self.back(),
            Command::Forward => self.forward(),
            Command::Up => self.up(),
            Command::Refresh => self.refresh(),
            Command::ActivateNode(id) => self.activate_node(id),
            Command::ExpandNode(id) => self.tree_view.tree_mut().open_node(id),
            Command::CollapseNode(id) => self.tree_view.tree_mut().collapse_node(id),
            Command::SelectNode(id) => self.tree_view.select(id),
            Command::RefreshNode(id) => self.tree_view.tree_mut().refresh_node(id),
            Command::Focus(focus) => self.focus = focus,
        }
    }

    /// Navigate to typed input (literal path, or with placeholders expanded)
    pub fn navigate(&mut self, input: &str) {
        if let Some(target) = self.navigator.resolve(input) {
            match self.render(&target) {
                Ok(raw) => {
                    let loaded = self.navigation_completed(&raw);
                    self.navigator.visit(&loaded);
                }
                Err(e) => self.report(&target, &e),
            }
        }
        self.focus = Focus::Tree;
    }

    /// Navigate to the address bar text
    pub fn submit_address(&mut self) {
        let input = self.address.text().to_string();
        self.navigate(&input);
    }

    pub fn back(&mut self) {
        if let Some(target) = self.navigator.peek_back() {
            match self.render(&target) {
                Ok(raw) => {
                    self.navigator.back();
                    self.navigation_completed(&raw);
                }
                Err(e) => self.report(&target, &e),
            }
        }
        self.focus = Focus::Tree;
    }

    pub fn forward(&mut self) {
        if let Some(target) = self.navigator.peek_forward() {
            match self.render(&target) {
                Ok(raw) => {
                    self.navigator.forward();
                    self.navigation_completed(&raw);
                }
                Err(e) => self.report(&target, &e),
            }
        }
        self.focus = Focus::Tree;
    }

    /// Go to the parent of the current location, if any
    pub fn up(&mut self) {
        let parent = self
            .current
            .as_deref()
            .and_then(|current| self.navigator.parent_of(current));

        if let Some(parent) = parent {
            match self.render(&parent) {
                Ok(raw) => {
                    let loaded = self.navigation_completed(&raw);
                    self.navigator.visit(&loaded);
                }
                Err(e) => self.report(&parent, &e),
            }
        }
        self.focus = Focus::Tree;
    }

    /// Render the current location again; history is untouched
    pub fn refresh(&mut self) {
        if let Some(current) = self.current.clone() {
            match self.render(&current) {
                Ok(raw) => {
                    self.navigation_completed(&raw);
                }
                Err(e) => self.report(&current, &e),
            }
        }
        self.focus = Focus::Tree;
    }

    /// Navigate to a tree node's directory.
    ///
    /// If the directory refuses to be listed the node is shown locked
    /// instead of raising a notification.
    pub fn activate_node(&mut self, id: NodeId) {
        let Some(path) = self
            .tree_view
            .tree()
            .get_node(id)
            .and_then(|node| node.path.clone())
        else {
            return;
        };

        self.tree_view.select(id);
        let target = location::of_path(&path);
        match self.render(&target) {
            Ok(raw) => {
                let loaded = self.navigation_completed(&raw);
                self.navigator.visit(&loaded);
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::debug!("Access denied opening {}", target);
                self.tree_view.tree_mut().mark_locked(id);
            }
            Err(e) => self.report(&target, &e),
        }
    }

    /// Handle the location the renderer reports after loading.
    ///
    /// The raw location is decoded to a fixed point, shown in the address bar,
    /// mirrored in the tree and counted for the status bar. Returns the
    /// decoded location.
    pub fn navigation_completed(&mut self, raw: &str) -> String {
        let loaded = location::from_url_path(&location::decode(raw));
        tracing::debug!("Navigation completed: {}", loaded);

        self.address.set_location(&loaded);
        self.tree_view.synchronize(&loaded);

        let status = StatusReport::compute(self.fs.as_ref(), &location::to_path(&loaded));
        if status == StatusReport::Locked {
            self.tree_view.mark_selected_locked();
        }
        self.status = Some(status);
        self.current = Some(loaded.clone());
        loaded
    }

    fn render(&mut self, target: &str) -> io::Result<String> {
        self.renderer.render(&location::to_path(target))
    }

    fn report(&self, target: &str, e: &io::Error) {
        tracing::warn!("Failed to open {}: {}", target, e);
        self.notifier
            .error(NOTIFICATION_TITLE, &format!("{target}: {e}"));
    }

    pub fn current_location(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Status bar text; empty before the first navigation
    pub fn status_text(&self) -> String {
        self.status.map(|s| s.to_string()).unwrap_or_default()
    }

    pub fn status(&self) -> Option<StatusReport> {
        self.status
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn can_go_back(&self) -> bool {
        self.navigator.history().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.navigator.history().can_go_forward()
    }

    pub fn address(&self) -> &AddressBar {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut AddressBar {
        &mut self.address
    }

    pub fn tree_view(&self) -> &FileTreeView {
        &self.tree_view
    }

    pub fn tree_view_mut(&mut self) -> &mut FileTreeView {
        &mut self.tree_view
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
