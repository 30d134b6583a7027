//! Directory contents pane
//!
//! Rendering a directory reads it through the `FileSystem` and keeps the
//! sorted entries for drawing. The renderer then reports the location it
//! loaded as a percent-encoded URL path; the caller decodes it when the
//! navigation completes.

use crate::model::filesystem::{DirEntry, FileSystem};
use crate::model::location;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Displays the contents of a directory
pub trait ContentRenderer: Send {
    /// Render `dir` and return the loaded location, percent-encoded
    fn render(&mut self, dir: &Path) -> io::Result<String>;
}

/// Lists a directory's entries: directories first, then files, each group
/// ordered by name ignoring case
pub struct DirectoryListing {
    fs: Arc<dyn FileSystem>,
    show_hidden: bool,
    location: Option<String>,
    entries: Vec<DirEntry>,
    scroll_offset: usize,
}

impl DirectoryListing {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            show_hidden: false,
            location: None,
            entries: Vec::new(),
            scroll_offset: 0,
        }
    }

    /// Builder: include dot-files
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Location last rendered
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.entries.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

impl ContentRenderer for DirectoryListing {
    fn render(&mut self, dir: &Path) -> io::Result<String> {
        let mut entries: Vec<DirEntry> = self
            .fs
            .read_dir(dir)?
            .into_iter()
            .filter(|e| self.show_hidden || !e.is_hidden())
            .collect();

        entries.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        let loaded = location::of_path(dir);
        tracing::debug!("Rendered {} ({} entries)", loaded, entries.len());

        self.entries = entries;
        self.scroll_offset = 0;
        self.location = Some(loaded.clone());
        Ok(location::encode(&loaded))
    }
}
