//! Back/forward history of visited locations
//!
//! Works like a browser: the history is a stack with a current index.
//! Visiting a new location while somewhere in the middle of the stack drops
//! everything after the current entry.

/// Default number of locations kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    /// Visited locations, oldest first
    entries: Vec<String>,

    /// Points to the current location
    current_index: Option<usize>,

    /// Maximum number of entries to keep
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a new history with default max entries (100)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new history with specified max entries
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            current_index: None,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a visited location
    ///
    /// Forward history is truncated first, even if the location turns out to
    /// be the current one again.
    pub fn push(&mut self, location: &str) {
        if let Some(current_idx) = self.current_index {
            self.entries.truncate(current_idx + 1);
        }

        // Don't add duplicate consecutive entries
        if self.current() == Some(location) {
            return;
        }

        self.entries.push(location.to_string());

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }

        self.current_index = Some(self.entries.len() - 1);
    }

    /// Location one step back, without moving
    pub fn peek_back(&self) -> Option<&str> {
        let idx = self.current_index?.checked_sub(1)?;
        self.entries.get(idx).map(String::as_str)
    }

    /// Location one step forward, without moving
    pub fn peek_forward(&self) -> Option<&str> {
        let idx = self.current_index? + 1;
        self.entries.get(idx).map(String::as_str)
    }

    /// Step back; returns the new current location
    pub fn back(&mut self) -> Option<&str> {
        let idx = self.current_index?.checked_sub(1)?;
        self.current_index = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// Step forward; returns the new current location
    pub fn forward(&mut self) -> Option<&str> {
        let idx = self.current_index? + 1;
        if idx >= self.entries.len() {
            return None;
        }
        self.current_index = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.peek_back().is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.peek_forward().is_some()
    }

    /// Get the current location
    pub fn current(&self) -> Option<&str> {
        self.current_index
            .and_then(|idx| self.entries.get(idx))
            .map(String::as_str)
    }

    /// Get the number of entries in history
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
