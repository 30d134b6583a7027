//! Resolves what the user typed into a directory and keeps the history

use super::history::History;
use crate::model::environment::Environment;
use crate::model::filesystem::FileSystem;
use crate::model::location;
use crate::services::notifier::{Notifier, NOTIFICATION_TITLE};
use std::sync::Arc;

/// Message shown when neither the typed text nor its expansion is a directory
pub fn cannot_find_message(input: &str) -> String {
    format!("Can't find '{input}' check the path and try again")
}

/// Owns the history of visited locations and turns address-bar input into
/// locations
pub struct Navigator {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn Environment>,
    notifier: Arc<dyn Notifier>,
    history: History,
}

impl Navigator {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn Environment>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            fs,
            env,
            notifier,
            history: History::new(),
        }
    }

    /// Builder: bound the number of remembered locations
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::with_capacity(limit);
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Turn address-bar input into an existing directory location.
    ///
    /// The literal text is tried first (a bare `C:` gains its separator),
    /// then the text with environment placeholders expanded. If neither is
    /// an existing absolute directory the user is told and `None` returned.
    pub fn resolve(&self, input: &str) -> Option<String> {
        if let Some(found) = self.existing_dir(input) {
            return Some(found);
        }

        let expanded = self.env.expand(input);
        if expanded != input {
            if let Some(found) = self.existing_dir(&expanded) {
                tracing::debug!("Resolved {:?} to {:?}", input, found);
                return Some(found);
            }
        }

        tracing::debug!("Cannot resolve {:?}", input);
        self.notifier
            .error(NOTIFICATION_TITLE, &cannot_find_message(input));
        None
    }

    fn existing_dir(&self, candidate: &str) -> Option<String> {
        let normalized = location::normalize(candidate);
        // Relative input has no place in the tree
        location::split_for_tree(&normalized)?;
        self.fs
            .is_dir(&location::to_path(&normalized))
            .then_some(normalized)
    }

    /// Parent of `current`, if it has one
    pub fn parent_of(&self, current: &str) -> Option<String> {
        self.fs
            .parent_of(&location::to_path(current))
            .map(|p| location::of_path(&p))
    }

    /// Record a location reached by a new navigation
    pub fn visit(&mut self, location: &str) {
        self.history.push(location);
    }

    /// Where `back` would go
    pub fn peek_back(&self) -> Option<String> {
        self.history.peek_back().map(str::to_string)
    }

    /// Where `forward` would go
    pub fn peek_forward(&self) -> Option<String> {
        self.history.peek_forward().map(str::to_string)
    }

    /// Step back in history; no-op at the start
    pub fn back(&mut self) -> Option<String> {
        self.history.back().map(str::to_string)
    }

    /// Step forward in history; no-op at the end
    pub fn forward(&mut self) -> Option<String> {
        self.history.forward().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::environment::MapEnvironment;
    use crate::model::filesystem::DriveKind;
    use crate::model::memory_fs::MemoryFileSystem;
    use crate::services::notifier::RecordingNotifier;

    fn navigator() -> (Arc<RecordingNotifier>, Navigator) {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_drive("C:", DriveKind::Fixed, true)
            .add_dir("C:/Users/bob/AppData/Local/Temp")
            .add_file("C:/Users/bob/notes.txt", 5);
        let env = Arc::new(
            MapEnvironment::new()
                .with_var("TEMP", "C:\\Users\\bob\\AppData\\Local\\Temp")
                .with_home("C:/Users/bob"),
        );
        let notifier = Arc::new(RecordingNotifier::new());
        (notifier.clone(), Navigator::new(fs, env, notifier))
    }

    #[test]
    fn test_resolve_literal() {
        let (notifier, nav) = navigator();
        assert_eq!(nav.resolve("C:\\Users\\bob"), Some("C:/Users/bob".to_string()));
        assert_eq!(nav.resolve("C:"), Some("C:/".to_string()));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_resolve_expands_placeholders() {
        let (notifier, nav) = navigator();
        assert_eq!(
            nav.resolve("%TEMP%"),
            Some("C:/Users/bob/AppData/Local/Temp".to_string())
        );
        assert_eq!(nav.resolve("~/AppData"), Some("C:/Users/bob/AppData".to_string()));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_resolve_failure_notifies_with_input() {
        let (notifier, nav) = navigator();

        assert_eq!(nav.resolve("Z:\\nonexistent"), None);
        assert_eq!(nav.resolve("C:/Users/bob/notes.txt"), None);
        assert_eq!(nav.resolve("Users"), None);

        let notifications = notifier.notifications();
        assert_eq!(notifications.len(), 3);
        assert_eq!(notifications[0].title, "File Explorer");
        assert_eq!(
            notifications[0].message,
            "Can't find 'Z:\\nonexistent' check the path and try again"
        );
    }

    #[test]
    fn test_parent_of() {
        let (_notifier, nav) = navigator();
        assert_eq!(nav.parent_of("C:/Users/bob"), Some("C:/Users".to_string()));
        assert_eq!(nav.parent_of("C:/"), None);
    }

    #[test]
    fn test_history_steps() {
        let (_notifier, mut nav) = navigator();
        assert_eq!(nav.back(), None);

        nav.visit("C:/");
        nav.visit("C:/Users");
        assert_eq!(nav.peek_back(), Some("C:/".to_string()));
        assert_eq!(nav.back(), Some("C:/".to_string()));
        assert_eq!(nav.forward(), Some("C:/Users".to_string()));
        assert_eq!(nav.forward(), None);
        assert_eq!(nav.history().len(), 2);
    }

    #[test]
    fn test_history_limit() {
        let (_notifier, nav) = navigator();
        let mut nav = nav.with_history_limit(2);
        nav.visit("C:/");
        nav.visit("C:/Users");
        nav.visit("C:/Users/bob");
        assert_eq!(nav.history().len(), 2);
    }
}
