// Test explorers over in-memory and on-disk directory trees

use explorer::app::Explorer;
use explorer::config::Config;
use explorer::model::environment::MapEnvironment;
use explorer::model::filesystem::{DriveKind, StdFileSystem};
use explorer::model::memory_fs::MemoryFileSystem;
use explorer::services::notifier::RecordingNotifier;
use explorer::view::listing::DirectoryListing;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const HOME: &str = "C:/Users/bob";
pub const TEMP: &str = "C:/Users/bob/AppData/Local/Temp";

/// An explorer over a small two-drive machine.
///
/// ```text
/// C:\ (ready)
/// ├── Users/bob/
/// │   ├── AppData/Local/Temp/  (2 files)
/// │   ├── Documents/
/// │   ├── Projects/rust/
/// │   └── notes.txt
/// └── Windows/System32/
/// D:\ (not ready)
/// ```
pub struct ExplorerFixture {
    pub fs: Arc<MemoryFileSystem>,
    pub notifier: Arc<RecordingNotifier>,
    pub explorer: Explorer<DirectoryListing>,
}

impl ExplorerFixture {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_drive("C:", DriveKind::Fixed, true)
            .add_drive("D:", DriveKind::CdRom, false)
            .add_dir("C:/Users/bob/Documents")
            .add_dir("C:/Users/bob/Projects/rust")
            .add_file("C:/Users/bob/notes.txt", 12)
            .add_file("C:/Users/bob/AppData/Local/Temp/a.tmp", 1)
            .add_file("C:/Users/bob/AppData/Local/Temp/b.tmp", 2)
            .add_dir("C:/Windows/System32");

        let env = Arc::new(
            MapEnvironment::new()
                .with_home(HOME)
                .with_var("TEMP", TEMP)
                .with_var("USERPROFILE", HOME),
        );
        let notifier = Arc::new(RecordingNotifier::new());
        let listing = DirectoryListing::new(fs.clone()).with_show_hidden(config.show_hidden);
        let explorer = Explorer::new(fs.clone(), env, notifier.clone(), listing, config);

        Self {
            fs,
            notifier,
            explorer,
        }
    }

    /// Label of the selected tree node
    pub fn selected_label(&self) -> Option<String> {
        let view = self.explorer.tree_view();
        let id = view.get_selected()?;
        view.tree().get_node(id).map(|n| n.label.clone())
    }

    /// Labels of the visible tree rows, indented two spaces per level
    pub fn visible_rows(&self) -> Vec<String> {
        let view = self.explorer.tree_view();
        view.get_display_nodes()
            .into_iter()
            .filter_map(|(id, depth)| {
                view.tree()
                    .get_node(id)
                    .map(|n| format!("{}{}", "  ".repeat(depth), n.label))
            })
            .collect()
    }
}

/// A real directory tree on disk
///
/// ```text
/// explorer-XXXX/
/// ├── alpha/nested/
/// ├── beta/
/// ├── with space/
/// └── readme.txt
/// ```
pub struct TempTree {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl TempTree {
    pub fn new() -> anyhow::Result<Self> {
        // A dot-prefixed name would be hidden from the tree
        let temp_dir = tempfile::Builder::new().prefix("explorer-").tempdir()?;
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join("alpha/nested"))?;
        fs::create_dir(root.join("beta"))?;
        fs::create_dir(root.join("with space"))?;
        fs::write(root.join("readme.txt"), "hello")?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// An explorer over the host filesystem
    pub fn explorer(&self) -> (Arc<RecordingNotifier>, Explorer<DirectoryListing>) {
        let fs = Arc::new(StdFileSystem);
        let notifier = Arc::new(RecordingNotifier::new());
        let env = Arc::new(MapEnvironment::new().with_var(
            "EXPLORER_TEST_ROOT",
            &self.root.to_string_lossy(),
        ));
        let explorer = Explorer::new(
            fs.clone(),
            env,
            notifier.clone(),
            DirectoryListing::new(fs),
            &Config::default(),
        );
        (notifier, explorer)
    }
}
