//! In-memory filesystem
//!
//! Holds drives, directories and files as normalized location strings. Paths
//! can be marked access-denied or failing so every recovery branch of the
//! tree and the navigator can be driven without touching the real disk.

use super::filesystem::{DirEntry, DriveInfo, DriveKind, EntryType, FileSystem};
use super::location;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Inner {
    drives: Vec<DriveInfo>,
    dirs: BTreeSet<String>,
    files: BTreeMap<String, u64>,
    denied: HashSet<String>,
    failing: HashMap<String, String>,
}

/// Filesystem backed by in-memory maps
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    inner: RwLock<Inner>,
}

fn key(path: &Path) -> String {
    location::of_path(path)
}

fn parent_key(location: &str) -> Option<String> {
    location::parent(location)
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a drive; a ready drive gets an (empty) root directory
    pub fn add_drive(&self, root: &str, kind: DriveKind, ready: bool) -> &Self {
        let drive = DriveInfo::new(root, kind, ready);
        let mut inner = self.write();
        if ready {
            inner.dirs.insert(location::of_path(&drive.path));
        }
        inner.drives.push(drive);
        self
    }

    /// Create a directory and all of its ancestors
    pub fn add_dir(&self, path: &str) -> &Self {
        let mut inner = self.write();
        let mut current = Some(location::normalize(path));
        while let Some(dir) = current {
            current = parent_key(&dir);
            inner.dirs.insert(dir);
        }
        self
    }

    /// Create a file (and its parent directories)
    pub fn add_file(&self, path: &str, size: u64) -> &Self {
        let path = location::normalize(path);
        if let Some(parent) = parent_key(&path) {
            self.add_dir(&parent);
        }
        self.write().files.insert(path, size);
        self
    }

    /// Delete a directory or file together with everything below it
    pub fn remove(&self, path: &str) -> &Self {
        let path = location::normalize(path);
        let prefix = location::join(&path, "");
        let mut inner = self.write();
        inner
            .dirs
            .retain(|d| *d != path && !d.starts_with(&prefix));
        inner
            .files
            .retain(|f, _| *f != path && !f.starts_with(&prefix));
        self
    }

    /// Reading this directory fails with `PermissionDenied`
    pub fn deny(&self, path: &str) -> &Self {
        self.write().denied.insert(location::normalize(path));
        self
    }

    /// Reading this directory fails with an unclassified error
    pub fn fail(&self, path: &str, message: &str) -> &Self {
        self.write()
            .failing
            .insert(location::normalize(path), message.to_string());
        self
    }

    /// Lift a previous `deny` or `fail`
    pub fn allow(&self, path: &str) -> &Self {
        let path = location::normalize(path);
        let mut inner = self.write();
        inner.denied.remove(&path);
        inner.failing.remove(&path);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn drives(&self) -> io::Result<Vec<DriveInfo>> {
        Ok(self.read().drives.clone())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let dir = key(path);
        let inner = self.read();

        if inner.denied.contains(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Access to the path '{dir}' is denied."),
            ));
        }
        if let Some(message) = inner.failing.get(&dir) {
            return Err(io::Error::other(message.clone()));
        }
        if !inner.dirs.contains(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Could not find a part of the path '{dir}'."),
            ));
        }

        let is_child = |candidate: &String| parent_key(candidate).as_deref() == Some(dir.as_str());

        let mut entries: Vec<DirEntry> = inner
            .dirs
            .iter()
            .filter(|d| is_child(*d))
            .map(|d| {
                DirEntry::new(
                    PathBuf::from(d),
                    location::file_name(d),
                    EntryType::Directory,
                )
            })
            .collect();

        entries.extend(inner.files.iter().filter(|(f, _)| is_child(*f)).map(|(f, size)| {
            DirEntry::new(PathBuf::from(f), location::file_name(f), EntryType::File)
                .with_size(*size)
        }));

        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().dirs.contains(&key(path))
    }

    fn exists(&self, path: &Path) -> bool {
        let path = key(path);
        let inner = self.read();
        inner.dirs.contains(&path) || inner.files.contains_key(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.add_drive("C:", DriveKind::Fixed, true)
            .add_drive("D:", DriveKind::CdRom, false)
            .add_dir("C:/Users/bob/Documents")
            .add_dir("C:/Windows")
            .add_file("C:/Users/bob/notes.txt", 12);
        fs
    }

    #[test]
    fn test_drives() {
        let fs = sample();
        let drives = fs.drives().unwrap();
        assert_eq!(drives.len(), 2);
        assert_eq!(drives[0].label, "C:\\");
        assert!(drives[0].ready);
        assert!(!drives[1].ready);
        assert!(!fs.is_dir(Path::new("D:/")));
    }

    #[test]
    fn test_read_dir_children() {
        let fs = sample();
        let subdirs = fs.list_subdirectories(Path::new("C:/")).unwrap();
        assert_eq!(
            subdirs,
            vec![PathBuf::from("C:/Users"), PathBuf::from("C:/Windows")]
        );

        let counts = fs.count_entries(Path::new("C:/Users/bob")).unwrap();
        assert_eq!(counts.directories, 1);
        assert_eq!(counts.files, 1);
    }

    #[test]
    fn test_ancestors_created() {
        let fs = sample();
        assert!(fs.is_dir(Path::new("C:/Users")));
        assert!(fs.is_dir(Path::new("C:\\Users\\bob")));
        assert!(fs.exists(Path::new("C:/Users/bob/notes.txt")));
        assert!(!fs.is_dir(Path::new("C:/Users/bob/notes.txt")));
    }

    #[test]
    fn test_remove_subtree() {
        let fs = sample();
        fs.remove("C:/Users/bob");
        assert!(!fs.is_dir(Path::new("C:/Users/bob")));
        assert!(!fs.exists(Path::new("C:/Users/bob/notes.txt")));
        assert!(fs.is_dir(Path::new("C:/Users")));

        let err = fs.read_dir(Path::new("C:/Users/bob")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_denied_and_failing() {
        let fs = sample();
        fs.deny("C:/Windows").fail("C:/Users", "device not ready");

        let err = fs.read_dir(Path::new("C:/Windows")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.is_dir(Path::new("C:/Windows")));

        let err = fs.read_dir(Path::new("C:/Users")).unwrap_err();
        assert_eq!(err.to_string(), "device not ready");

        fs.allow("C:/Windows");
        assert!(fs.read_dir(Path::new("C:/Windows")).is_ok());
    }

    #[test]
    fn test_parent_of() {
        let fs = sample();
        assert_eq!(
            fs.parent_of(Path::new("C:/Users/bob")),
            Some(PathBuf::from("C:/Users"))
        );
        assert_eq!(fs.parent_of(Path::new("C:/")), None);
    }
}
