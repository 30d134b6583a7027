//! Filesystem abstraction for drive and directory enumeration
//!
//! The explorer only ever asks the host a handful of questions: which drives
//! exist, what a directory contains, and where a path's parent is. This module
//! puts those questions behind a single trait so the tree, the navigator and
//! the status bar work the same against:
//! - `StdFileSystem`: native filesystem using `std::fs`
//! - `MemoryFileSystem`: in-memory tree for tests and demos
//!
//! The trait is synchronous; every call is a direct, one-shot request.

use super::location;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ============================================================================
// Directory Entry Types
// ============================================================================

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by `read_dir`
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Full path to the entry
    pub path: PathBuf,
    /// File/directory name (last component of path)
    pub name: String,
    /// Type of entry
    pub entry_type: EntryType,
    /// Size in bytes (files only)
    pub size: Option<u64>,
    /// Last modification time, when the backend knows it
    pub modified: Option<SystemTime>,
    /// For symlinks, whether the target is a directory
    pub symlink_target_is_dir: bool,
}

impl DirEntry {
    /// Create a new directory entry
    pub fn new(path: PathBuf, name: String, entry_type: EntryType) -> Self {
        Self {
            path,
            name,
            entry_type,
            size: None,
            modified: None,
            symlink_target_is_dir: false,
        }
    }

    /// Builder: set size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Builder: set modified time
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Returns true if this entry is a directory OR a symlink pointing to a directory
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
            || (self.entry_type == EntryType::Symlink && self.symlink_target_is_dir)
    }

    /// Returns true if this is a regular file (or symlink to file)
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
            || (self.entry_type == EntryType::Symlink && !self.symlink_target_is_dir)
    }

    /// Hidden by the Unix dot convention
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

// ============================================================================
// Drive Types
// ============================================================================

/// OS classification of a storage volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveKind {
    Unknown,
    NoRootDirectory,
    Removable,
    Fixed,
    Network,
    CdRom,
    Ram,
}

impl DriveKind {
    /// Map a Win32 `GetDriveTypeW` result (0..=6)
    pub fn from_win32(code: u32) -> Self {
        match code {
            1 => DriveKind::NoRootDirectory,
            2 => DriveKind::Removable,
            3 => DriveKind::Fixed,
            4 => DriveKind::Network,
            5 => DriveKind::CdRom,
            6 => DriveKind::Ram,
            _ => DriveKind::Unknown,
        }
    }
}

/// A logical drive as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveInfo {
    /// Tree label (`C:\` or `/`)
    pub label: String,
    /// Root location (`C:/` or `/`)
    pub path: PathBuf,
    pub kind: DriveKind,
    /// Mounted and accessible
    pub ready: bool,
}

impl DriveInfo {
    /// Describe the drive whose root is `root` (`C:`, `C:\`, `C:/` or `/`)
    pub fn new(root: &str, kind: DriveKind, ready: bool) -> Self {
        let path = location::normalize(root);
        Self {
            label: location::file_name(&path),
            path: PathBuf::from(path),
            kind,
            ready,
        }
    }
}

/// Immediate children of a directory, split by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryCounts {
    pub directories: usize,
    pub files: usize,
}

impl EntryCounts {
    pub fn total(&self) -> usize {
        self.directories + self.files
    }
}

// ============================================================================
// FileSystem Trait
// ============================================================================

/// Everything the explorer needs from the host filesystem
///
/// Implementations report access-denied as `io::ErrorKind::PermissionDenied`
/// and missing paths as `io::ErrorKind::NotFound`; callers recover from
/// those two differently.
pub trait FileSystem: Send + Sync {
    /// Enumerate logical drives (a single `/` on Unix)
    fn drives(&self) -> io::Result<Vec<DriveInfo>>;

    /// List entries in a directory (non-recursive)
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Check if path is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Subdirectories of `path`, sorted by name (case-insensitive)
    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<DirEntry> = self
            .read_dir(path)?
            .into_iter()
            .filter(DirEntry::is_dir)
            .collect();
        dirs.sort_by_key(|e| e.name.to_lowercase());
        Ok(dirs.into_iter().map(|e| e.path).collect())
    }

    /// Whether `path` has at least one subdirectory
    fn has_subdirectories(&self, path: &Path) -> io::Result<bool> {
        Ok(self.read_dir(path)?.iter().any(DirEntry::is_dir))
    }

    /// Count immediate subdirectories and files
    fn count_entries(&self, path: &Path) -> io::Result<EntryCounts> {
        let mut counts = EntryCounts::default();
        for entry in self.read_dir(path)? {
            if entry.is_dir() {
                counts.directories += 1;
            } else {
                counts.files += 1;
            }
        }
        Ok(counts)
    }

    /// Parent directory of `path`, `None` for roots
    fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        location::parent(&location::of_path(path)).map(PathBuf::from)
    }
}

// ============================================================================
// StdFileSystem Implementation
// ============================================================================

/// Standard filesystem implementation using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    #[cfg(windows)]
    fn logical_drives() -> Vec<DriveInfo> {
        use windows_sys::Win32::Storage::FileSystem::{GetDriveTypeW, GetLogicalDrives};

        // SAFETY: no arguments, returns a bitmask of present drive letters
        let mask = unsafe { GetLogicalDrives() };
        let mut drives = Vec::new();
        for bit in 0..26u32 {
            if mask & (1 << bit) == 0 {
                continue;
            }
            let letter = char::from(b'A' + bit as u8);
            let root = format!("{letter}:\\");
            let wide: Vec<u16> = root.encode_utf16().chain(std::iter::once(0)).collect();
            // SAFETY: `wide` is a NUL-terminated UTF-16 string that outlives the call
            let code = unsafe { GetDriveTypeW(wide.as_ptr()) };
            let ready = std::fs::read_dir(&root).is_ok();
            drives.push(DriveInfo::new(&root, DriveKind::from_win32(code), ready));
        }
        drives
    }

    #[cfg(not(windows))]
    fn logical_drives() -> Vec<DriveInfo> {
        vec![DriveInfo::new("/", DriveKind::Fixed, Path::new("/").is_dir())]
    }
}

impl FileSystem for StdFileSystem {
    fn drives(&self) -> io::Result<Vec<DriveInfo>> {
        Ok(Self::logical_drives())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type()?;

            let entry_type = if file_type.is_dir() {
                EntryType::Directory
            } else if file_type.is_symlink() {
                EntryType::Symlink
            } else {
                EntryType::File
            };

            let mut dir_entry = DirEntry::new(path.clone(), name, entry_type);

            // Metadata follows symlinks; a dangling link just has none
            if let Ok(meta) = std::fs::metadata(&path) {
                if file_type.is_symlink() {
                    dir_entry.symlink_target_is_dir = meta.is_dir();
                }
                if meta.is_file() {
                    dir_entry.size = Some(meta.len());
                }
                dir_entry.modified = meta.modified().ok();
            }

            entries.push(dir_entry);
        }
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        // Layout:
        // /
        // ├── alpha/
        // │   └── nested/
        // ├── Beta/
        // ├── file1.txt
        // └── file2.txt
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("alpha/nested")).unwrap();
        fs::create_dir(root.join("Beta")).unwrap();
        fs::write(root.join("file1.txt"), "one").unwrap();
        fs::write(root.join("file2.txt"), "two!").unwrap();
        temp_dir
    }

    #[test]
    fn test_dir_entry_kinds() {
        let file = DirEntry::new(PathBuf::from("/f"), "f".to_string(), EntryType::File);
        assert!(file.is_file());
        assert!(!file.is_dir());

        let mut link = DirEntry::new(PathBuf::from("/l"), "l".to_string(), EntryType::Symlink);
        assert!(link.is_file());
        link.symlink_target_is_dir = true;
        assert!(link.is_dir());

        let hidden = DirEntry::new(PathBuf::from("/.x"), ".x".to_string(), EntryType::File);
        assert!(hidden.is_hidden());
    }

    #[test]
    fn test_drive_kind_from_win32() {
        assert_eq!(DriveKind::from_win32(0), DriveKind::Unknown);
        assert_eq!(DriveKind::from_win32(3), DriveKind::Fixed);
        assert_eq!(DriveKind::from_win32(5), DriveKind::CdRom);
        assert_eq!(DriveKind::from_win32(42), DriveKind::Unknown);
    }

    #[test]
    fn test_drive_info_labels() {
        let c = DriveInfo::new("C:", DriveKind::Fixed, true);
        assert_eq!(c.label, "C:\\");
        assert_eq!(c.path, PathBuf::from("C:/"));

        let root = DriveInfo::new("/", DriveKind::Fixed, true);
        assert_eq!(root.label, "/");
    }

    #[test]
    fn test_std_list_subdirectories_sorted() {
        let temp_dir = create_test_dir();
        let fs = StdFileSystem;

        let subdirs = fs.list_subdirectories(temp_dir.path()).unwrap();
        let names: Vec<_> = subdirs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha", "Beta"]);
    }

    #[test]
    fn test_std_count_entries() {
        let temp_dir = create_test_dir();
        let counts = StdFileSystem.count_entries(temp_dir.path()).unwrap();
        assert_eq!(counts.directories, 2);
        assert_eq!(counts.files, 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_std_has_subdirectories() {
        let temp_dir = create_test_dir();
        let fs = StdFileSystem;
        assert!(fs.has_subdirectories(temp_dir.path()).unwrap());
        assert!(fs.has_subdirectories(&temp_dir.path().join("alpha")).unwrap());
        assert!(!fs.has_subdirectories(&temp_dir.path().join("Beta")).unwrap());
    }

    #[test]
    fn test_std_read_dir_metadata() {
        let temp_dir = create_test_dir();
        let entries = StdFileSystem.read_dir(temp_dir.path()).unwrap();
        let file2 = entries.iter().find(|e| e.name == "file2.txt").unwrap();
        assert_eq!(file2.size, Some(4));
        assert!(file2.modified.is_some());
    }

    #[test]
    fn test_std_missing_dir_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");
        let err = StdFileSystem.list_subdirectories(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!StdFileSystem.is_dir(&missing));
        assert!(!StdFileSystem.exists(&missing));
    }

    #[test]
    fn test_std_parent_of() {
        let temp_dir = create_test_dir();
        let alpha = temp_dir.path().join("alpha");
        assert_eq!(
            StdFileSystem.parent_of(&alpha),
            Some(temp_dir.path().to_path_buf())
        );
        assert_eq!(StdFileSystem.parent_of(Path::new("/")), None);
    }

    #[test]
    fn test_std_drives_not_empty() {
        let drives = StdFileSystem.drives().unwrap();
        assert!(!drives.is_empty());
    }
}
