//! Item count shown in the status bar

use crate::model::filesystem::FileSystem;
use std::fmt;
use std::io;
use std::path::Path;

/// Outcome of counting the current directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReport {
    /// Immediate subdirectories plus files
    Count(usize),
    /// Listing refused; the selected tree node gets locked instead
    Locked,
    /// Listing failed for another reason
    Unknown,
}

impl StatusReport {
    /// Count the immediate entries of `path`
    pub fn compute(fs: &dyn FileSystem, path: &Path) -> Self {
        match fs.count_entries(path) {
            Ok(counts) => StatusReport::Count(counts.total()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => StatusReport::Locked,
            Err(e) => {
                tracing::debug!("Failed to count entries of {:?}: {}", path, e);
                StatusReport::Unknown
            }
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusReport::Count(1) => write!(f, "1 item"),
            StatusReport::Count(n) => write!(f, "{n} items"),
            StatusReport::Locked => Ok(()),
            StatusReport::Unknown => write!(f, "? items"),
        }
    }
}
