//! Failures while turning a request into file contents.
//!
//! Every variant is answered with the same 404; the variant only decides
//! how the failure is logged.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileAccessError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("path traversal rejected: {0}")]
    Traversal(String),

    #[error("read of {} timed out after {}s", .path.display(), .timeout.as_secs())]
    TimedOut { path: PathBuf, timeout: Duration },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileAccessError {
    /// Classify an I/O error raised while reading `path`
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::IsADirectory => Self::IsDirectory(path),
            _ => Self::Io { path, source },
        }
    }

    /// Missing files are routine for a static server and are not worth a warning
    pub const fn is_routine(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
