//! Static file serving module
//!
//! Reads a resolved file and builds the response. Every failure becomes a 404.

use crate::error::FileAccessError;
use crate::http::{self, mime};
use crate::logger;
use crate::routing::ResolvedPath;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Serve a resolved file
pub async fn serve_file(resolved: &ResolvedPath, read_timeout: Duration) -> Response<Full<Bytes>> {
    match load_file(resolved, read_timeout).await {
        Ok(content) => {
            let content_type = mime::content_type_for(&resolved.request_path);
            http::build_file_response(content, content_type)
        }
        Err(e) => {
            logger::log_file_access_failure(&resolved.request_path, &e);
            http::build_404_response()
        }
    }
}

async fn load_file(
    resolved: &ResolvedPath,
    read_timeout: Duration,
) -> Result<Vec<u8>, FileAccessError> {
    let real_path =
        ensure_within_root(&resolved.root_dir, &resolved.file_path, &resolved.request_path)
            .await?;
    read_file(&real_path, read_timeout).await
}

/// Follow symlinks and return the real path, or `Traversal` if it leaves `root_dir`
pub async fn ensure_within_root(
    root_dir: &Path,
    path: &Path,
    request_path: &str,
) -> Result<PathBuf, FileAccessError> {
    let real_path = fs::canonicalize(path)
        .await
        .map_err(|e| FileAccessError::from_io(path.to_path_buf(), e))?;
    let real_root = fs::canonicalize(root_dir)
        .await
        .map_err(|e| FileAccessError::from_io(root_dir.to_path_buf(), e))?;

    if real_path.starts_with(&real_root) {
        Ok(real_path)
    } else {
        Err(FileAccessError::Traversal(request_path.to_string()))
    }
}

/// Read a whole file, giving up after `read_timeout`
pub async fn read_file(path: &Path, read_timeout: Duration) -> Result<Vec<u8>, FileAccessError> {
    match tokio::time::timeout(read_timeout, fs::read(path)).await {
        Ok(Ok(content)) => Ok(content),
        Ok(Err(e)) => Err(FileAccessError::from_io(path.to_path_buf(), e)),
        Err(_) => Err(FileAccessError::TimedOut {
            path: path.to_path_buf(),
            timeout: read_timeout,
        }),
    }
}
