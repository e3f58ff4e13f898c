//! Path resolution
//!
//! Maps a request path and client class onto a file under one of the two roots.
//! Request paths are not percent-decoded; `..` segments are rejected outright.
//! Symlinks are checked against the root when the file is served.

use std::path::PathBuf;

use super::client::{classify, ClientClass};
use crate::config::{AppRedirect, Roots, RoutingConfig};
use crate::error::FileAccessError;

const INDEX_PATH: &str = "/index.html";

/// Root a request was resolved under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Static,
    Interface,
}

impl RootKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Interface => "interface",
        }
    }
}

/// Outcome of resolving one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub client: ClientClass,
    pub root: RootKind,
    /// Request path after normalization or rewrite; decides the content type
    pub request_path: String,
    /// Root directory the file has to stay inside once symlinks are followed
    pub root_dir: PathBuf,
    pub file_path: PathBuf,
}

/// `/` and `/index.html` both name the index page
pub fn normalize_path(path: &str) -> &str {
    if path == "/" || path == INDEX_PATH {
        INDEX_PATH
    } else {
        path
    }
}

/// Resolve a request path for the given user-agent (empty when absent)
pub fn resolve(
    path: &str,
    user_agent: &str,
    roots: &Roots,
    routing: &RoutingConfig,
) -> Result<ResolvedPath, FileAccessError> {
    let normalized = normalize_path(path);
    let client = classify(user_agent, &routing.app_agents);

    let (root, request_path) = match (client, &routing.app_redirect) {
        (ClientClass::Browser, _) | (ClientClass::App, AppRedirect::Disabled) => {
            (RootKind::Static, normalized)
        }
        (ClientClass::App, AppRedirect::All) => (RootKind::Interface, normalized),
        (ClientClass::App, AppRedirect::Paths { paths }) => {
            if paths.iter().any(|p| p == normalized) {
                (RootKind::Interface, normalized)
            } else {
                (RootKind::Static, normalized)
            }
        }
        (ClientClass::App, AppRedirect::Rewrite { target }) => {
            (RootKind::Interface, target.as_str())
        }
    };

    if has_parent_segment(request_path) {
        return Err(FileAccessError::Traversal(path.to_string()));
    }

    let base = match root {
        RootKind::Static => &roots.static_root,
        RootKind::Interface => &roots.interface_root,
    };

    Ok(ResolvedPath {
        client,
        root,
        request_path: request_path.to_string(),
        root_dir: base.clone(),
        file_path: base.join(request_path.trim_start_matches('/')),
    })
}

fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}
