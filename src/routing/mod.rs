//! Routing module
//!
//! Decides which root a request is served from:
//! - Client classification based on the User-Agent header
//! - Path normalization and traversal rejection
//! - App redirect policy between the static and interface roots

mod client;
mod resolve;

pub use client::ClientClass;
pub use resolve::{resolve, ResolvedPath, RootKind};
