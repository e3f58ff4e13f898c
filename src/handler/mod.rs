//! Request handler module
//!
//! Resolves each request to a file under the static or interface root and serves it.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
