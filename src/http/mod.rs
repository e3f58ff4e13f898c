//! HTTP protocol layer module
//!
//! Content-type detection and response builders, kept apart from path resolution.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_file_response};
