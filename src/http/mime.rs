//! MIME type detection module
//!
//! Returns the Content-Type for a request path based on its extension.

/// Get MIME Content-Type for a path
///
/// The extension is whatever follows the last `.` in the whole path, compared
/// case-insensitively. Paths without a known extension are served as plain text.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "js" => "application/javascript",
        "css" => "text/css",
        "html" => "text/html",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "text/plain",
    }
}
