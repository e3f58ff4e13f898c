//! HTTP response building module
//!
//! Every response carries exactly one header, `content-type`, with a UTF-8 charset suffix.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Response, StatusCode};

/// Body sent with every 404
pub const NOT_FOUND_BODY: &str = "Not Found";

const CHARSET_SUFFIX: &str = ";charset=UTF-8";

/// Build 200 response carrying the file contents
pub fn build_file_response(data: Vec<u8>, content_type: &str) -> Response<Full<Bytes>> {
    let body = Bytes::from(data);

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, format!("{content_type}{CHARSET_SUFFIX}"))
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(body))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, format!("text/plain{CHARSET_SUFFIX}"))
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            let mut response = Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())));
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
