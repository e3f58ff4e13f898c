//! Request dispatch module
//!
//! Entry point for HTTP request processing. The method is never inspected;
//! only the path and the User-Agent header influence the response.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let path = req.uri().path();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let (response, served_from) = match routing::resolve(
        path,
        user_agent,
        &state.roots,
        &state.config.routing,
    ) {
        Ok(resolved) => {
            logger::log_debug(&format!(
                "[Route] {path} ({} client) -> {}",
                resolved.client.as_str(),
                resolved.file_path.display()
            ));
            let response = static_files::serve_file(&resolved, state.file_read_timeout()).await;
            (response, resolved.root.as_str())
        }
        Err(e) => {
            logger::log_file_access_failure(path, &e);
            (http::build_404_response(), "-")
        }
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            path.to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.user_agent = (!user_agent.is_empty()).then(|| user_agent.to_string());
        entry.served_from = served_from;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppRedirect, Config};
    use http_body_util::BodyExt;
    use hyper::header::CONTENT_TYPE;
    use hyper::StatusCode;
    use std::path::Path;

    struct Fixture {
        _dir: tempfile::TempDir,
        state: Arc<AppState>,
    }

    fn fixture(app_redirect: AppRedirect) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let static_root = dir.path().join("static");
        let interface_root = dir.path().join("interface");
        std::fs::create_dir_all(static_root.join("css")).unwrap();
        std::fs::create_dir_all(&interface_root).unwrap();

        std::fs::write(static_root.join("index.html"), "<h1>web</h1>").unwrap();
        std::fs::write(static_root.join("main.js"), "console.log('web')").unwrap();
        std::fs::write(static_root.join("css/site.css"), "body{}").unwrap();
        std::fs::write(static_root.join("notes"), "plain").unwrap();
        std::fs::write(static_root.join("LOGO.PNG"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();
        std::fs::write(interface_root.join("main.js"), "console.log('app')").unwrap();
        std::fs::write(interface_root.join("main.json"), r#"{"app":true}"#).unwrap();
        std::fs::write(interface_root.join("index.html"), "<h1>app</h1>").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "secret").unwrap();

        let mut config = Config::load_from("/nonexistent/dualroot-config").unwrap();
        config.logging.access_log = false;
        config.routing.app_redirect = app_redirect;
        let roots = config.roots.resolve(dir.path());

        Fixture {
            _dir: dir,
            state: Arc::new(AppState::new(config, roots)),
        }
    }

    async fn get(state: &Arc<AppState>, path: &str, user_agent: Option<&str>) -> (StatusCode, String, Vec<u8>) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(ua) = user_agent {
            builder = builder.header(USER_AGENT, ua);
        }
        let req = builder.body(()).unwrap();
        let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        let response = handle_request(req, Arc::clone(state), peer).await.unwrap();
        let status = response.status();
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_index_without_user_agent() {
        let f = fixture(AppRedirect::default());
        let (status, content_type, body) = get(&f.state, "/index.html", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html;charset=UTF-8");
        assert_eq!(body, b"<h1>web</h1>");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let f = fixture(AppRedirect::default());
        let root = get(&f.state, "/", None).await;
        let index = get(&f.state, "/index.html", None).await;
        assert_eq!(root, index);
    }

    #[tokio::test]
    async fn test_body_matches_file_bytes() {
        let f = fixture(AppRedirect::default());
        let (status, content_type, body) = get(&f.state, "/LOGO.PNG", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "image/png;charset=UTF-8");
        assert_eq!(body, [0x89u8, 0x50, 0x4e, 0x47]);

        let (_, content_type, body) = get(&f.state, "/css/site.css", None).await;
        assert_eq!(content_type, "text/css;charset=UTF-8");
        assert_eq!(body, b"body{}");

        let (_, content_type, _) = get(&f.state, "/notes", None).await;
        assert_eq!(content_type, "text/plain;charset=UTF-8");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let f = fixture(AppRedirect::default());
        let (status, content_type, body) = get(&f.state, "/missing.png", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "text/plain;charset=UTF-8");
        assert_eq!(body, b"Not Found");
    }

    #[tokio::test]
    async fn test_directory_is_404() {
        let f = fixture(AppRedirect::default());
        let (status, _, body) = get(&f.state, "/css", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Not Found");
    }

    #[tokio::test]
    async fn test_app_client_gets_interface_main_js() {
        let f = fixture(AppRedirect::default());
        let (status, content_type, body) = get(&f.state, "/main.js", Some("okhttp/4.50")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/javascript;charset=UTF-8");
        assert_eq!(body, b"console.log('app')");

        let (_, _, body) = get(&f.state, "/main.js", Some("okhttp/4.12.0")).await;
        assert_eq!(body, b"console.log('app')");
    }

    #[tokio::test]
    async fn test_browser_gets_static_main_js() {
        let f = fixture(AppRedirect::default());
        let (status, _, body) = get(
            &f.state,
            "/main.js",
            Some("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"console.log('web')");
    }

    #[tokio::test]
    async fn test_app_client_other_paths_stay_static() {
        let f = fixture(AppRedirect::default());
        let (_, _, body) = get(&f.state, "/", Some("okhttp/4.12.0")).await;
        assert_eq!(body, b"<h1>web</h1>");
    }

    #[tokio::test]
    async fn test_all_policy_serves_everything_from_interface() {
        let f = fixture(AppRedirect::All);
        let (_, _, body) = get(&f.state, "/", Some("okhttp/3.15")).await;
        assert_eq!(body, b"<h1>app</h1>");

        let (status, _, _) = get(&f.state, "/css/site.css", Some("okhttp/3.15")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rewrite_policy_serves_main_json() {
        let f = fixture(AppRedirect::Rewrite {
            target: "/main.json".to_string(),
        });
        let (status, content_type, body) = get(&f.state, "/index.html", Some("okhttp/4.12")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json;charset=UTF-8");
        assert_eq!(body, br#"{"app":true}"#);
    }

    #[tokio::test]
    async fn test_disabled_policy_ignores_user_agent() {
        let f = fixture(AppRedirect::Disabled);
        let (_, _, body) = get(&f.state, "/main.js", Some("okhttp/4.50")).await;
        assert_eq!(body, b"console.log('web')");
    }

    #[tokio::test]
    async fn test_traversal_is_404() {
        let f = fixture(AppRedirect::default());
        assert!(Path::new(&f.state.roots.static_root)
            .join("../secret.txt")
            .exists());
        let (status, content_type, body) = get(&f.state, "/../secret.txt", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "text/plain;charset=UTF-8");
        assert_eq!(body, b"Not Found");
    }

    #[tokio::test]
    async fn test_method_is_ignored() {
        let f = fixture(AppRedirect::default());
        let req = Request::builder()
            .method("DELETE")
            .uri("/index.html")
            .body(())
            .unwrap();
        let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let response = handle_request(req, Arc::clone(&f.state), peer).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
