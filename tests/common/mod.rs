#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<!doctype html><title>stockroom</title><script src=\"/script.js\"></script>";
pub const SCRIPT_JS: &str = "console.log('inventory');";

pub struct TestApp {
    pub app: Router,
    pub data_dir: TempDir,
    pub static_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(tweak: impl FnOnce(&mut stockroom::Config)) -> Self {
        let data_dir = TempDir::new().expect("failed to create data dir");
        let static_dir = TempDir::new().expect("failed to create static dir");
        fs::write(static_dir.path().join("index.html"), INDEX_HTML).expect("write index");
        fs::write(static_dir.path().join("script.js"), SCRIPT_JS).expect("write script");

        let mut cfg = stockroom::Config {
            data_dir: data_dir.path().to_path_buf(),
            static_dir: static_dir.path().to_path_buf(),
            ..Default::default()
        };
        tweak(&mut cfg);

        let state = stockroom::router::AppState::from_config(&cfg).expect("failed to build state");
        let app = stockroom::router::stockroom_router(state);
        Self {
            app,
            data_dir,
            static_dir,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    /// Log in and return the `name=value` pair to replay in a `Cookie` header.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let resp = self.send(login_request(username, password)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        session_cookie(&resp).expect("login did not set a session cookie")
    }
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .expect("failed to build request")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn put(uri: &str, cookie: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body.into()).expect("failed to build request")
}

pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("stockroom_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not JSON")
}
