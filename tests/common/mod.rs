#![allow(dead_code)]

use acervo::server::{AcervoState, acervo_router};
use acervo::{MemoryStore, SharedStore};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use serde_json::Value;
use std::{
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

/// SQLite file under the temp dir, removed (with its WAL side files) on drop.
pub struct TempDb {
    pub path: PathBuf,
    pub url: String,
}

impl TempDb {
    pub fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "acervo-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let url = format!("sqlite:{}", path.display());
        Self { path, url }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let wal = PathBuf::from(format!("{}-wal", self.path.to_string_lossy()));
        let shm = PathBuf::from(format!("{}-shm", self.path.to_string_lossy()));
        let _ = std::fs::remove_file(&wal);
        let _ = std::fs::remove_file(&shm);
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn app_with(store: SharedStore) -> Router {
    acervo_router(AcervoState::new(store))
}

pub async fn sqlite_app(tag: &str) -> (Router, TempDb) {
    let db = TempDb::new(tag);
    let handle = acervo::db::spawn(&db.url)
        .await
        .expect("failed to spawn DbActor");
    (app_with(Arc::new(handle)), db)
}

pub fn memory_app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send a request with extra headers and a byte body; the response body is
/// parsed as JSON (`Value::Null` when empty).
pub async fn send_bytes(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Vec<u8>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = builder
        .body(Body::from(body))
        .expect("failed to build request");

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Send a request with an optional content type and a text body.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> TestResponse {
    let headers: Vec<(&str, &str)> = content_type
        .map(|ct| vec![("content-type", ct)])
        .unwrap_or_default();
    send_bytes(app, method, uri, &headers, body.as_bytes().to_vec()).await
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    match body {
        Some(json) => send_raw(app, method, uri, Some("application/json"), &json.to_string()).await,
        None => send_raw(app, method, uri, None, "").await,
    }
}
