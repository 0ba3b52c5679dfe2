//! Shared fakes and helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use model_portfolio::assets::{AssetKind, AssetStore, UploadFile, UploadedAsset};
use model_portfolio::config::SiteConfig;
use model_portfolio::content::{ContentKind, ContentQuery, ContentRecord, ContentSource};
use model_portfolio::error::{DeleteError, FetchError, UploadError};
use model_portfolio::profile::Profile;
use model_portfolio::web::{create_router, AppState};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

/// What the fake CMS answers for one content kind.
#[derive(Clone)]
pub enum Reply {
    Records(Vec<serde_json::Value>),
    Fail(u16),
    Panic,
}

/// Content source answering from canned documents, per kind.
#[derive(Default)]
pub struct FakeContent {
    replies: HashMap<ContentKind, Reply>,
    pub queries: Arc<Mutex<Vec<ContentQuery>>>,
}

impl FakeContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, kind: ContentKind, reply: Reply) -> Self {
        self.replies.insert(kind, reply);
        self
    }
}

#[async_trait]
impl ContentSource for FakeContent {
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, FetchError> {
        self.queries.lock().unwrap().push(*query);
        match self.replies.get(&query.kind) {
            Some(Reply::Records(documents)) => Ok(documents
                .iter()
                .cloned()
                .filter_map(|doc| ContentRecord::from_document(query.kind, doc).ok())
                .collect()),
            Some(Reply::Fail(status)) => Err(FetchError::Status { status: *status }),
            Some(Reply::Panic) => panic!("unexpected {} document shape", query.kind),
            None => Ok(Vec::new()),
        }
    }
}

/// Asset store that accepts everything except filenames listed in `reject`.
/// With `panic_on_remove` set, deletes panic instead of answering.
#[derive(Default)]
pub struct FakeAssets {
    pub reject: Vec<String>,
    pub panic_on_remove: bool,
    pub uploads: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl AssetStore for FakeAssets {
    async fn upload(&self, file: &UploadFile) -> Result<UploadedAsset, UploadError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.reject.contains(&file.filename) {
            return Err(UploadError::Status {
                status: 400,
                reason: "Bad Request".into(),
            });
        }
        Ok(UploadedAsset {
            id: format!("asset-{}", file.filename),
            kind: AssetKind::for_content_type(&file.content_type),
            original_filename: file.filename.clone(),
            url: None,
        })
    }

    async fn remove(&self, asset_id: &str) -> Result<(), DeleteError> {
        if self.panic_on_remove {
            panic!("asset store fell over deleting {asset_id}");
        }
        self.deleted.lock().unwrap().push(asset_id.to_string());
        Ok(())
    }
}

pub fn app_state(content: FakeContent, assets: Arc<FakeAssets>) -> AppState {
    AppState::new(
        SiteConfig::default(),
        Arc::new(content),
        assets,
        Profile::default(),
    )
    .unwrap()
}

pub fn app(content: FakeContent) -> Router {
    create_router(
        app_state(content, Arc::new(FakeAssets::default())),
        MemoryStore::default(),
    )
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/admin")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("email={email}&password={password}")))
        .unwrap()
}

/// `name=value` of the session cookie a response sets, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Log in with the default credentials and return the session cookie.
pub async fn logged_in(app: &Router) -> String {
    let response = send(app, login_request("hope@portfolio.com", "hope123")).await;
    assert_eq!(response.status(), 303);
    session_cookie(&response).expect("login sets a session cookie")
}

/// A multipart body with one `files` part per `(filename, content type, bytes)`.
pub fn upload_request(cookie: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    const BOUNDARY: &str = "----portfolio-test-boundary";
    let mut body = Vec::new();
    for (filename, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/admin/uploads")
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
