//! HTTP surface: router, shared state and the pages that are not tied to
//! one feature.

pub mod admin;
pub mod portfolio;
pub mod templates;

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::assets::{AssetStore, UploadLedger};
use crate::config::SiteConfig;
use crate::content::{ContentSource, MediaUrls};
use crate::error::{AppResult, ConfigError};
use crate::profile::Profile;
use crate::session::SessionGate;

pub use templates::Templates;

/// Largest accepted upload request body.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub content: Arc<dyn ContentSource>,
    pub assets: Arc<dyn AssetStore>,
    pub gate: Arc<SessionGate>,
    pub ledger: Arc<UploadLedger>,
    pub templates: Arc<Templates>,
    pub urls: MediaUrls,
    pub profile: Arc<Profile>,
}

impl AppState {
    pub fn new(
        config: SiteConfig,
        content: Arc<dyn ContentSource>,
        assets: Arc<dyn AssetStore>,
        profile: Profile,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            urls: MediaUrls::new(config.sanity.project_id.clone(), config.sanity.dataset.clone()),
            gate: Arc::new(SessionGate::new(config.admin.clone())),
            ledger: Arc::new(UploadLedger::new()),
            templates: Arc::new(Templates::new()?),
            profile: Arc::new(profile),
            config: Arc::new(config),
            content,
            assets,
        })
    }

    /// Swap the gate, e.g. for one with a fixed clock.
    pub fn with_gate(mut self, gate: SessionGate) -> Self {
        self.gate = Arc::new(gate);
        self
    }
}

/// Build the application router.
///
/// Sessions are persisted through `store` and expire after 24 hours of
/// inactivity, matching the admin gate's own window.
pub fn create_router<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(state.config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(24)));

    let public = Path::new(&state.config.public_dir);

    Router::new()
        .route("/", get(portfolio::index))
        .route("/sections/{kind}", get(portfolio::section))
        .route("/admin", get(admin::login_form).post(admin::login))
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/uploads",
            post(admin::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/admin/assets/{id}/delete", post(admin::delete_asset))
        .route("/admin/logout", post(admin::logout))
        .nest_service("/images", ServeDir::new(public.join("images")))
        .nest_service("/videos", ServeDir::new(public.join("videos")))
        .nest_service("/audio", ServeDir::new(public.join("audio")))
        .fallback(not_found)
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_page))
}

#[derive(Serialize)]
struct NotFoundPage {
    title: &'static str,
}

pub async fn not_found(State(state): State<AppState>) -> AppResult<Response> {
    let html = state.templates.render(
        "not_found",
        &NotFoundPage {
            title: "Page Not Found",
        },
    )?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

/// Whole-page replacement for a request whose handler panicked.
pub fn panic_page(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        templates::PANIC_PAGE,
    )
        .into_response()
}
