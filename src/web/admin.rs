//! Admin login and media dashboard.
//!
//! Every dashboard route re-checks the session gate and sends visitors
//! without a valid login back to the login form.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

use super::AppState;
use crate::assets::{upload_batch, UploadFile, UploadedAsset};
use crate::error::{AppError, AppResult, AuthError, DeleteError, SessionError};
use crate::session::{CookieSessionStorage, SessionStatus};

const LOGIN_PATH: &str = "/admin";
const DASHBOARD_PATH: &str = "/admin/dashboard";
const STUDIO_URL: &str = "https://sanity.io";
const UPLOAD_FIELD: &str = "files";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginPage<'a> {
    title: &'static str,
    email: &'a str,
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Level {
    Success,
    Error,
}

#[derive(Serialize)]
struct Message {
    level: Level,
    text: String,
}

impl Message {
    fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

#[derive(Serialize)]
struct DashboardPage {
    title: &'static str,
    studio_url: &'static str,
    message: Option<Message>,
    assets: Vec<AssetRow>,
}

#[derive(Serialize)]
struct AssetRow {
    #[serde(flatten)]
    asset: UploadedAsset,
    delete_url: String,
}

impl From<UploadedAsset> for AssetRow {
    fn from(asset: UploadedAsset) -> Self {
        let delete_url = format!("/admin/assets/{}/delete", urlencoding::encode(&asset.id));
        Self { asset, delete_url }
    }
}

async fn is_logged_in(state: &AppState, storage: &CookieSessionStorage) -> AppResult<bool> {
    let status = state.gate.check_session(storage).await?;
    Ok(status == SessionStatus::Authenticated)
}

fn render_login(state: &AppState, email: &str, error: Option<String>) -> AppResult<String> {
    let page = LoginPage {
        title: "Admin Login",
        email,
        error,
    };
    Ok(state.templates.render("login", &page)?)
}

async fn render_dashboard(
    state: &AppState,
    status: StatusCode,
    message: Option<Message>,
) -> AppResult<Response> {
    let page = DashboardPage {
        title: "Admin Dashboard",
        studio_url: STUDIO_URL,
        message,
        assets: state
            .ledger
            .list()
            .await
            .into_iter()
            .map(AssetRow::from)
            .collect(),
    };
    let html = state.templates.render("dashboard", &page)?;
    Ok((status, Html(html)).into_response())
}

pub async fn login_form(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let storage = CookieSessionStorage::new(session);
    if is_logged_in(&state, &storage).await? {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }
    Ok(Html(render_login(&state, "", None)?).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let storage = CookieSessionStorage::new(session.clone());
    match state
        .gate
        .authenticate(&storage, &form.email, &form.password)
        .await
    {
        Ok(()) => {
            // New id on privilege change; the pre-login id stops working.
            session.cycle_id().await.map_err(SessionError::from)?;
            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        Err(AuthError::Session(err)) => Err(err.into()),
        Err(err @ AuthError::InvalidCredentials) => {
            let html = render_login(&state, &form.email, Some(err.to_string()))?;
            Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
        }
    }
}

pub async fn dashboard(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let storage = CookieSessionStorage::new(session);
    if !is_logged_in(&state, &storage).await? {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }
    render_dashboard(&state, StatusCode::OK, None).await
}

pub async fn upload(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let storage = CookieSessionStorage::new(session);
    if !is_logged_in(&state, &storage).await? {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        // Browsers send one empty part when nothing was picked.
        if filename.is_empty() && bytes.is_empty() {
            continue;
        }
        files.push(UploadFile::new(filename, content_type, bytes.to_vec()));
    }

    if files.is_empty() {
        let message = Message::error("Please select files to upload");
        return render_dashboard(&state, StatusCode::BAD_REQUEST, Some(message)).await;
    }

    match upload_batch(state.assets.as_ref(), &files).await {
        Ok(uploaded) => {
            let count = uploaded.len();
            state.ledger.extend(uploaded).await;
            let message = Message::success(format!("Successfully uploaded {count} file(s)"));
            render_dashboard(&state, StatusCode::OK, Some(message)).await
        }
        Err(err) => {
            warn!(error = %err, "asset upload failed");
            let message = Message::error(format!("Upload failed: {err}"));
            render_dashboard(&state, StatusCode::BAD_GATEWAY, Some(message)).await
        }
    }
}

pub async fn delete_asset(
    State(state): State<AppState>,
    session: Session,
    Path(asset_id): Path<String>,
) -> AppResult<Response> {
    let storage = CookieSessionStorage::new(session);
    if !is_logged_in(&state, &storage).await? {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }

    match state.assets.remove(&asset_id).await {
        Ok(()) => {
            state.ledger.remove(&asset_id).await;
            let message = Message::success("Asset deleted successfully");
            render_dashboard(&state, StatusCode::OK, Some(message)).await
        }
        Err(err) => {
            warn!(%asset_id, error = %err, "asset delete failed");
            let status = match err {
                DeleteError::InvalidId { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            let message = Message::error(format!("Delete failed: {err}"));
            render_dashboard(&state, status, Some(message)).await
        }
    }
}

pub async fn logout(State(state): State<AppState>, session: Session) -> AppResult<Redirect> {
    let storage = CookieSessionStorage::new(session);
    state.gate.logout(&storage).await?;
    state.ledger.clear().await;
    Ok(Redirect::to("/"))
}
