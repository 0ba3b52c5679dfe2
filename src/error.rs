//! Error types for every layer of the site.
//!
//! Each failure class has its own enum so callers can decide how to recover:
//! fetch failures are absorbed by the section loader, upload and delete
//! failures become inline dashboard messages, and only [`AppError`] ever
//! reaches the HTTP response.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// A content query against the CMS failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("content request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content request returned HTTP {status}")]
    Status { status: u16 },

    #[error("content response could not be decoded: {0}")]
    Decode(String),
}

/// An asset upload was rejected or never reached the asset store.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    #[error("invalid file {filename}: {reason}")]
    InvalidFile { filename: String, reason: String },
}

/// An asset deletion was rejected or never reached the asset store.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    #[error("{id:?} is not an asset id")]
    InvalidId { id: String },
}

/// Admin login failed.
///
/// `InvalidCredentials` carries no detail about which field was wrong.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// The per-client session storage could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Storage(String),
}

impl From<tower_sessions::session::Error> for SessionError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to read profile {path}: {reason}")]
    Profile { path: String, reason: String },

    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),
}

/// Errors surfaced by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let message = match &self {
            Self::BadRequest(reason) => reason.clone(),
            _ => "Something went wrong".to_string(),
        };
        let body = format!(
            "<!doctype html><html><head><title>{code}</title></head>\
             <body><h1>{code}</h1><p>{message}</p><p><a href=\"/\">Return Home</a></p></body></html>",
            code = status.as_u16(),
            message = handlebars::html_escape(&message),
        );
        (status, Html(body)).into_response()
    }
}

/// Result type for request handlers.
pub type AppResult<T> = std::result::Result<T, AppError>;
