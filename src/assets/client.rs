//! Sanity asset API client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AssetKind, AssetStore, UploadFile, UploadedAsset};
use crate::config::SanityConfig;
use crate::content::MediaUrls;
use crate::error::{DeleteError, UploadError};

/// Asset endpoints are pinned to this API version regardless of the query
/// API version.
pub const ASSET_API_VERSION: &str = "2021-06-07";

const DEFAULT_IMAGE_WIDTH: u32 = 800;
const DEFAULT_IMAGE_HEIGHT: u32 = 600;

#[derive(Deserialize)]
struct UploadResponse {
    document: AssetDocument,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetDocument {
    #[serde(rename = "_id")]
    id: String,
    original_filename: Option<String>,
    url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SanityAssetClient {
    http: reqwest::Client,
    base_url: String,
    dataset: String,
    token: Option<String>,
    urls: MediaUrls,
}

impl SanityAssetClient {
    pub fn new(config: &SanityConfig) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: reqwest::Client, config: &SanityConfig) -> Self {
        if config.token.is_none() {
            warn!("no SANITY_TOKEN configured, asset uploads will be rejected");
        }
        Self {
            http,
            base_url: format!("{}/v{ASSET_API_VERSION}", config.asset_api_host()),
            dataset: config.dataset.clone(),
            token: config.token.clone(),
            urls: MediaUrls::new(config.project_id.clone(), config.dataset.clone()),
        }
    }

    /// Cropped CDN URL for an uploaded image. 800x600 when no size is given.
    pub fn build_image_url(&self, asset_id: &str, size: Option<(u32, u32)>) -> String {
        let (width, height) = size.unwrap_or((DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT));
        self.urls.build_image_url(asset_id, width, height)
    }

    pub fn build_file_url(&self, asset_id: &str) -> String {
        self.urls.build_file_url(asset_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl AssetStore for SanityAssetClient {
    async fn upload(&self, file: &UploadFile) -> Result<UploadedAsset, UploadError> {
        if file.filename.trim().is_empty() {
            return Err(UploadError::InvalidFile {
                filename: file.filename.clone(),
                reason: "missing file name".into(),
            });
        }

        let kind = file.kind();
        let url = format!(
            "{}/assets/{}/{}",
            self.base_url,
            kind.endpoint_segment(),
            self.dataset
        );
        debug!(filename = %file.filename, %url, "uploading asset");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|_| UploadError::InvalidFile {
                filename: file.filename.clone(),
                reason: format!("unsupported content type {:?}", file.content_type),
            })?;

        let response = self
            .authorized(self.http.post(&url))
            .query(&[("filename", file.filename.as_str())])
            .multipart(Form::new().part("file", part))
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, reason) = status_reason(response).await;
            return Err(UploadError::Status { status, reason });
        }

        let document = response.json::<UploadResponse>().await?.document;
        let url = document.url.or_else(|| match kind {
            AssetKind::Image => Some(self.build_image_url(&document.id, None)),
            AssetKind::File => Some(self.build_file_url(&document.id)),
        });

        Ok(UploadedAsset {
            id: document.id,
            kind,
            original_filename: document
                .original_filename
                .unwrap_or_else(|| file.filename.clone()),
            url,
        })
    }

    async fn remove(&self, asset_id: &str) -> Result<(), DeleteError> {
        if !is_asset_id(asset_id) {
            return Err(DeleteError::InvalidId {
                id: asset_id.to_string(),
            });
        }
        let url = format!(
            "{}/assets/{}/{}",
            self.base_url,
            self.dataset,
            urlencoding::encode(asset_id)
        );
        debug!(%asset_id, "deleting asset");

        let response = self.authorized(self.http.delete(&url)).send().await?;
        if !response.status().is_success() {
            let (status, reason) = status_reason(response).await;
            return Err(DeleteError::Status { status, reason });
        }
        Ok(())
    }
}

// Asset documents are always `image-…` or `file-…`.
fn is_asset_id(id: &str) -> bool {
    ["image-", "file-"]
        .iter()
        .any(|prefix| id.len() > prefix.len() && id.starts_with(prefix))
}

// Prefer the API's own error description over the bare status phrase.
async fn status_reason(response: Response) -> (u16, String) {
    let status = response.status();
    let fallback = status.canonical_reason().unwrap_or("error").to_string();
    let reason = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .pointer("/error/description")
            .or_else(|| body.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    (status.as_u16(), reason)
}
