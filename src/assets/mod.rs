//! Uploading media to the CMS asset store and tracking what this admin
//! session uploaded.

pub mod client;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{DeleteError, UploadError};

pub use client::SanityAssetClient;

/// Which asset endpoint a file goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    File,
}

impl AssetKind {
    /// `image/*` is an image, everything else a plain file.
    pub fn for_content_type(content_type: &str) -> Self {
        if content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
        {
            Self::Image
        } else {
            Self::File
        }
    }

    /// Path segment in `/assets/{segment}/{dataset}`.
    pub fn endpoint_segment(&self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::File => "files",
        }
    }
}

/// A file picked for upload.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        AssetKind::for_content_type(&self.content_type)
    }
}

/// Descriptor of an asset the CMS accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub id: String,
    pub kind: AssetKind,
    pub original_filename: String,
    pub url: Option<String>,
}

/// Create and delete operations on a remote asset store.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, file: &UploadFile) -> Result<UploadedAsset, UploadError>;
    async fn remove(&self, asset_id: &str) -> Result<(), DeleteError>;
}

/// Upload every file concurrently.
///
/// The first failure fails the whole batch. Uploads that already went
/// through are not rolled back.
pub async fn upload_batch<S>(store: &S, files: &[UploadFile]) -> Result<Vec<UploadedAsset>, UploadError>
where
    S: AssetStore + ?Sized,
{
    let uploaded = try_join_all(files.iter().map(|file| store.upload(file))).await?;
    info!(count = uploaded.len(), "uploaded asset batch");
    Ok(uploaded)
}

/// Assets uploaded during the current admin session, newest last.
#[derive(Debug, Default)]
pub struct UploadLedger {
    assets: Mutex<Vec<UploadedAsset>>,
}

impl UploadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn extend(&self, uploaded: impl IntoIterator<Item = UploadedAsset>) {
        self.assets.lock().await.extend(uploaded);
    }

    /// Drop the entry with `asset_id`. Returns whether one was present.
    pub async fn remove(&self, asset_id: &str) -> bool {
        let mut assets = self.assets.lock().await;
        let before = assets.len();
        assets.retain(|asset| asset.id != asset_id);
        assets.len() != before
    }

    pub async fn clear(&self) {
        self.assets.lock().await.clear();
    }

    pub async fn list(&self) -> Vec<UploadedAsset> {
        self.assets.lock().await.clone()
    }
}
