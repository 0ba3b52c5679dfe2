//! Media references and the CDN URL builder.

use serde::Serialize;

const CDN_HOST: &str = "https://cdn.sanity.io";

/// Where a record's media lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MediaRef {
    /// A file shipped with the site, e.g. `/images/hero.png`.
    Local(String),
    /// An absolute URL, usually already on the CMS CDN.
    Remote(String),
    /// A CMS image asset id: `image-<hash>-<w>x<h>-<ext>`.
    ImageAsset(String),
    /// A CMS file asset id: `file-<hash>-<ext>`.
    FileAsset(String),
}

impl MediaRef {
    /// Classify a raw media value. Returns `None` for values that cannot be
    /// turned into a URL.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with('/') {
            return Some(Self::Local(raw.to_string()));
        }
        if raw.starts_with("https://") || raw.starts_with("http://") {
            return Some(Self::Remote(raw.to_string()));
        }
        if raw.starts_with("image-") && image_asset_path(raw).is_some() {
            return Some(Self::ImageAsset(raw.to_string()));
        }
        if raw.starts_with("file-") && file_asset_path(raw).is_some() {
            return Some(Self::FileAsset(raw.to_string()));
        }
        None
    }
}

/// Requested rendition size. A missing height keeps the aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: Option<u32>,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }

    pub const fn width(width: u32) -> Self {
        Self {
            width,
            height: None,
        }
    }

    fn query(&self) -> String {
        match self.height {
            Some(h) => format!("w={}&h={}&fit=crop&auto=format", self.width, h),
            None => format!("w={}&auto=format", self.width),
        }
    }
}

/// Builds CDN URLs for one project/dataset pair. Pure string work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUrls {
    project_id: String,
    dataset: String,
}

impl MediaUrls {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// URL for displaying `media` as an image at `size`.
    pub fn image(&self, media: &MediaRef, size: Size) -> String {
        match media {
            MediaRef::Local(path) => path.clone(),
            MediaRef::Remote(url) if url.starts_with(&format!("{CDN_HOST}/images/")) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{url}{sep}{}", size.query())
            }
            MediaRef::Remote(url) => url.clone(),
            MediaRef::ImageAsset(id) => match image_asset_path(id) {
                Some(path) => format!(
                    "{CDN_HOST}/images/{}/{}/{path}?{}",
                    self.project_id,
                    self.dataset,
                    size.query()
                ),
                None => self.build_image_url(id, size.width, size.height.unwrap_or(size.width)),
            },
            MediaRef::FileAsset(_) => self.file(media),
        }
    }

    /// URL for streaming or downloading `media` as-is.
    pub fn file(&self, media: &MediaRef) -> String {
        match media {
            MediaRef::Local(path) | MediaRef::Remote(path) => path.clone(),
            MediaRef::ImageAsset(id) => match image_asset_path(id) {
                Some(path) => format!(
                    "{CDN_HOST}/images/{}/{}/{path}",
                    self.project_id, self.dataset
                ),
                None => self.build_file_url(id),
            },
            MediaRef::FileAsset(id) => match file_asset_path(id) {
                Some(path) => format!("{CDN_HOST}/files/{}/{}/{path}", self.project_id, self.dataset),
                None => self.build_file_url(id),
            },
        }
    }

    /// Cropped image URL for a freshly uploaded asset id.
    pub fn build_image_url(&self, asset_id: &str, width: u32, height: u32) -> String {
        format!(
            "{CDN_HOST}/images/{}/{}/{asset_id}?w={width}&h={height}&fit=crop&auto=format",
            self.project_id, self.dataset
        )
    }

    /// Direct URL for a freshly uploaded file asset id.
    pub fn build_file_url(&self, asset_id: &str) -> String {
        format!("{CDN_HOST}/files/{}/{}/{asset_id}", self.project_id, self.dataset)
    }
}

/// `image-abc123-800x600-jpg` -> `abc123-800x600.jpg`
fn image_asset_path(id: &str) -> Option<String> {
    let rest = id.strip_prefix("image-")?;
    let (rest, ext) = rest.rsplit_once('-')?;
    let (hash, dims) = rest.rsplit_once('-')?;
    let (w, h) = dims.split_once('x')?;
    if hash.is_empty() || ext.is_empty() || w.parse::<u32>().is_err() || h.parse::<u32>().is_err() {
        return None;
    }
    Some(format!("{hash}-{dims}.{ext}"))
}

/// `file-abc123-mp4` -> `abc123.mp4`
fn file_asset_path(id: &str) -> Option<String> {
    let rest = id.strip_prefix("file-")?;
    let (hash, ext) = rest.rsplit_once('-')?;
    if hash.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!("{hash}.{ext}"))
}
