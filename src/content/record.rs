//! Typed content records and their validation at the fetch boundary.
//!
//! The CMS returns loosely shaped JSON documents. Each document type is
//! first decoded into a permissive `Raw*` shape and then checked into a
//! [`ContentRecord`]; documents without an id, a title, or any usable media
//! reference are rejected so that every record that reaches a section can
//! be rendered.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::media::MediaRef;
use super::ContentKind;

/// A portfolio project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub image: MediaRef,
    pub image_alt: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
}

/// A single gallery photo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub image: MediaRef,
    pub image_alt: Option<String>,
    pub category: Option<String>,
    pub featured: bool,
}

/// A video with an optional poster frame.
///
/// At least one of `video` and `thumbnail` is always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub video: Option<MediaRef>,
    pub thumbnail: Option<MediaRef>,
    pub thumbnail_alt: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub featured: bool,
}

/// One renderable piece of CMS content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRecord {
    Project(Project),
    GalleryItem(GalleryItem),
    Video(Video),
}

impl ContentRecord {
    pub fn id(&self) -> &str {
        match self {
            Self::Project(p) => &p.id,
            Self::GalleryItem(g) => &g.id,
            Self::Video(v) => &v.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Project(p) => &p.title,
            Self::GalleryItem(g) => &g.title,
            Self::Video(v) => &v.title,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Project(_) => ContentKind::Project,
            Self::GalleryItem(_) => ContentKind::Gallery,
            Self::Video(_) => ContentKind::Video,
        }
    }

    pub fn is_featured(&self) -> bool {
        match self {
            Self::Project(p) => p.featured,
            Self::GalleryItem(g) => g.featured,
            Self::Video(v) => v.featured,
        }
    }

    /// Validate one raw CMS document of the given kind.
    pub fn from_document(kind: ContentKind, document: serde_json::Value) -> Result<Self, String> {
        match kind {
            ContentKind::Project => {
                let raw: RawProject = serde_json::from_value(document).map_err(|e| e.to_string())?;
                raw.validate().map(Self::Project)
            }
            ContentKind::Gallery => {
                let raw: RawGalleryItem =
                    serde_json::from_value(document).map_err(|e| e.to_string())?;
                raw.validate().map(Self::GalleryItem)
            }
            ContentKind::Video => {
                let raw: RawVideo = serde_json::from_value(document).map_err(|e| e.to_string())?;
                raw.validate().map(Self::Video)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    #[serde(rename = "_id")]
    id: Option<String>,
    title: Option<String>,
    client_name: Option<String>,
    description: Option<String>,
    date: Option<String>,
    image_url: Option<String>,
    image_alt: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    featured: Option<bool>,
}

impl RawProject {
    fn validate(self) -> Result<Project, String> {
        let (id, title) = identity(self.id, self.title)?;
        let image = media(self.image_url).ok_or("missing image")?;
        Ok(Project {
            id,
            title,
            client_name: non_blank(self.client_name),
            description: non_blank(self.description),
            date: self.date.as_deref().and_then(parse_date),
            image,
            image_alt: non_blank(self.image_alt),
            tags: self
                .tags
                .unwrap_or_default()
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .collect(),
            featured: self.featured.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGalleryItem {
    #[serde(rename = "_id")]
    id: Option<String>,
    title: Option<String>,
    image_url: Option<String>,
    image_alt: Option<String>,
    category: Option<String>,
    featured: Option<bool>,
}

impl RawGalleryItem {
    fn validate(self) -> Result<GalleryItem, String> {
        let (id, title) = identity(self.id, self.title)?;
        let image = media(self.image_url).ok_or("missing image")?;
        Ok(GalleryItem {
            id,
            title,
            image,
            image_alt: non_blank(self.image_alt),
            category: non_blank(self.category),
            featured: self.featured.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVideo {
    #[serde(rename = "_id")]
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    video_url: Option<String>,
    thumbnail_url: Option<String>,
    thumbnail_alt: Option<String>,
    date: Option<String>,
    category: Option<String>,
    featured: Option<bool>,
}

impl RawVideo {
    fn validate(self) -> Result<Video, String> {
        let (id, title) = identity(self.id, self.title)?;
        let video = media(self.video_url);
        let thumbnail = media(self.thumbnail_url);
        if video.is_none() && thumbnail.is_none() {
            return Err("missing both video and thumbnail".to_string());
        }
        Ok(Video {
            id,
            title,
            description: non_blank(self.description),
            video,
            thumbnail,
            thumbnail_alt: non_blank(self.thumbnail_alt),
            date: self.date.as_deref().and_then(parse_date),
            category: non_blank(self.category),
            featured: self.featured.unwrap_or(false),
        })
    }
}

fn identity(id: Option<String>, title: Option<String>) -> Result<(String, String), String> {
    let id = non_blank(id).ok_or("missing _id")?;
    let title = non_blank(title).ok_or("missing title")?;
    Ok((id, title))
}

fn media(raw: Option<String>) -> Option<MediaRef> {
    raw.as_deref().and_then(MediaRef::parse)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts plain dates (`2024-05-01`) and RFC 3339 datetimes.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
