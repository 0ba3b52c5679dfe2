//! Content fetched from the CMS: record types, queries, media URLs, the
//! HTTP client, and the built-in fallback records.

pub mod client;
pub mod fallback;
pub mod media;
pub mod query;
pub mod record;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use client::{ContentSource, SanityClient};
pub use media::{MediaRef, MediaUrls, Size};
pub use query::ContentQuery;
pub use record::{ContentRecord, GalleryItem, Project, Video};

/// The three CMS document types the site displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Project,
    Gallery,
    Video,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Project, Self::Gallery, Self::Video];

    /// `_type` value in the CMS.
    pub fn document_type(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Gallery => "gallery",
            Self::Video => "video",
        }
    }

    /// Field the remote query sorts on, newest first. Gallery documents
    /// carry no date so they fall back to creation time.
    pub fn order_field(&self) -> &'static str {
        match self {
            Self::Project | Self::Video => "date",
            Self::Gallery => "_createdAt",
        }
    }

    /// Number of documents shown when only featured content is requested.
    pub fn featured_limit(&self) -> usize {
        match self {
            Self::Project => 3,
            Self::Gallery => 6,
            Self::Video => 2,
        }
    }

    /// GROQ projection mapping CMS fields onto the record shapes.
    pub fn projection(&self) -> &'static str {
        match self {
            Self::Project => {
                r#"{ _id, title, clientName, description, date, "imageUrl": mainImage.asset->url, "imageAlt": mainImage.alt, tags[], featured }"#
            }
            Self::Gallery => {
                r#"{ _id, title, "imageUrl": image.asset->url, "imageAlt": image.alt, category, featured }"#
            }
            Self::Video => {
                r#"{ _id, title, description, "videoUrl": videoFile.asset->url, "thumbnailUrl": thumbnail.asset->url, "thumbnailAlt": thumbnail.alt, date, category, featured }"#
            }
        }
    }

    /// URL segment and anchor id of the section showing this kind.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Gallery => "gallery",
            Self::Video => "videos",
        }
    }

    /// Plural noun used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Gallery => "gallery images",
            Self::Video => "videos",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" | "project" => Ok(Self::Project),
            "gallery" => Ok(Self::Gallery),
            "videos" | "video" => Ok(Self::Video),
            other => Err(format!("unknown section: {other}")),
        }
    }
}
