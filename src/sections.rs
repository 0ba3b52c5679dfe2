//! Projects, gallery and videos sections as pure views of a [`LoadState`].

use serde::Serialize;

use crate::content::{ContentKind, ContentRecord, MediaUrls, Size};
use crate::loader::LoadState;

const PROJECT_SIZE: Size = Size::new(800, 600);
const GALLERY_SIZE: Size = Size::new(600, 800);
const MODAL_SIZE: Size = Size::width(1200);
const POSTER_SIZE: Size = Size::width(800);

/// Everything a section template needs. Exactly one of `loading`, `empty`
/// or a non-empty `cards` is set; `error` may accompany `cards` when the
/// cards are the fallback set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub slug: &'static str,
    pub heading: &'static str,
    pub loading: Option<String>,
    pub error: Option<String>,
    pub empty: Option<String>,
    pub cards: Vec<Card>,
}

/// One rendered record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: String,
    /// Two-digit position, e.g. `01`.
    pub index_label: String,
    pub title: String,
    pub alt: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub poster_url: Option<String>,
    /// Link opening this item in the gallery modal.
    pub open_url: Option<String>,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub date: Option<String>,
    pub autoplay: bool,
}

/// Enlarged view of one gallery item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GalleryModal {
    pub title: String,
    pub alt: String,
    pub image_url: String,
    pub category: Option<String>,
    pub close_url: &'static str,
}

impl SectionView {
    /// Map a section's load state onto what the visitor sees.
    pub fn from_state(kind: ContentKind, state: &LoadState, urls: &MediaUrls) -> Self {
        let mut view = Self {
            slug: kind.slug(),
            heading: heading(kind),
            loading: None,
            error: None,
            empty: None,
            cards: Vec::new(),
        };

        match state {
            LoadState::Pending => {
                view.loading = Some(format!("Loading {}...", loading_noun(kind)));
            }
            LoadState::Ready(records) if records.is_empty() => {
                view.empty = Some(format!("No {} available at the moment.", kind.label()));
            }
            LoadState::Ready(records) => {
                view.cards = cards(records, urls);
            }
            LoadState::Failed { fallback, .. } => {
                view.error = Some(format!("Error loading {}.", loading_noun(kind)));
                if fallback.is_empty() {
                    view.empty = Some(format!("No {} available at the moment.", kind.label()));
                } else {
                    view.cards = cards(fallback, urls);
                }
            }
        }
        view
    }
}

/// The modal for gallery item `id`, if the state shows it.
pub fn gallery_modal(state: &LoadState, id: &str, urls: &MediaUrls) -> Option<GalleryModal> {
    state.records()?.iter().find_map(|record| match record {
        ContentRecord::GalleryItem(item) if item.id == id => Some(GalleryModal {
            title: item.title.clone(),
            alt: item.image_alt.clone().unwrap_or_else(|| item.title.clone()),
            image_url: urls.image(&item.image, MODAL_SIZE),
            category: item.category.clone(),
            close_url: "/#gallery",
        }),
        _ => None,
    })
}

fn heading(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Project => "Projects",
        ContentKind::Gallery => "Gallery",
        ContentKind::Video => "Runway Moments",
    }
}

fn loading_noun(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Project => "projects",
        ContentKind::Gallery => "gallery",
        ContentKind::Video => "videos",
    }
}

fn cards(records: &[ContentRecord], urls: &MediaUrls) -> Vec<Card> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| card(index, record, urls))
        .collect()
}

fn card(index: usize, record: &ContentRecord, urls: &MediaUrls) -> Card {
    let index_label = format!("{:02}", index + 1);
    let featured = record.is_featured();
    match record {
        ContentRecord::Project(p) => Card {
            id: p.id.clone(),
            index_label,
            title: p.title.clone(),
            alt: p.image_alt.clone().unwrap_or_else(|| p.title.clone()),
            image_url: Some(urls.image(&p.image, PROJECT_SIZE)),
            client_name: p.client_name.clone(),
            description: p.description.clone(),
            tags: p.tags.clone(),
            featured,
            date: p.date.map(|d| d.format("%B %-d, %Y").to_string()),
            ..Card::default()
        },
        ContentRecord::GalleryItem(g) => Card {
            id: g.id.clone(),
            index_label,
            title: g.title.clone(),
            alt: g.image_alt.clone().unwrap_or_else(|| g.title.clone()),
            image_url: Some(urls.image(&g.image, GALLERY_SIZE)),
            open_url: Some(format!("/?photo={}#gallery", urlencoding::encode(&g.id))),
            category: g.category.clone(),
            featured,
            ..Card::default()
        },
        ContentRecord::Video(v) => {
            let poster = v.thumbnail.as_ref().map(|t| urls.image(t, POSTER_SIZE));
            let video_url = v.video.as_ref().map(|m| urls.file(m));
            Card {
                id: v.id.clone(),
                index_label,
                title: v.title.clone(),
                alt: v.thumbnail_alt.clone().unwrap_or_else(|| v.title.clone()),
                image_url: if video_url.is_none() { poster.clone() } else { None },
                poster_url: poster,
                autoplay: index == 0 && video_url.is_some(),
                video_url,
                description: v.description.clone(),
                category: v.category.clone(),
                featured,
                date: v.date.map(|d| d.format("%B %-d, %Y").to_string()),
                ..Card::default()
            }
        }
    }
}
