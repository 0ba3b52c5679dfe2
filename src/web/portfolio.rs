//! The public portfolio page and its section fragments.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::AppState;
use crate::content::{ContentKind, ContentQuery};
use crate::error::AppResult;
use crate::loader::{LoadState, SectionLoader};
use crate::profile::Profile;
use crate::sections::{gallery_modal, GalleryModal, SectionView};

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    /// Gallery item to open in the modal.
    pub photo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionParams {
    #[serde(default)]
    pub featured: bool,
}

#[derive(Serialize)]
struct PortfolioPage<'a> {
    title: String,
    description: &'a str,
    profile: &'a Profile,
    projects: SectionView,
    gallery: SectionView,
    videos: SectionView,
    modal: Option<GalleryModal>,
}

/// Mount one loader per query and wait for all of them to settle.
///
/// The fetches run concurrently from the moment they are mounted. They
/// share a token that is cancelled when this future completes or is
/// dropped, so an abandoned request stops its fetches.
async fn load_sections<const N: usize>(
    state: &AppState,
    queries: [ContentQuery; N],
) -> [LoadState; N] {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let mut handles =
        queries.map(|query| SectionLoader::new(state.content.clone(), query).mount(cancel.clone()));

    let mut states = [(); N].map(|_| LoadState::Pending);
    for (slot, handle) in states.iter_mut().zip(handles.iter_mut()) {
        *slot = handle.settled().await;
    }
    states
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> AppResult<Html<String>> {
    let [projects, gallery, videos] = load_sections(
        &state,
        [
            ContentQuery::all(ContentKind::Project),
            ContentQuery::all(ContentKind::Gallery),
            ContentQuery::all(ContentKind::Video),
        ],
    )
    .await;

    let modal = params
        .photo
        .as_deref()
        .and_then(|id| gallery_modal(&gallery, id, &state.urls));

    let page = PortfolioPage {
        title: format!("{} | Fashion Model", state.profile.model_name),
        description: &state.profile.tagline,
        profile: &state.profile,
        projects: SectionView::from_state(ContentKind::Project, &projects, &state.urls),
        gallery: SectionView::from_state(ContentKind::Gallery, &gallery, &state.urls),
        videos: SectionView::from_state(ContentKind::Video, &videos, &state.urls),
        modal,
    };
    Ok(Html(state.templates.render("portfolio", &page)?))
}

/// One section on its own, optionally restricted to featured documents.
pub async fn section(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<SectionParams>,
) -> AppResult<Response> {
    let Ok(kind) = kind.parse::<ContentKind>() else {
        return super::not_found(State(state)).await;
    };

    let query = if params.featured {
        ContentQuery::featured(kind)
    } else {
        ContentQuery::all(kind)
    };
    let [loaded] = load_sections(&state, [query]).await;

    let view = SectionView::from_state(kind, &loaded, &state.urls);
    Ok(Html(state.templates.render("section", &view)?).into_response())
}
