//! Built-in records shown when a section's query fails.

use chrono::Utc;

use super::media::MediaRef;
use super::record::{GalleryItem, Project, Video};
use super::{ContentKind, ContentRecord};

/// The fixed fallback set for `kind`, in display order.
pub fn fallback_records(kind: ContentKind) -> Vec<ContentRecord> {
    match kind {
        ContentKind::Project => projects(),
        ContentKind::Gallery => gallery(),
        ContentKind::Video => videos(),
    }
}

fn local(path: &str) -> MediaRef {
    MediaRef::Local(path.to_string())
}

fn projects() -> Vec<ContentRecord> {
    vec![
        ContentRecord::Project(Project {
            id: "fallback-1".into(),
            title: "Fashion Project 1".into(),
            client_name: Some("Sample Client".into()),
            description: Some("A beautiful fashion project showcasing Hope's modeling skills.".into()),
            date: None,
            image: local("/images/project1.png"),
            image_alt: Some("Fashion Project 1".into()),
            tags: vec!["Fashion".into(), "Modeling".into()],
            featured: false,
        }),
        ContentRecord::Project(Project {
            id: "fallback-2".into(),
            title: "Fashion Project 2".into(),
            client_name: Some("Another Client".into()),
            description: Some("Another stunning fashion project.".into()),
            date: None,
            image: local("/images/project2.png"),
            image_alt: Some("Fashion Project 2".into()),
            tags: vec!["Fashion".into(), "Portrait".into()],
            featured: false,
        }),
    ]
}

fn gallery() -> Vec<ContentRecord> {
    vec![
        ContentRecord::GalleryItem(GalleryItem {
            id: "fallback-gallery-1".into(),
            title: "Portfolio Shot 1".into(),
            image: local("/images/hero.png"),
            image_alt: Some("Portfolio Shot 1".into()),
            category: Some("Portfolio".into()),
            featured: true,
        }),
        ContentRecord::GalleryItem(GalleryItem {
            id: "fallback-gallery-2".into(),
            title: "Portfolio Shot 2".into(),
            image: local("/images/footer.png"),
            image_alt: Some("Portfolio Shot 2".into()),
            category: Some("Portfolio".into()),
            featured: false,
        }),
    ]
}

fn videos() -> Vec<ContentRecord> {
    vec![ContentRecord::Video(Video {
        id: "fallback-video-1".into(),
        title: "Runway Moments".into(),
        description: Some("Beautiful runway moments showcasing Hope's modeling talent.".into()),
        video: Some(local("/videos/hope-runway.mp4")),
        thumbnail: Some(local("/images/hero.png")),
        thumbnail_alt: Some("Runway Moments".into()),
        date: Some(Utc::now().date_naive()),
        category: Some("Runway".into()),
        featured: false,
    })]
}
