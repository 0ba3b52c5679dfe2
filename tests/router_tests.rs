mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use model_portfolio::content::ContentKind;
use model_portfolio::web::create_router;
use serde_json::json;
use tower_sessions::MemoryStore;

fn gallery_doc(id: &str, title: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "imageUrl": "https://cdn.sanity.io/images/khc2znfk/production/abc-600x800.jpg",
        "category": "Editorial",
        "featured": false
    })
}

#[tokio::test]
async fn empty_gallery_shows_no_content_message() {
    let app = app(FakeContent::new().reply(ContentKind::Gallery, Reply::Records(vec![])));

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No gallery images available at the moment."));
    assert!(!html.contains("Error loading gallery."));
}

#[tokio::test]
async fn failed_video_query_renders_the_single_fallback_video() {
    let app = app(FakeContent::new().reply(ContentKind::Video, Reply::Fail(500)));

    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("Error loading videos."));
    assert!(html.contains("videos-fallback-video-1"));
    assert!(html.contains("/videos/hope-runway.mp4"));
    assert_eq!(html.matches("<video ").count(), 1);
}

#[tokio::test]
async fn remote_records_render_in_remote_order() {
    let app = app(FakeContent::new().reply(
        ContentKind::Gallery,
        Reply::Records(vec![
            gallery_doc("second", "Newest Shot"),
            gallery_doc("first", "Older Shot"),
        ]),
    ));

    let html = body_text(send(&app, get("/")).await).await;
    let newest = html.find("Newest Shot").unwrap();
    let older = html.find("Older Shot").unwrap();
    assert!(newest < older);
    assert!(html.contains("/?photo&#x3D;second#gallery"));
}

#[tokio::test]
async fn photo_query_opens_the_gallery_modal() {
    let app = app(FakeContent::new().reply(
        ContentKind::Gallery,
        Reply::Records(vec![gallery_doc("shot-1", "Editorial Look")]),
    ));

    let html = body_text(send(&app, get("/?photo=shot-1")).await).await;
    assert!(html.contains("role=\"dialog\""));
    // Handlebars escapes `=` and `&` inside attribute values.
    assert!(html.contains("abc-600x800.jpg?w&#x3D;1200&amp;auto&#x3D;format"));

    let html = body_text(send(&app, get("/?photo=unknown")).await).await;
    assert!(!html.contains("role=\"dialog\""));
}

#[tokio::test]
async fn featured_section_fragment_uses_a_featured_query() {
    let content = FakeContent::new();
    let queries = content.queries.clone();
    let app = app(content);

    let response = send(&app, get("/sections/projects?featured=true")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No projects available at the moment."));
    assert!(!html.contains("<html"));

    let queries = queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].kind, ContentKind::Project);
    assert!(queries[0].featured_only);
    assert_eq!(queries[0].limit, Some(3));
}

#[tokio::test]
async fn unknown_section_and_path_render_not_found() {
    let app = app(FakeContent::new());

    for uri in ["/sections/blog", "/no/such/page"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("Return Home"));
    }
}

#[tokio::test]
async fn wrong_password_is_rejected_without_a_session() {
    let app = app(FakeContent::new());

    let response = send(&app, login_request("hope@portfolio.com", "nope")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response).await.contains("Invalid email or password"));
}

#[tokio::test]
async fn dashboard_requires_a_login() {
    let app = app(FakeContent::new());

    let response = send(&app, get("/admin/dashboard")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin");

    let cookie = logged_in(&app).await;
    let response = send(&app, get_with_cookie("/admin/dashboard", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Admin Dashboard"));

    let response = send(&app, get_with_cookie("/admin", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin/dashboard");
}

#[tokio::test]
async fn logout_ends_the_admin_session() {
    let app = app(FakeContent::new());
    let cookie = logged_in(&app).await;

    let logout = Request::builder()
        .method("POST")
        .uri("/admin/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, logout).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = send(&app, get_with_cookie("/admin/dashboard", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn upload_batch_lists_assets_on_success() {
    let assets = Arc::new(FakeAssets::default());
    let app = create_router(
        app_state(FakeContent::new(), assets.clone()),
        MemoryStore::default(),
    );
    let cookie = logged_in(&app).await;

    let response = send(
        &app,
        upload_request(
            &cookie,
            &[
                ("look.jpg", "image/jpeg", b"jpeg-bytes"),
                ("walk.mp4", "video/mp4", b"mp4-bytes"),
            ],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Successfully uploaded 2 file(s)"));
    assert!(html.contains("look.jpg"));
    assert!(html.contains("walk.mp4"));
    assert_eq!(assets.uploads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn one_failed_upload_fails_the_batch() {
    let assets = Arc::new(FakeAssets {
        reject: vec!["broken.png".into()],
        ..FakeAssets::default()
    });
    let state = app_state(FakeContent::new(), assets.clone());
    let ledger = state.ledger.clone();
    let app = create_router(state, MemoryStore::default());
    let cookie = logged_in(&app).await;

    let response = send(
        &app,
        upload_request(
            &cookie,
            &[
                ("fine.jpg", "image/jpeg", b"ok"),
                ("broken.png", "image/png", b"bad"),
            ],
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_text(response)
        .await
        .contains("Upload failed: 400 Bad Request"));
    assert!(ledger.list().await.is_empty());
}

#[tokio::test]
async fn empty_upload_asks_for_files() {
    let assets = Arc::new(FakeAssets::default());
    let app = create_router(
        app_state(FakeContent::new(), assets.clone()),
        MemoryStore::default(),
    );
    let cookie = logged_in(&app).await;

    let response = send(&app, upload_request(&cookie, &[("", "application/octet-stream", b"")])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Please select files to upload"));
    assert_eq!(assets.uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn deleting_an_asset_drops_it_from_the_dashboard() {
    let assets = Arc::new(FakeAssets::default());
    let app = create_router(
        app_state(FakeContent::new(), assets.clone()),
        MemoryStore::default(),
    );
    let cookie = logged_in(&app).await;
    send(&app, upload_request(&cookie, &[("look.jpg", "image/jpeg", b"x")])).await;

    let delete = Request::builder()
        .method("POST")
        .uri("/admin/assets/asset-look.jpg/delete")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Asset deleted successfully"));
    assert!(!html.contains("<strong>look.jpg</strong>"));
    assert_eq!(*assets.deleted.lock().unwrap(), vec!["asset-look.jpg".to_string()]);
}

#[tokio::test]
async fn handler_panic_renders_the_error_page() {
    let assets = Arc::new(FakeAssets {
        panic_on_remove: true,
        ..FakeAssets::default()
    });
    let app = create_router(
        app_state(FakeContent::new(), assets),
        MemoryStore::default(),
    );
    let cookie = logged_in(&app).await;

    let delete = Request::builder()
        .method("POST")
        .uri("/admin/assets/image-1/delete")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, delete).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    let html = body_text(response).await;
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("Refresh Page"));

    // The server keeps answering after the panic.
    let response = send(&app, get_with_cookie("/admin/dashboard", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn panicking_content_source_falls_back_per_section() {
    let app = app(FakeContent::new()
        .reply(ContentKind::Project, Reply::Panic)
        .reply(ContentKind::Gallery, Reply::Records(vec![gallery_doc("g1", "Kept")])));

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(!html.contains("Loading projects..."));
    assert!(html.contains("Error loading projects."));
    assert!(html.contains("Kept"));
}

#[tokio::test]
async fn login_issues_a_fresh_session_id() {
    let app = app(FakeContent::new());
    let first = logged_in(&app).await;

    let mut again = login_request("hope@portfolio.com", "hope123");
    again
        .headers_mut()
        .insert(header::COOKIE, first.parse().unwrap());
    let response = send(&app, again).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let second = session_cookie(&response).expect("login sets a session cookie");
    assert_ne!(first, second);

    let response = send(&app, get_with_cookie("/admin/dashboard", &first)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = send(&app, get_with_cookie("/admin/dashboard", &second)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_delete_links_encode_the_asset_id() {
    let assets = Arc::new(FakeAssets::default());
    let app = create_router(
        app_state(FakeContent::new(), assets.clone()),
        MemoryStore::default(),
    );
    let cookie = logged_in(&app).await;

    let response = send(
        &app,
        upload_request(&cookie, &[("a&b c.jpg", "image/jpeg", b"x")]),
    )
    .await;
    let html = body_text(response).await;
    let link = "/admin/assets/asset-a%26b%20c.jpg/delete";
    assert!(html.contains(&format!("action=\"{link}\"")));

    let delete = Request::builder()
        .method("POST")
        .uri(link)
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*assets.deleted.lock().unwrap(), vec!["asset-a&b c.jpg".to_string()]);
}

#[tokio::test]
async fn admin_session_expires_after_a_day() {
    use model_portfolio::config::AdminCredentials;
    use model_portfolio::session::{Clock, SessionGate};
    use std::sync::atomic::AtomicI64;

    struct SteppedClock(AtomicI64);

    impl Clock for SteppedClock {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    let clock = Arc::new(SteppedClock(AtomicI64::new(1_700_000_000_000)));
    let gate = SessionGate::with_clock(AdminCredentials::default(), clock.clone());
    let state = app_state(FakeContent::new(), Arc::new(FakeAssets::default())).with_gate(gate);
    let app = create_router(state, MemoryStore::default());
    let cookie = logged_in(&app).await;

    clock.0.fetch_add(86_400_000, Ordering::SeqCst);
    let response = send(&app, get_with_cookie("/admin/dashboard", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    clock.0.fetch_add(1, Ordering::SeqCst);
    let response = send(&app, get_with_cookie("/admin/dashboard", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin");
}
