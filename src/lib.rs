//! # Model Portfolio
//!
//! A server-rendered portfolio site for a fashion model. Static biography
//! sits alongside projects, gallery images and runway videos pulled from a
//! [Sanity](https://www.sanity.io) dataset, and a small admin area uploads
//! new media to the same dataset.
//!
//! ## Features
//!
//! - Read-only GROQ queries against the Sanity query API
//! - Per-section loading that falls back to built-in records when the CMS
//!   is unreachable, with cancellation when a request is abandoned
//! - Projects, gallery (with an enlarged photo view) and video sections
//! - A 24-hour admin login stored in a [`tower-sessions`](https://crates.io/crates/tower-sessions)
//!   session, persisted through [Sea-ORM](https://crates.io/crates/sea-orm)
//!   to SQLite or PostgreSQL
//! - Multipart asset uploads and deletes with a bearer token
//!
//! The admin login is a convenience gate, not an authentication system:
//! credentials are compared as plain strings against configured values.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use model_portfolio::assets::SanityAssetClient;
//! use model_portfolio::config::SiteConfig;
//! use model_portfolio::content::SanityClient;
//! use model_portfolio::profile::Profile;
//! use model_portfolio::web::{create_router, AppState};
//! use tower_sessions::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SiteConfig::from_env()?;
//! let content = Arc::new(SanityClient::new(&config.sanity)?);
//! let assets = Arc::new(SanityAssetClient::new(&config.sanity)?);
//! let addr = config.bind_addr;
//!
//! let state = AppState::new(config, content, assets, Profile::default())?;
//! let app = create_router(state, MemoryStore::default());
//!
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading a section by hand
//!
//! ```no_run
//! use std::sync::Arc;
//! use model_portfolio::config::SanityConfig;
//! use model_portfolio::content::{ContentKind, ContentQuery, SanityClient};
//! use model_portfolio::loader::SectionLoader;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(SanityClient::new(&SanityConfig::default())?);
//! let mut handle = SectionLoader::new(client, ContentQuery::all(ContentKind::Video))
//!     .mount(CancellationToken::new());
//!
//! // Ready with remote records, or Failed with the built-in fallback set.
//! let state = handle.settled().await;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod config;
pub mod content;
pub mod entity;
pub mod error;
pub mod loader;
#[cfg(feature = "migration")]
pub mod migration;
pub mod profile;
pub mod sections;
pub mod session;
pub mod store;
pub mod web;

/// The Sea-ORM session store backing the admin login.
pub use store::SeaOrmStore;

/// Session storage error types and results
///
/// These are re-exported from the `tower-sessions` crate for convenience.
pub use tower_sessions::session_store;

/// Trait for implementing session store expiration cleanup
///
/// Implemented by [`SeaOrmStore`] and driven by the server's hourly sweep.
pub use tower_sessions::ExpiredDeletion;

/// Trait for implementing session storage backends
pub use tower_sessions::SessionStore;
