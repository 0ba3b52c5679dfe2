//! Database entity models.
//!
//! The only persisted data is the session table backing
//! [`SeaOrmStore`](crate::store::SeaOrmStore).

/// Session rows for the admin gate's server-side storage.
pub mod admin_session;
