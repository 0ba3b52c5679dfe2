//! The admin login gate.
//!
//! This is a convenience gate, not access control: credentials are compared
//! as plain strings against configured values and the only state is a
//! token plus its issue time in the visitor's session storage. Anyone who
//! can read the configuration can log in.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};

use super::storage::SessionStorage;
use crate::config::AdminCredentials;
use crate::error::{AuthError, SessionError};

/// Storage key holding the login marker.
pub const TOKEN_KEY: &str = "adminToken";
/// Storage key holding the login time in Unix milliseconds.
pub const LOGIN_TIME_KEY: &str = "adminLoginTime";
/// Value stored under [`TOKEN_KEY`].
pub const TOKEN_VALUE: &str = "authenticated";
/// A login stays valid for this many milliseconds, inclusive.
pub const SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// Outcome of [`SessionGate::check_session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated,
    NotAuthenticated,
}

/// Checks admin credentials and the 24-hour login window.
#[derive(Clone)]
pub struct SessionGate {
    credentials: AdminCredentials,
    clock: Arc<dyn Clock>,
}

impl SessionGate {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(credentials: AdminCredentials, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, clock }
    }

    /// Log in. Writes the token and login time only on an exact match.
    pub async fn authenticate<S: SessionStorage + ?Sized>(
        &self,
        storage: &S,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if email != self.credentials.email || password != self.credentials.password {
            warn!("admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        storage.set(TOKEN_KEY, TOKEN_VALUE.to_string()).await?;
        storage
            .set(LOGIN_TIME_KEY, self.clock.now_ms().to_string())
            .await?;
        info!("admin logged in");
        Ok(())
    }

    /// Whether the stored login is still valid. Invalid or expired logins
    /// are cleared on the spot.
    pub async fn check_session<S: SessionStorage + ?Sized>(
        &self,
        storage: &S,
    ) -> Result<SessionStatus, SessionError> {
        let token = storage.get(TOKEN_KEY).await?;
        let issued_at = storage
            .get(LOGIN_TIME_KEY)
            .await?
            .and_then(|raw| raw.trim().parse::<i64>().ok());

        let valid = match (token, issued_at) {
            (Some(token), Some(issued_at)) if !token.is_empty() => {
                self.clock.now_ms() - issued_at <= SESSION_TTL_MS
            }
            _ => false,
        };

        if valid {
            return Ok(SessionStatus::Authenticated);
        }

        self.clear(storage).await?;
        Ok(SessionStatus::NotAuthenticated)
    }

    /// Forget the login unconditionally.
    pub async fn logout<S: SessionStorage + ?Sized>(&self, storage: &S) -> Result<(), SessionError> {
        self.clear(storage).await?;
        info!("admin logged out");
        Ok(())
    }

    async fn clear<S: SessionStorage + ?Sized>(&self, storage: &S) -> Result<(), SessionError> {
        storage.remove(TOKEN_KEY).await?;
        storage.remove(LOGIN_TIME_KEY).await
    }
}
