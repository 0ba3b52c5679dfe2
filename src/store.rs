use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use time::OffsetDateTime;
use tower_sessions::{session::Id, session::Record, session_store, ExpiredDeletion, SessionStore};

use crate::entity::admin_session::{self, ActiveModel, Entity as AdminSession};

/// A Sea-ORM backed session store for `tower-sessions`.
///
/// This is the persistent side of the admin gate's storage: the gate reads
/// and writes plain key/value entries on a [`tower_sessions::Session`], and
/// this store keeps the resulting records in the `admin_session` table of
/// any database Sea-ORM can reach (SQLite by default, PostgreSQL with the
/// `postgres` feature).
///
/// Records are encoded with MessagePack.
///
/// # Usage
///
/// ```no_run
/// use sea_orm::Database;
/// use tower_sessions::{Expiry, SessionManagerLayer};
/// use model_portfolio::store::SeaOrmStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = Database::connect("sqlite::memory:").await?;
/// let store = SeaOrmStore::new(conn);
/// let layer = SessionManagerLayer::new(store)
///     .with_expiry(Expiry::OnInactivity(time::Duration::hours(24)));
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - Database errors → `session_store::Error::Backend`
/// - Encoding errors → `session_store::Error::Encode`
/// - Decoding errors → `session_store::Error::Decode`
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    conn: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(record: &Record) -> session_store::Result<ActiveModel> {
        let data =
            rmp_serde::to_vec(record).map_err(|e| session_store::Error::Encode(e.to_string()))?;
        Ok(ActiveModel {
            id: Set(record.id.to_string()),
            data: Set(data),
            expiry_date: Set(to_db_time(record.expiry_date)?),
        })
    }
}

#[async_trait]
impl SessionStore for SeaOrmStore {
    /// Inserts a new record, drawing a fresh id while the current one is taken.
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let txn = self.conn.begin().await.map_err(backend)?;

        while AdminSession::find_by_id(record.id.to_string())
            .one(&txn)
            .await
            .map_err(backend)?
            .is_some()
        {
            record.id = Id::default();
        }

        Self::active_model(record)?
            .insert(&txn)
            .await
            .map_err(backend)?;

        txn.commit().await.map_err(backend)
    }

    /// Upserts the record.
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        AdminSession::insert(Self::active_model(record)?)
            .on_conflict(
                OnConflict::column(admin_session::Column::Id)
                    .update_columns([
                        admin_session::Column::Data,
                        admin_session::Column::ExpiryDate,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Loads a record that has not yet expired.
    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = to_db_time(OffsetDateTime::now_utc())?;

        let row = AdminSession::find_by_id(session_id.to_string())
            .filter(admin_session::Column::ExpiryDate.gt(now))
            .one(&self.conn)
            .await
            .map_err(backend)?;

        row.map(|model| {
            rmp_serde::from_slice(&model.data)
                .map_err(|e| session_store::Error::Decode(e.to_string()))
        })
        .transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        AdminSession::delete_by_id(session_id.to_string())
            .exec(&self.conn)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SeaOrmStore {
    /// Removes every record whose expiry date has passed.
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = to_db_time(OffsetDateTime::now_utc())?;

        let result = AdminSession::delete_many()
            .filter(admin_session::Column::ExpiryDate.lt(now))
            .exec(&self.conn)
            .await
            .map_err(backend)?;

        if result.rows_affected > 0 {
            tracing::debug!(rows = result.rows_affected, "deleted expired sessions");
        }
        Ok(())
    }
}

fn backend(err: sea_orm::DbErr) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

// tower-sessions speaks `time`, Sea-ORM's timestamp columns speak `chrono`.
fn to_db_time(at: OffsetDateTime) -> session_store::Result<DateTimeWithTimeZone> {
    DateTime::<Utc>::from_timestamp(at.unix_timestamp(), at.nanosecond())
        .map(Into::into)
        .ok_or_else(|| session_store::Error::Encode(format!("timestamp out of range: {at}")))
}
