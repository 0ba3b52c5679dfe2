//! Admin session entity model for Sea-ORM database interaction.
//!
//! Maps the `admin_session` table holding the server-side half of each
//! visitor's session: the key/value entries the admin gate writes
//! (`adminToken`, `adminLoginTime`) live inside the serialized record.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model for one stored session.
///
/// # Database Schema
///
/// | Column      | Type                    | Description                         |
/// |-------------|-------------------------|-------------------------------------|
/// | id          | TEXT (Primary Key)      | Session ID from the session cookie  |
/// | data        | BLOB / BYTEA            | MessagePack encoded session record  |
/// | expiry_date | TIMESTAMPTZ             | Session expiration timestamp        |
///
/// The table carries no schema qualifier so the same entity works on SQLite
/// and PostgreSQL.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_session")]
pub struct Model {
    /// Session identifier as rendered by `tower_sessions::session::Id`.
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    /// MessagePack encoding of the whole `tower_sessions` record.
    pub data: Vec<u8>,

    /// Rows past this instant are invisible to loads and removed by
    /// [`ExpiredDeletion`](tower_sessions::ExpiredDeletion).
    pub expiry_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
