use model_portfolio::migration::{Migrator, MigratorTrait};
use model_portfolio::store::SeaOrmStore;
use model_portfolio::{ExpiredDeletion, SessionStore};
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};

use model_portfolio::entity::admin_session::Entity as AdminSession;

async fn connect() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn record(expires_in: Duration) -> Record {
    let mut data = HashMap::new();
    data.insert("adminToken".to_string(), serde_json::json!("authenticated"));
    data.insert("adminLoginTime".to_string(), serde_json::json!("1700000000000"));
    Record {
        id: Id::default(),
        data,
        expiry_date: OffsetDateTime::now_utc() + expires_in,
    }
}

#[tokio::test]
async fn create_then_load_round_trips_the_session_data() {
    let store = SeaOrmStore::new(connect().await);
    let mut record = record(Duration::hours(24));

    store.create(&mut record).await.unwrap();
    let loaded = store.load(&record.id).await.unwrap().unwrap();

    assert_eq!(loaded.id, record.id);
    assert_eq!(loaded.data, record.data);
}

#[tokio::test]
async fn save_overwrites_an_existing_row() {
    let store = SeaOrmStore::new(connect().await);
    let mut record = record(Duration::hours(24));
    store.create(&mut record).await.unwrap();

    record.data.remove("adminToken");
    store.save(&record).await.unwrap();

    let loaded = store.load(&record.id).await.unwrap().unwrap();
    assert!(!loaded.data.contains_key("adminToken"));
}

#[tokio::test]
async fn expired_sessions_are_invisible_and_swept() {
    let db = connect().await;
    let store = SeaOrmStore::new(db.clone());

    let expired = record(Duration::minutes(-5));
    let live = record(Duration::hours(1));
    store.save(&expired).await.unwrap();
    store.save(&live).await.unwrap();

    assert!(store.load(&expired.id).await.unwrap().is_none());

    store.delete_expired().await.unwrap();
    let rows = AdminSession::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, live.id.to_string());
}

#[tokio::test]
async fn delete_removes_the_row() {
    let store = SeaOrmStore::new(connect().await);
    let mut record = record(Duration::hours(1));
    store.create(&mut record).await.unwrap();

    store.delete(&record.id).await.unwrap();
    assert!(store.load(&record.id).await.unwrap().is_none());
}
