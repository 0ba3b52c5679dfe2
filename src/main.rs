//! Portfolio site server.
//!
//! Configuration comes from the environment (and a `.env` file if present);
//! see `SiteConfig` for the recognized variables. Run with
//! `RUST_LOG=model_portfolio=debug` for request-level logging.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use model_portfolio::assets::SanityAssetClient;
use model_portfolio::config::SiteConfig;
use model_portfolio::content::SanityClient;
use model_portfolio::profile::Profile;
use model_portfolio::store::SeaOrmStore;
use model_portfolio::web::{create_router, AppState};
use model_portfolio::ExpiredDeletion;
use sea_orm::{ConnectOptions, Database};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How often expired session rows are purged.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    dotenv().ok();

    let config = SiteConfig::from_env()?;
    config.warn_insecure_defaults();

    info!("Connecting to database: {}", config.database_url);

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(10 * 60))
        .max_lifetime(Duration::from_secs(30 * 60));

    let db = Database::connect(opt).await?;

    #[cfg(feature = "migration")]
    {
        use model_portfolio::migration::{Migrator, MigratorTrait};
        Migrator::up(&db, None).await?;
        info!("Session table is up to date");
    }

    let store = SeaOrmStore::new(db);
    let sweeper = store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(err) = sweeper.delete_expired().await {
                error!(error = %err, "failed to delete expired sessions");
            }
        }
    });

    let profile = Profile::resolve(config.profile_path.as_deref().map(Path::new))?;
    let content = SanityClient::new(&config.sanity)?;
    let assets = SanityAssetClient::new(&config.sanity)?;
    info!(endpoint = content.endpoint(), "Content source configured");

    let addr = config.bind_addr;
    let state = AppState::new(config, Arc::new(content), Arc::new(assets), profile)?;
    let app = create_router(state, store);

    info!("Server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
