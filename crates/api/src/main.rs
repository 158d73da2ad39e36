use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use ballotbox_api::{app, config, middleware};
use domain::catalog::AWARDS_CATALOG;
use persistence::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);

    info!("Starting Ballotbox API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    let store = Arc::new(PgStore::new(pool));
    let app = app::create_app(config.clone(), store, AWARDS_CATALOG.clone());

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
