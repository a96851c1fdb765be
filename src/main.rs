use std::sync::Arc;

use waypoint::api::{self, AppState};
use waypoint::config::Config;
use waypoint::content_api::ContentApi;
use waypoint::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config.mongo_uri, &config.mongo_db_name).await?;
    let content_api = ContentApi::new(&config)?;

    let state = AppState {
        api: Arc::new(content_api),
        db: Arc::new(db),
    };

    let app = api::create_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
