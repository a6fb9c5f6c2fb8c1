use std::sync::Arc;

use property_search::{
    routes::{create_router, AppState},
    telemetry, Config, ListingStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing(false);

    let config = Config::from_env()?;

    // Load errors are fatal: the server never starts on a bad dataset
    let store = match &config.listings_path {
        Some(path) => ListingStore::from_path(path)?,
        None => ListingStore::reference()?,
    };

    let state = AppState::from_config(Arc::new(store), &config);
    if state.require_all_params {
        tracing::info!("Search parameters roi, area and cost are required");
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
