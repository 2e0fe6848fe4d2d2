pub mod config;
pub mod db;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::Catalog;
use crate::state::AppState;

/// Open the catalog named by `config`, seeding it when configured
///
/// Returns `None` when the catalog cannot be opened; the API then answers
/// `503` for vocabulary requests while health endpoints keep working.
pub async fn open_catalog(config: &Config) -> Option<Arc<Catalog>> {
    let catalog = match Catalog::connect(&config.database_url).await {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!(error = %err, "vocabulary catalog not initialized");
            return None;
        }
    };

    if let Some(path) = config.seed_path.as_deref() {
        if let Err(err) = seed::seed_if_empty(&catalog, path).await {
            tracing::warn!(error = %err, "vocabulary seed skipped");
        }
    }

    Some(Arc::new(catalog))
}

pub fn build_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn create_app(config: Config) -> axum::Router {
    let catalog = open_catalog(&config).await;
    build_app(AppState::new(config, catalog))
}
