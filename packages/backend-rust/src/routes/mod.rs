mod health;
mod levels;
mod vocabulary;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route(
            "/api/levels",
            get(levels::list_levels).fallback(fallback_handler),
        )
        .route(
            "/api/vocabulary",
            get(vocabulary::fetch_page).fallback(fallback_handler),
        );

    let mut health_paths = vec![
        state.config().healthcheck_endpoint.clone(),
        "/api/health".to_string(),
    ];
    health_paths.dedup();
    for path in health_paths {
        app = app.nest(path.as_str(), health::router());
    }

    app.fallback(fallback_handler).with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("route not found").into_response()
}
