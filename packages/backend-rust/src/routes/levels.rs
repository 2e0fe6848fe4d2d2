use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::vocabulary;
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelsQuery {
    base_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LevelsResponse {
    levels: Vec<String>,
}

pub async fn list_levels(
    State(state): State<AppState>,
    Query(query): Query<LevelsQuery>,
) -> Result<Json<LevelsResponse>, AppError> {
    let catalog = state
        .catalog()
        .ok_or_else(|| AppError::service_unavailable("vocabulary catalog unavailable"))?;

    let levels = vocabulary::list_levels(catalog.pool(), query.base_level.as_deref()).await?;
    Ok(Json(LevelsResponse { levels }))
}
