use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use wortkarten_algo::VocabularyEntry;

use crate::db::vocabulary;
use crate::response::{AppError, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VocabularyQuery {
    level: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

pub async fn fetch_page(
    State(state): State<AppState>,
    Query(query): Query<VocabularyQuery>,
) -> Result<Json<SuccessResponse<Vec<VocabularyEntry>>>, AppError> {
    let level = query
        .level
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::bad_request("level is required"))?;

    let catalog = state
        .catalog()
        .ok_or_else(|| AppError::service_unavailable("vocabulary catalog unavailable"))?;

    let limit = state.config().page_limit(query.limit);
    let offset = query.offset.unwrap_or(0);

    let entries = vocabulary::fetch_page(catalog.pool(), level, limit, offset).await?;
    Ok(SuccessResponse::ok(entries))
}
