use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use cardcompare::models::TcgPlayerSearchResponse;
use serde::Deserialize;
use serde_json::Value;

use super::required_query;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/tcgplayer/search?q=zoro
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<TcgPlayerSearchResponse>, AppError> {
    let query = required_query(params.q)?;
    let resp = state
        .sdk
        .run(move |s| s.tcgplayer().search(&query))
        .await?;
    Ok(Json(resp))
}

/// GET /api/tcgplayer/categories
///
/// Raw category listing from the price-data API.
pub async fn categories(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let categories = state.sdk.run(|s| s.tcgplayer().categories()).await?;
    Ok(Json(categories))
}
