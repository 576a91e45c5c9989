use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use cardcompare::models::LigaSearchResponse;
use serde::Deserialize;

use super::required_query;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/liga/search?q=nami
///
/// Storefront listings with prices also converted to USD.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<LigaSearchResponse>, AppError> {
    let query = required_query(params.q)?;
    let resp = state
        .sdk
        .run(move |s| {
            let rate = s.currency().brl_to_usd_rate();
            s.liga().search(&query, Some(rate))
        })
        .await?;
    Ok(Json(resp))
}
