use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use cardcompare::{SearchReport, SortKey};
use serde::Deserialize;

use super::required_query;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// GET /api/search?q=luffy&sort=savings
///
/// Search both platforms and return the reconciled comparison. A platform
/// that fails is reported under `errors` rather than failing the request.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchReport>, AppError> {
    let query = required_query(params.q)?;
    let sort = match params.sort.as_deref() {
        Some(s) if !s.trim().is_empty() => s.parse::<SortKey>()?,
        _ => SortKey::default(),
    };

    let report = state.sdk.search(&query, sort).await?;
    Ok(Json(report))
}
