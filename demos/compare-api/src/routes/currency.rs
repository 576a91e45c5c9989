use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use cardcompare::models::CurrencyConversion;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ConvertParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// GET /api/currency/convert?from=BRL&to=USD&amount=10
///
/// Defaults to converting 1 BRL to USD.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> Result<Json<CurrencyConversion>, AppError> {
    let from = params.from.unwrap_or_else(|| "BRL".to_string());
    let to = params.to.unwrap_or_else(|| "USD".to_string());
    let amount = match params.amount.as_deref() {
        None => 1.0,
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::bad_request("Invalid amount"))?,
    };

    let conversion = state.sdk.convert(amount, &from, &to).await?;
    Ok(Json(conversion))
}
