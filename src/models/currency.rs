use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ExchangeRateResponse — Payload of the exchange-rate API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRateResponse {
    pub success: Option<bool>,
    pub timestamp: Option<u64>,
    pub time_last_updated: Option<u64>,
    pub base: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

// ---------------------------------------------------------------------------
// CurrencyConversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub converted_amount: f64,
    /// Unix seconds of the rate's origin.
    pub timestamp: u64,
    pub date: Option<String>,
    #[serde(default)]
    pub fallback: bool,
    pub warning: Option<String>,
}
