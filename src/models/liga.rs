use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceLevel / PricePoint — Storefront price columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    Min,
    Avg,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceLevel {
    Cheap,
    Medium,
    Expensive,
}

impl From<PriceKind> for PriceLevel {
    fn from(kind: PriceKind) -> Self {
        match kind {
            PriceKind::Min => PriceLevel::Cheap,
            PriceKind::Avg => PriceLevel::Medium,
            PriceKind::Max => PriceLevel::Expensive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: PriceKind,
}

// ---------------------------------------------------------------------------
// LigaCard — One scraped storefront listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigaCard {
    pub name: String,
    #[serde(default)]
    pub numeric_code: String,
    /// Listing price in `currency` (BRL on the storefront).
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    /// Price converted to USD, filled in once an exchange rate is known.
    pub price_usd: Option<f64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: String,
    pub rarity: Option<String>,
    pub set: Option<String>,
    pub condition: Option<String>,
    pub seller: Option<String>,
    pub stock: Option<u32>,
    pub price_level: Option<PriceLevel>,
    #[serde(default)]
    pub all_prices: Vec<PricePoint>,
}

impl LigaCard {
    /// Listing price converted with `rate`, absent for non-positive prices.
    pub fn converted_price(&self, rate: f64) -> Option<f64> {
        (self.price > 0.0).then(|| self.price * rate)
    }
}

// ---------------------------------------------------------------------------
// LigaSearchResponse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigaSearchResponse {
    pub query: String,
    pub source: String,
    pub results: Vec<LigaCard>,
    pub total_found: usize,
    pub exchange_rate: Option<f64>,
}
