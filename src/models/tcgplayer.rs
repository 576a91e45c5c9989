use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ExtendedData — Name/value attribute attached to a TCGplayer product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedData {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub value: String,
}

// ---------------------------------------------------------------------------
// MarketPrice — One row of a group's price listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    pub product_id: i64,
    pub low_price: Option<f64>,
    pub mid_price: Option<f64>,
    pub high_price: Option<f64>,
    pub market_price: Option<f64>,
    pub direct_low_price: Option<f64>,
    #[serde(default)]
    pub sub_type_name: String,
}

// ---------------------------------------------------------------------------
// TcgGroup — A TCGplayer group (one printed set)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcgGroup {
    pub group_id: i64,
    pub name: String,
    pub abbreviation: Option<String>,
    pub published_on: Option<String>,
    pub modified_on: Option<String>,
}

// ---------------------------------------------------------------------------
// TcgPlayerCard — A product enriched with its price and set information
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerCard {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub clean_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub group_id: i64,
    #[serde(default)]
    pub url: String,
    pub modified_on: Option<String>,
    pub extended_data: Option<Vec<ExtendedData>>,
    pub price: Option<MarketPrice>,
    pub set_name: Option<String>,
    pub set_code: Option<String>,
}

impl TcgPlayerCard {
    /// Value of the extended attribute named exactly `field`, if non-empty.
    pub fn extended_value(&self, field: &str) -> Option<&str> {
        self.extended_data
            .as_ref()?
            .iter()
            .find(|d| d.name == field)
            .map(|d| d.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Market price, treating a missing quote as absent.
    pub fn market_price(&self) -> Option<f64> {
        self.price.as_ref().and_then(|p| p.market_price)
    }
}

// ---------------------------------------------------------------------------
// TcgPlayerSearchResponse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayerSearchResponse {
    pub query: String,
    pub category_id: u32,
    pub results: Vec<TcgPlayerCard>,
    pub total_found: usize,
}
