//! TCGplayer product search backed by the tcgcsv static JSON mirror.
//!
//! tcgcsv exposes one groups listing per category and, per group, a products
//! and a prices listing. A search walks every group, filters products by name,
//! and joins the matches with their market price.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::CacheManager;
use crate::config;
use crate::error::{CompareError, Result};
use crate::matching::{set_code_from_number, set_code_from_set_name};
use crate::models::{MarketPrice, TcgGroup, TcgPlayerCard, TcgPlayerSearchResponse};
use crate::session::Session;

// ---------------------------------------------------------------------------
// TcgPlayerQuery
// ---------------------------------------------------------------------------

/// Query interface for TCGplayer listings.
pub struct TcgPlayerQuery<'a> {
    session: &'a Session,
}

impl<'a> TcgPlayerQuery<'a> {
    /// Create a new `TcgPlayerQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// All groups (printed sets) in the One Piece category.
    pub fn groups(&self) -> Result<Vec<TcgGroup>> {
        fetch_groups(&mut self.session.cache.borrow_mut(), self.session.category_id)
    }

    /// Every product in a group, without prices.
    pub fn products(&self, group_id: i64) -> Result<Vec<TcgPlayerCard>> {
        fetch_products(
            &mut self.session.cache.borrow_mut(),
            self.session.category_id,
            group_id,
        )
    }

    /// Every price row in a group.
    pub fn prices(&self, group_id: i64) -> Result<Vec<MarketPrice>> {
        fetch_prices(
            &mut self.session.cache.borrow_mut(),
            self.session.category_id,
            group_id,
        )
    }

    /// Raw category listing.
    pub fn categories(&self) -> Result<Value> {
        self.session
            .cache
            .borrow_mut()
            .fetch_json("categories", config::CATEGORIES_URL)
    }

    /// Search all groups for products whose name matches `query`.
    pub fn search(&self, query: &str) -> Result<TcgPlayerSearchResponse> {
        search_products(
            &mut self.session.cache.borrow_mut(),
            self.session.category_id,
            query,
        )
    }
}

// ---------------------------------------------------------------------------
// Fetch helpers
// ---------------------------------------------------------------------------

/// Unwrap the `{"results": [...]}` envelope, accepting a bare array too.
fn results_array(value: Value, what: &str) -> Result<Vec<Value>> {
    let value = match value {
        Value::Object(mut map) => map.remove("results").unwrap_or(Value::Null),
        other => other,
    };
    match value {
        Value::Array(arr) => Ok(arr),
        _ => Err(CompareError::NotFound(format!("{what} response is not an array"))),
    }
}

/// Deserialize each entry, skipping the ones that do not fit the model.
fn parse_entries<T: DeserializeOwned>(entries: Vec<Value>, what: &str) -> Vec<T> {
    let total = entries.len();
    let parsed: Vec<T> = entries
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if parsed.len() < total {
        debug!(what, skipped = total - parsed.len(), "skipped malformed entries");
    }
    parsed
}

pub fn fetch_groups(cache: &mut CacheManager, category_id: u32) -> Result<Vec<TcgGroup>> {
    let value = cache.fetch_json(
        &format!("{category_id}/groups"),
        &config::groups_url(category_id),
    )?;
    Ok(parse_entries(results_array(value, "groups")?, "groups"))
}

pub fn fetch_products(
    cache: &mut CacheManager,
    category_id: u32,
    group_id: i64,
) -> Result<Vec<TcgPlayerCard>> {
    let value = cache.fetch_json(
        &format!("{category_id}/{group_id}/products"),
        &config::products_url(category_id, group_id),
    )?;
    Ok(parse_entries(results_array(value, "products")?, "products"))
}

pub fn fetch_prices(
    cache: &mut CacheManager,
    category_id: u32,
    group_id: i64,
) -> Result<Vec<MarketPrice>> {
    let value = cache.fetch_json(
        &format!("{category_id}/{group_id}/prices"),
        &config::prices_url(category_id, group_id),
    )?;
    Ok(parse_entries(results_array(value, "prices")?, "prices"))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Whether a product name matches the full query or any query term.
///
/// Terms shorter than two characters are ignored.
pub fn product_matches(card: &TcgPlayerCard, query: &str) -> bool {
    let query = query.to_lowercase();
    let name = card.name.to_lowercase();
    let clean = card.clean_name.to_lowercase();

    if name.contains(&query) || clean.contains(&query) {
        return true;
    }
    query
        .split(' ')
        .filter(|t| t.chars().count() > 1)
        .any(|t| name.contains(t) || clean.contains(t))
}

/// Set code for a product: `Number` attribute prefix, then group
/// abbreviation, then a guess from the group name.
fn resolve_set_code(card: &TcgPlayerCard, group: &TcgGroup) -> String {
    let from_number = card.extended_data.as_ref().and_then(|data| {
        data.iter()
            .find(|d| d.name.eq_ignore_ascii_case("number"))
            .and_then(|d| set_code_from_number(&d.value))
    });

    from_number
        .or_else(|| group.abbreviation.clone().filter(|a| !a.is_empty()))
        .unwrap_or_else(|| set_code_from_set_name(&group.name))
}

/// Search every group of `category_id` for `query`.
///
/// A group whose products cannot be loaded is skipped; a group whose prices
/// cannot be loaded contributes listings without a price.
pub fn search_products(
    cache: &mut CacheManager,
    category_id: u32,
    query: &str,
) -> Result<TcgPlayerSearchResponse> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CompareError::InvalidArgument(
            "Query parameter is required".into(),
        ));
    }

    let groups = fetch_groups(cache, category_id)?;
    debug!(category_id, groups = groups.len(), "loaded groups");

    let mut results = Vec::new();
    for group in &groups {
        let products = match fetch_products(cache, category_id, group.group_id) {
            Ok(products) => products,
            Err(e) => {
                warn!(group = %group.name, group_id = group.group_id, error = %e, "skipping group");
                continue;
            }
        };

        let matching: Vec<TcgPlayerCard> = products
            .into_iter()
            .filter(|p| product_matches(p, query))
            .collect();
        if matching.is_empty() {
            continue;
        }
        debug!(group = %group.name, count = matching.len(), "matches in group");

        let prices = fetch_prices(cache, category_id, group.group_id).unwrap_or_else(|e| {
            warn!(group = %group.name, error = %e, "prices unavailable for group");
            Vec::new()
        });

        for mut card in matching {
            card.price = prices
                .iter()
                .find(|p| p.product_id == card.product_id)
                .cloned();
            card.set_code = Some(resolve_set_code(&card, group));
            card.set_name = Some(group.name.clone());
            results.push(card);
        }
    }

    let total_found = results.len();
    results.truncate(config::MAX_TCG_RESULTS);
    info!(query, total_found, "tcgplayer search complete");

    Ok(TcgPlayerSearchResponse {
        query: query.to_string(),
        category_id,
        results,
        total_found,
    })
}
