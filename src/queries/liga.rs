//! Liga One Piece storefront search.

use tracing::warn;

use crate::config;
use crate::error::Result;
use crate::models::{LigaCard, LigaSearchResponse};
use crate::scraper::LigaScraper;
use crate::session::Session;

// ---------------------------------------------------------------------------
// LigaQuery
// ---------------------------------------------------------------------------

/// Query interface for storefront listings, driven by the session's scraper.
pub struct LigaQuery<'a> {
    session: &'a Session,
}

impl<'a> LigaQuery<'a> {
    /// Create a new `LigaQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Search the storefront, converting prices to USD when a rate is given.
    pub fn search(&self, query: &str, exchange_rate: Option<f64>) -> Result<LigaSearchResponse> {
        search_storefront(&mut self.session.scraper.borrow_mut(), query, exchange_rate)
    }
}

/// Fill in `price_usd` for every positively priced listing.
pub fn annotate_usd(cards: &mut [LigaCard], exchange_rate: f64) {
    for card in cards {
        card.price_usd = card.converted_price(exchange_rate);
    }
}

/// Run a storefront search on `scraper`.
///
/// A failed search closes the scraper so the next call starts from a fresh
/// session.
pub fn search_storefront(
    scraper: &mut LigaScraper,
    query: &str,
    exchange_rate: Option<f64>,
) -> Result<LigaSearchResponse> {
    let mut results = match scraper.search_cards(query) {
        Ok(results) => results,
        Err(e) => {
            warn!(query, error = %e, "storefront search failed; resetting scraper");
            scraper.close();
            return Err(e);
        }
    };

    if let Some(rate) = exchange_rate {
        annotate_usd(&mut results, rate);
    }

    Ok(LigaSearchResponse {
        query: query.trim().to_string(),
        source: config::LIGA_SOURCE_NAME.to_string(),
        total_found: results.len(),
        results,
        exchange_rate,
    })
}
