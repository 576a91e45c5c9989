//! Shared state behind every query interface.
//!
//! Owns the price-data cache, the storefront scraper service and the last
//! good exchange rates. Query structs borrow the session; interior mutability
//! keeps their methods on `&self`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Instant;

use crate::cache::CacheManager;
use crate::config;
use crate::scraper::LigaScraper;

/// A live exchange rate remembered for use when the rate API is unreachable.
#[derive(Debug, Clone)]
pub struct RememberedRate {
    pub rate: f64,
    /// Unix seconds reported with the rate.
    pub timestamp: u64,
    pub date: Option<String>,
    fetched_at: Instant,
}

impl RememberedRate {
    pub fn new(rate: f64, timestamp: u64, date: Option<String>) -> Self {
        Self {
            rate,
            timestamp,
            date,
            fetched_at: Instant::now(),
        }
    }

    pub fn is_recent(&self) -> bool {
        self.fetched_at.elapsed() < config::RATE_MEMORY_TTL
    }
}

pub struct Session {
    pub cache: RefCell<CacheManager>,
    pub scraper: RefCell<LigaScraper>,
    /// BRL -> USD rate used when no live or remembered rate exists.
    pub fallback_rate: f64,
    pub category_id: u32,
    rates: RefCell<HashMap<(String, String), RememberedRate>>,
}

impl Session {
    pub fn new(cache: CacheManager, scraper: LigaScraper, fallback_rate: f64) -> Self {
        Self {
            cache: RefCell::new(cache),
            scraper: RefCell::new(scraper),
            fallback_rate,
            category_id: config::ONE_PIECE_CATEGORY_ID,
            rates: RefCell::new(HashMap::new()),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.cache.borrow().offline
    }

    pub fn remember_rate(&self, from: &str, to: &str, rate: RememberedRate) {
        self.rates
            .borrow_mut()
            .insert((from.to_string(), to.to_string()), rate);
    }

    /// The remembered rate for a pair, if it is still recent enough to use.
    pub fn recent_rate(&self, from: &str, to: &str) -> Option<RememberedRate> {
        self.rates
            .borrow()
            .get(&(from.to_string(), to.to_string()))
            .filter(|r| r.is_recent())
            .cloned()
    }

    /// Release the HTTP client and the storefront session.
    pub fn close(&self) {
        self.scraper.borrow_mut().close();
        self.cache.borrow_mut().close();
    }
}
