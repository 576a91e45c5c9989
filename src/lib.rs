//! One Piece card price comparison SDK.
//!
//! Searches TCGplayer listings (through the tcgcsv JSON mirror) and the Liga
//! One Piece storefront for the same query, links listings that describe the
//! same printed card, and reports which platform is cheaper once storefront
//! prices are converted from BRL to USD.
//!
//! # Quick start
//!
//! ```no_run
//! use cardcompare::{CardCompareSdk, SortKey};
//!
//! let sdk = CardCompareSdk::builder().build().unwrap();
//!
//! let report = sdk.search("Monkey D. Luffy", SortKey::Savings).unwrap();
//! for m in &report.matches {
//!     println!("{:?} {:?}", m.match_type, m.savings);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod queries;
pub mod scraper;
pub mod session;

#[cfg(feature = "async")]
pub use async_client::AsyncCardCompareSdk;
pub use cache::CacheManager;
pub use error::{CompareError, Result};
pub use matching::Comparison;
pub use models::{SearchReport, SortKey, SourceErrors};
pub use scraper::{LigaScraper, ScraperConfig};
pub use session::Session;

use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CardCompareSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardCompareSdk`] instance.
///
/// Use [`CardCompareSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardCompareSdkBuilder::build) to create the SDK.
pub struct CardCompareSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    cache_ttl: Duration,
    fallback_rate: f64,
    scraper: ScraperConfig,
}

impl Default for CardCompareSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            cache_ttl: config::DEFAULT_CACHE_TTL,
            fallback_rate: config::FALLBACK_BRL_TO_USD,
            scraper: ScraperConfig::default(),
        }
    }
}

impl CardCompareSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/cardcompare` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, price data comes only from previously cached payloads,
    /// exchange rates fall back to the static rate and storefront searches
    /// fail. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a cached price-data payload is reused before re-downloading.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// BRL -> USD rate used when no live rate can be obtained.
    pub fn fallback_rate(mut self, rate: f64) -> Self {
        self.fallback_rate = rate;
        self
    }

    /// Storefront scraper settings. The builder's `offline` and `timeout`
    /// override the corresponding fields.
    pub fn scraper(mut self, scraper: ScraperConfig) -> Self {
        self.scraper = scraper;
        self
    }

    /// Build the SDK. No network access happens until the first query.
    pub fn build(self) -> Result<CardCompareSdk> {
        if !(self.fallback_rate.is_finite() && self.fallback_rate > 0.0) {
            return Err(CompareError::InvalidArgument(format!(
                "fallback rate must be positive, got {}",
                self.fallback_rate
            )));
        }
        let cache = CacheManager::new(self.cache_dir, self.offline, self.timeout, self.cache_ttl)?;
        let scraper = LigaScraper::new(ScraperConfig {
            offline: self.offline,
            timeout: self.timeout,
            ..self.scraper
        });
        let session = Session::new(cache, scraper, self.fallback_rate);
        Ok(CardCompareSdk { session })
    }
}

// ---------------------------------------------------------------------------
// CardCompareSdk
// ---------------------------------------------------------------------------

/// The main entry point for the card comparison SDK.
///
/// Wraps a [`Session`] (which owns the [`CacheManager`] and the
/// [`LigaScraper`]) and exposes per-source query interfaces as lightweight
/// borrowing wrappers.
///
/// Created via [`CardCompareSdk::builder()`].
pub struct CardCompareSdk {
    session: Session,
}

impl CardCompareSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> CardCompareSdkBuilder {
        CardCompareSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the TCGplayer query interface.
    pub fn tcgplayer(&self) -> queries::TcgPlayerQuery<'_> {
        queries::TcgPlayerQuery::new(&self.session)
    }

    /// Access the storefront query interface.
    pub fn liga(&self) -> queries::LigaQuery<'_> {
        queries::LigaQuery::new(&self.session)
    }

    /// Access the currency conversion interface.
    pub fn currency(&self) -> queries::CurrencyQuery<'_> {
        queries::CurrencyQuery::new(&self.session)
    }

    // -- Combined search ---------------------------------------------------

    /// Search both sources for `query` and reconcile the results.
    ///
    /// The two sources are queried in parallel. A source that fails is
    /// reported in [`SearchReport::errors`] and contributes no listings; the
    /// call itself only fails for an empty query.
    pub fn search(&self, query: &str, sort: SortKey) -> Result<SearchReport> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CompareError::InvalidArgument(
                "Query parameter is required".into(),
            ));
        }

        let (exchange_rate, rate_fallback, rate_warning) =
            match self.currency().convert(1.0, "BRL", "USD") {
                Ok(c) => (c.rate, c.fallback, c.warning),
                Err(e) => (
                    self.session.fallback_rate,
                    true,
                    Some(format!("Using fallback exchange rate: {e}")),
                ),
            };

        let category_id = self.session.category_id;
        let mut cache_guard = self.session.cache.borrow_mut();
        let mut scraper_guard = self.session.scraper.borrow_mut();
        let cache: &mut CacheManager = &mut cache_guard;
        let scraper: &mut LigaScraper = &mut scraper_guard;

        let (tcg, liga) = thread::scope(|s| {
            let tcg = s.spawn(move || {
                queries::tcgplayer::search_products(cache, category_id, query)
            });
            let liga = s.spawn(move || {
                queries::liga::search_storefront(scraper, query, Some(exchange_rate))
            });
            (
                settle("tcgplayer", tcg.join()),
                settle("liga", liga.join()),
            )
        });
        drop(cache_guard);
        drop(scraper_guard);

        let mut errors = SourceErrors::default();
        let tcg_results = match tcg {
            Ok(resp) => resp.results,
            Err(e) => {
                errors.tcgplayer = Some(e);
                Vec::new()
            }
        };
        let liga_results = match liga {
            Ok(resp) => resp.results,
            Err(e) => {
                errors.liga = Some(e);
                Vec::new()
            }
        };

        let comparison = Comparison::build(
            Some(tcg_results.as_slice()),
            Some(liga_results.as_slice()),
            exchange_rate,
        )
        .sorted(sort);
        info!(
            query,
            tcg = tcg_results.len(),
            liga = liga_results.len(),
            matches = comparison.matches.len(),
            "search complete"
        );

        Ok(SearchReport {
            query: query.to_string(),
            exchange_rate,
            rate_fallback,
            rate_warning,
            tcg_results,
            liga_results,
            errors,
            matches: comparison.matches,
            stats: comparison.stats,
        })
    }

    // -- Utility methods ---------------------------------------------------

    /// Remove every cached price-data payload.
    pub fn clear_cache(&self) -> Result<()> {
        self.session.cache.borrow().clear()
    }

    /// Release the HTTP clients and the storefront session without consuming
    /// the SDK. Later queries reopen them lazily.
    pub fn shutdown(&self) {
        self.session.close();
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        self.shutdown();
    }

    /// Return a reference to the underlying [`Session`] for advanced usage.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Flatten a source thread's outcome into a result with a display message.
fn settle<T>(source: &str, joined: thread::Result<Result<T>>) -> std::result::Result<T, String> {
    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!(source, error = %e, "source search failed");
            Err(e.to_string())
        }
        Err(_) => {
            warn!(source, "source search panicked");
            Err(format!("{source} search panicked"))
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CardCompareSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.session.cache.borrow();
        let scraper = self.session.scraper.borrow();
        write!(
            f,
            "CardCompareSdk(cache_dir={}, storefront={}, offline={})",
            cache.cache_dir.display(),
            scraper.config().base_url,
            cache.offline
        )
    }
}
