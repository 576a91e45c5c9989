//! Async wrapper around [`CardCompareSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! price payloads download and storefront pages are fetched.
//!
//! # Example
//!
//! ```no_run
//! use cardcompare::{AsyncCardCompareSdk, SortKey};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncCardCompareSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let groups = sdk.run(|s| s.tcgplayer().groups()).await.unwrap();
//!
//!     // Convenience method for the combined search
//!     let report = sdk.search("Nami", SortKey::Match).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{CompareError, Result};
use crate::models::{CurrencyConversion, SearchReport, SortKey};
use crate::scraper::ScraperConfig;
use crate::CardCompareSdk;

// ---------------------------------------------------------------------------
// AsyncCardCompareSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCardCompareSdk`] instance.
#[derive(Default)]
pub struct AsyncCardCompareSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    fallback_rate: Option<f64>,
    scraper: Option<ScraperConfig>,
}

impl AsyncCardCompareSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn fallback_rate(mut self, rate: f64) -> Self {
        self.fallback_rate = Some(rate);
        self
    }

    pub fn scraper(mut self, scraper: ScraperConfig) -> Self {
        self.scraper = Some(scraper);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncCardCompareSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = CardCompareSdk::builder().offline(self.offline);
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(ttl) = self.cache_ttl {
                builder = builder.cache_ttl(ttl);
            }
            if let Some(rate) = self.fallback_rate {
                builder = builder.fallback_rate(rate);
            }
            if let Some(scraper) = self.scraper {
                builder = builder.scraper(scraper);
            }
            let sdk = builder.build()?;
            Ok(AsyncCardCompareSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| CompareError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncCardCompareSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`CardCompareSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`CardCompareSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally, so calls
/// through one wrapper are serialized.
///
/// Cloning is cheap and shares the same SDK.
#[derive(Clone)]
pub struct AsyncCardCompareSdk {
    inner: Arc<Mutex<CardCompareSdk>>,
}

impl AsyncCardCompareSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncCardCompareSdkBuilder {
        AsyncCardCompareSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cardcompare::AsyncCardCompareSdk;
    /// # async fn example() -> cardcompare::Result<()> {
    /// # let sdk = AsyncCardCompareSdk::builder().build().await?;
    /// let rate = sdk.run(|s| Ok(s.currency().brl_to_usd_rate())).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CardCompareSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| CompareError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| CompareError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Search both sources and reconcile the results asynchronously.
    pub async fn search(&self, query: &str, sort: SortKey) -> Result<SearchReport> {
        let query = query.to_string();
        self.run(move |s| s.search(&query, sort)).await
    }

    /// Convert an amount between currencies asynchronously.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<CurrencyConversion> {
        let from = from.to_string();
        let to = to.to_string();
        self.run(move |s| s.currency().convert(amount, &from, &to))
            .await
    }

    /// Release the HTTP clients and the storefront session.
    ///
    /// The SDK stays usable; sessions are reopened on the next query.
    pub async fn close(&self) -> Result<()> {
        self.run(|s| {
            s.shutdown();
            Ok(())
        })
        .await
    }
}
