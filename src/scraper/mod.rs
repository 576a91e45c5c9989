//! Liga One Piece storefront scraper.
//!
//! [`LigaScraper`] owns the HTTP session used to browse the storefront. The
//! session is acquired by [`initialize`](LigaScraper::initialize) (or lazily
//! on the first search), reset after a failed fetch, and released by
//! [`close`](LigaScraper::close) or on drop. One scraper is owned by the SDK
//! session and shared by every search.

pub mod html;

pub use html::parse_listing_page;

use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Url;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{CompareError, Result};
use crate::models::LigaCard;

// ---------------------------------------------------------------------------
// ScraperConfig
// ---------------------------------------------------------------------------

/// Settings for the storefront scraper.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Storefront origin, e.g. `https://www.ligaonepiece.com.br`.
    pub base_url: String,
    /// Upper bound on result pages fetched per search.
    pub max_pages: usize,
    /// Pause between page fetches.
    pub page_delay: Duration,
    /// Random extra pause added on top of `page_delay`.
    pub page_jitter: Duration,
    pub timeout: Duration,
    /// Refuse all network access.
    pub offline: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: config::LIGA_BASE.to_string(),
            max_pages: config::MAX_LIGA_PAGES,
            page_delay: config::DEFAULT_PAGE_DELAY,
            page_jitter: Duration::from_millis(500),
            timeout: config::DEFAULT_TIMEOUT,
            offline: false,
        }
    }
}

// ---------------------------------------------------------------------------
// LigaScraper
// ---------------------------------------------------------------------------

pub struct LigaScraper {
    config: ScraperConfig,
    client: Option<Client>,
}

impl LigaScraper {
    /// Create a scraper. No session is opened until first use.
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Open the browsing session. Calling this on an open scraper is a no-op.
    pub fn initialize(&mut self) -> Result<()> {
        if self.client.is_some() {
            return Ok(());
        }
        if self.config.offline {
            return Err(CompareError::Offline(
                "storefront scraping is disabled in offline mode".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.8"),
        );

        let client = Client::builder()
            .user_agent(config::BROWSER_USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .timeout(self.config.timeout)
            .build()?;

        debug!(base = %self.config.base_url, "storefront session opened");
        self.client = Some(client);
        Ok(())
    }

    /// Build the search URL for `query`; page 1 carries no page parameter.
    pub fn search_url(&self, query: &str, page: usize) -> Result<Url> {
        let base = format!("{}/", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .map_err(|e| CompareError::InvalidArgument(format!("bad storefront URL {base}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("view", "cards/search")
                .append_pair("card", query)
                .append_pair("tipo", "1");
            if page > 1 {
                pairs.append_pair("page", &page.to_string());
            }
        }
        Ok(url)
    }

    /// Search the storefront and return every distinct listing found.
    ///
    /// Walks result pages until one adds nothing new or the page limit is
    /// reached. A failed first page resets the session and is retried once.
    pub fn search_cards(&mut self, query: &str) -> Result<Vec<LigaCard>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CompareError::InvalidArgument(
                "search query must not be empty".into(),
            ));
        }
        self.initialize()?;

        let first = self.search_url(query, 1)?;
        let html = match self.fetch_page(&first) {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "storefront fetch failed; reopening session");
                self.close();
                self.initialize()?;
                self.fetch_page(&first)?
            }
        };

        let mut cards = parse_listing_page(&html, &self.config.base_url);
        let mut seen: HashSet<(String, String)> = cards
            .iter()
            .map(|c| (c.name.clone(), c.numeric_code.clone()))
            .collect();
        debug!(page = 1, count = cards.len(), "storefront page parsed");

        for page in 2..=self.config.max_pages {
            if cards.is_empty() {
                break;
            }
            self.pause();

            let url = self.search_url(query, page)?;
            let html = match self.fetch_page(&url) {
                Ok(html) => html,
                Err(e) => {
                    warn!(page, error = %e, "storefront page failed; keeping results so far");
                    break;
                }
            };

            let before = cards.len();
            for card in parse_listing_page(&html, &self.config.base_url) {
                if seen.insert((card.name.clone(), card.numeric_code.clone())) {
                    cards.push(card);
                }
            }
            debug!(page, added = cards.len() - before, "storefront page parsed");
            if cards.len() == before {
                break;
            }
        }

        info!(query, count = cards.len(), "storefront search complete");
        Ok(cards)
    }

    fn fetch_page(&self, url: &Url) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CompareError::Scrape("scraper is not initialized".into()))?;
        debug!(%url, "fetching storefront page");
        let resp = client.get(url.clone()).send()?.error_for_status()?;
        Ok(resp.text()?)
    }

    fn pause(&self) {
        let jitter_ms = self.config.page_jitter.as_millis() as u64;
        let extra = if jitter_ms > 0 {
            rand::thread_rng().gen_range(0..=jitter_ms)
        } else {
            0
        };
        let delay = self.config.page_delay + Duration::from_millis(extra);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Release the browsing session. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("storefront session closed");
        }
    }
}

impl Drop for LigaScraper {
    fn drop(&mut self) {
        self.close();
    }
}
