//! TTL-aware local cache for price-data API payloads.
//!
//! tcgcsv publishes every group's products and prices as static JSON that
//! changes at most daily. Payloads are stored gzip-compressed under the cache
//! directory and reused until they age past the TTL. When a download fails a
//! stale copy is preferred over an error.

use crate::config;
use crate::error::{CompareError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::fs;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Downloads and caches JSON payloads from the price-data API.
pub struct CacheManager {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never touch the network (use cached files only).
    pub offline: bool,
    timeout: Duration,
    ttl: Duration,
    client: Option<Client>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        offline: bool,
        timeout: Duration,
        ttl: Duration,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            timeout,
            ttl,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .user_agent(config::API_USER_AGENT)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?,
        };
        Ok(self.client.insert(client))
    }

    /// Path of the cache entry for `key` (e.g. `"68/groups"`).
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{key}.json.gz"))
    }

    fn is_fresh(&self, path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.elapsed().ok())
            .is_some_and(|age| age < self.ttl)
    }

    /// Fetch a JSON payload through the cache.
    ///
    /// A fresh entry is returned without network access. Offline mode accepts
    /// any cached entry regardless of age.
    pub fn fetch_json(&mut self, key: &str, url: &str) -> Result<serde_json::Value> {
        let path = self.entry_path(key);

        if path.exists() && (self.offline || self.is_fresh(&path)) {
            match self.load_json(key) {
                Ok(value) => return Ok(value),
                Err(e) if self.offline => return Err(e),
                Err(_) => {}
            }
        }

        if self.offline {
            return Err(CompareError::NotFound(format!(
                "{key} not cached and offline mode is enabled"
            )));
        }

        match self.get_json(url, &HeaderMap::new()) {
            Ok(value) => {
                if let Err(e) = self.store_json(key, &value) {
                    warn!(key, error = %e, "failed to write cache entry");
                }
                Ok(value)
            }
            Err(e) if path.exists() => {
                warn!(key, error = %e, "download failed; using stale cache entry");
                self.load_json(key)
            }
            Err(e) => Err(e),
        }
    }

    /// GET a JSON document without caching it.
    pub fn get_json(&mut self, url: &str, headers: &HeaderMap) -> Result<serde_json::Value> {
        if self.offline {
            return Err(CompareError::Offline(format!("refusing to fetch {url}")));
        }
        debug!(url, "fetching");
        let client = self.client()?.clone();
        let resp = client
            .get(url)
            .headers(headers.clone())
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    /// GET a JSON document with a custom user agent.
    pub fn get_json_as(&mut self, url: &str, user_agent: &str) -> Result<serde_json::Value> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(user_agent)
            .map_err(|e| CompareError::InvalidArgument(format!("bad user agent: {e}")))?;
        headers.insert(USER_AGENT, value);
        self.get_json(url, &headers)
    }

    /// Write a payload to the cache, replacing any previous entry atomically.
    pub fn store_json(&self, key: &str, value: &serde_json::Value) -> Result<PathBuf> {
        let path = self.entry_path(key);
        let parent = path.parent().unwrap_or(&self.cache_dir);
        fs::create_dir_all(parent)?;

        let tmp = tempfile::NamedTempFile::new_in(parent)?;
        let mut encoder = GzEncoder::new(tmp, Compression::default());
        serde_json::to_writer(&mut encoder, value)?;
        let mut tmp = encoder.finish()?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }

    /// Load and parse a cached payload.
    ///
    /// If the cached file is corrupt (truncated write, disk error),
    /// it is deleted automatically so the next fetch downloads a fresh copy.
    pub fn load_json(&self, key: &str) -> Result<serde_json::Value> {
        let path = self.entry_path(key);
        let file = fs::File::open(&path)?;
        let decoder = GzDecoder::new(BufReader::new(file));

        match serde_json::from_reader(BufReader::new(decoder)) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache file; removing");
                let _ = fs::remove_file(&path);
                Err(CompareError::NotFound(format!(
                    "Cache entry '{key}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {e}"
                )))
            }
        }
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
