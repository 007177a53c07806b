//! Web Module
//!
//! Page fetching with a per-URL access counter and a TTL-bounded body cache.
//!
//! # Keys
//! - `count:<url>` - number of `get_page` calls for the URL
//! - `cached:<url>` - last fetched body, expires after the configured TTL

mod fetch;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{to_int, to_text};
use crate::error::Result;
use crate::store::SharedStore;

pub use fetch::HttpFetcher;

/// Default lifetime of a cached page body, in seconds.
pub const DEFAULT_PAGE_TTL: u64 = 10;

// == Fetcher ==
/// Retrieves the body of a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

fn cached_key(url: &str) -> String {
    format!("cached:{}", url)
}

// == Url Cache ==
/// Counts every page request and serves repeat requests from the store until
/// the cached body expires.
pub struct UrlCache<F> {
    store: SharedStore,
    fetcher: F,
    ttl_secs: u64,
}

impl<F: Fetcher> UrlCache<F> {
    // == Constructor ==
    /// Creates a page cache with the default TTL.
    pub fn new(store: SharedStore, fetcher: F) -> Self {
        Self::with_ttl(store, fetcher, DEFAULT_PAGE_TTL)
    }

    /// Creates a page cache whose bodies live `ttl_secs` seconds (at least one).
    pub fn with_ttl(store: SharedStore, fetcher: F, ttl_secs: u64) -> Self {
        Self {
            store,
            fetcher,
            ttl_secs: ttl_secs.max(1),
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    // == Get Page ==
    /// Returns the body of `url`, counting the access first.
    ///
    /// Fetch errors are returned as-is; nothing is cached for them.
    ///
    /// A cached empty body is a hit and is served without refetching.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        self.count_access(url).await?;
        self.cached_fetch(url).await
    }

    // == Access Count ==
    /// Number of `get_page` calls for `url`, hits and misses alike.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.store.get(&count_key(url)).await? {
            Some(raw) => to_int(raw),
            None => Ok(0),
        }
    }

    async fn count_access(&self, url: &str) -> Result<()> {
        let count = self.store.incr(&count_key(url)).await?;
        debug!(url, count, "page access counted");
        Ok(())
    }

    async fn cached_fetch(&self, url: &str) -> Result<String> {
        let key = cached_key(url);

        if let Some(raw) = self.store.get(&key).await? {
            debug!(url, "page cache hit");
            return to_text(raw);
        }

        debug!(url, "page cache miss, fetching");
        let body = self.fetcher.fetch(url).await?;
        self.store
            .setex(&key, self.ttl_secs, body.as_bytes())
            .await?;
        Ok(body)
    }
}
