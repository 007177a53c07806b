//! kvtrace demo
//!
//! Stores a few values, reads them back, replays the store history and
//! fetches a page twice through the page cache.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kvtrace::{
    spawn_cleanup_task, Cache, Config, HttpFetcher, MemoryStore, RedisStore, SharedStore,
    UrlCache,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvtrace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: redis_url={:?}, url_cache_ttl={}s, cleanup_interval={}s",
        config.redis_url, config.url_cache_ttl, config.cleanup_interval
    );

    let (store, cleanup_handle) = match &config.redis_url {
        Some(url) => {
            let redis = RedisStore::connect(url)
                .await
                .with_context(|| format!("connecting to {}", url))?;
            let store: SharedStore = Arc::new(redis);
            (store, None)
        }
        None => {
            let memory = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
            info!("Using in-process store");
            let store: SharedStore = memory;
            (store, Some(handle))
        }
    };

    let cache = Cache::new(store.clone());
    if config.flush_on_start {
        cache.reset().await.context("clearing the keyspace")?;
    }

    // Typed round trips
    let text = cache.store("foo").await?;
    let bytes = cache.store(b"bar").await?;
    let int = cache.store(123).await?;
    let float = cache.store(1.5).await?;

    println!("{} -> {:?}", text, cache.get_str(text.as_str()).await?);
    println!("{} -> {:?}", bytes, cache.get(bytes.as_str()).await?);
    println!("{} -> {:?}", int, cache.get_int(int.as_str()).await?);
    println!("{} -> {:?}", float, cache.get_float(float.as_str()).await?);
    println!("store was called {} times", cache.store_count().await?);

    cache.replay_store().await?.print();

    // Page cache: the second call is served from the store
    if let Some(url) = std::env::args().nth(1) {
        let pages = UrlCache::with_ttl(store, HttpFetcher::new(), config.url_cache_ttl);
        for _ in 0..2 {
            let body = pages
                .get_page(&url)
                .await
                .with_context(|| format!("fetching {}", url))?;
            println!("{}: {} bytes", url, body.len());
        }
        println!("{} accessed {} times", url, pages.access_count(&url).await?);
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    Ok(())
}
