//! CacheFlow demo driver
//!
//! Runs an LRU eviction walk-through and a TTL expiration walk-through
//! against the library caches.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cacheflow::{
    spawn_sweep_task, Cache, Config, Shared, SharedTtlCache, SizedLruCache, TtlCache, Value,
};

/// Entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Run the LRU eviction demo
/// 4. Run the TTL expiration demo, with the sweep task if configured
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cacheflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: capacity={}, default_ttl={}s, sweep_interval={}s",
        config.capacity, config.default_ttl, config.sweep_interval
    );

    lru_demo(&config)?;
    ttl_demo(&config).await?;

    Ok(())
}

/// Walks through recency-ordered eviction with 8-byte values.
fn lru_demo(config: &Config) -> Result<()> {
    info!("=== LRU Eviction Demo ===");
    let mut lru: SizedLruCache<i64> = SizedLruCache::new(config.capacity);
    info!("each value occupies {} bytes", 10i64.size());

    fill(&mut lru);
    info!("cache state: {}", render(lru.list()));

    // Access "a" to make it recently used
    lru.get("a");

    lru.put("c", 30i64);
    info!("cache after inserting c: {}", render(lru.list()));

    lru.put("d", 40i64);
    info!("cache after inserting d: {}", render(lru.list()));

    info!("lru stats: {}", serde_json::to_string(&lru.stats())?);
    Ok(())
}

fn fill(cache: &mut dyn Cache<i64>) {
    cache.put("a", 10);
    cache.put("b", 20);
}

/// Walks through lazy expiry using real time.
async fn ttl_demo(config: &Config) -> Result<()> {
    info!("=== TTL Expiration Demo ===");
    let ttl = config.ttl();
    let cache: SharedTtlCache<i64> = Shared::new(TtlCache::new());
    let sweep = config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(cache.clone(), interval));

    cache.put("k1", 111i64, ttl);
    cache.put("k2", 222i64, ttl * 2);
    info!("initial cache: {}", render(cache.list()));

    info!("get k1: {:?}", cache.get("k1"));

    let wait = ttl + std::time::Duration::from_secs(1);
    info!("sleeping {}s to let TTL expire...", wait.as_secs());
    tokio::time::sleep(wait).await;

    info!("after TTL, get k1: {:?}", cache.get("k1"));
    info!("cache after TTL: {}", render(cache.list()));
    info!("ttl stats: {}", serde_json::to_string(&cache.stats())?);

    if let Some(handle) = sweep {
        handle.abort();
    }
    Ok(())
}

fn render(mut pairs: Vec<(String, i64)>) -> String {
    pairs.sort();
    let items: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("{{{}}}", items.join(", "))
}
