use std::sync::Arc;

use eyre::{WrapErr, ensure};
use sorted_concurrent_map::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// JSON-encoded [`MapConfig`] for the alphabet map, e.g.
/// `{"name":"alphabet","capacity":26}`.
const CONFIG_ENV: &str = "SORTED_MAP_CONFIG";

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

fn load_config() -> eyre::Result<MapConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(raw) => serde_json::from_str(&raw).wrap_err_with(|| format!("invalid {CONFIG_ENV}")),
        Err(_) => Ok(MapConfig::new("alphabet").with_capacity(26)),
    }
}

fn alphabet(config: MapConfig) -> eyre::Result<()> {
    let map = SortedConcurrentMap::with_config(config);

    for (i, c) in ('a'..='z').rev().enumerate() {
        map.insert(c.to_string(), 26 - i);
    }
    println!("{map}");

    map.insert("a".to_string(), 111);
    println!("{map}");

    ensure!(map.len() == 26, "expected 26 letters, got {}", map.len());
    tracing::info!(
        map = map.name(),
        heap = map.heap_size(),
        used = map.used_size(),
        "alphabet done"
    );
    Ok(())
}

async fn producer_consumer(num_items: u32) -> eyre::Result<()> {
    let map = Arc::new(SortedConcurrentMap::with_config(
        MapConfig::new("queue").with_capacity(num_items as usize),
    ));

    let producer = {
        let shared = map.clone();
        tokio::task::spawn_blocking(move || {
            for i in 0..num_items {
                shared.insert(i, i);
            }
        })
    };

    let consumer = {
        let shared = map.clone();
        tokio::task::spawn_blocking(move || {
            for i in 0..num_items {
                while !shared.contains_key(&i) {
                    std::thread::yield_now();
                }
                shared.erase(&i);
            }
        })
    };

    producer.await?;
    consumer.await?;

    ensure!(map.is_empty(), "{} entries left behind", map.len());
    tracing::info!(num_items, size = map.len(), "producer/consumer done");
    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_logging();

    alphabet(load_config()?)?;
    producer_consumer(100_000).await?;

    Ok(())
}
