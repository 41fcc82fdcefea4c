use std::sync::Arc;

use solfolio::{
    chain::RpcClient,
    config::AppConfig,
    logger::init_tracing,
    metrics::counters::Counters,
    portfolio::{PortfolioValuer, ValueCache},
    price::PriceClient,
    server::{self, AppState},
    time::SystemClock,
};

/// Builds the valuation pipeline: upstream clients, the aggregator over
/// the configured wallets, and the TTL cache in front of it.
fn build_cache(cfg: &AppConfig, counters: Counters) -> anyhow::Result<Arc<ValueCache>> {
    let chain = Arc::new(RpcClient::new(cfg.rpc_url.clone())?);
    let prices = Arc::new(PriceClient::new(cfg.price_api_url.clone())?);

    let valuer = Arc::new(PortfolioValuer::new(
        chain,
        prices,
        cfg.wallets.clone(),
        counters.clone(),
    ));

    Ok(Arc::new(ValueCache::new(
        cfg.cache_ttl_ms,
        Arc::new(SystemClock),
        valuer,
        counters,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_tracing(is_production);

    tracing::info!("Starting solfolio backend...");

    let cfg = AppConfig::from_env();
    tracing::info!(
        wallets = cfg.wallets.len(),
        ttl_ms = cfg.cache_ttl_ms,
        "tracking configured wallets"
    );

    let cache = build_cache(&cfg, Counters::default())?;
    let state = AppState { cache };

    let bind_addr = cfg.bind_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_server(&bind_addr, state).await {
            tracing::error!(error = ?e, "server exited with error");
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    Ok(())
}
