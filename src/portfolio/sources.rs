use async_trait::async_trait;

use crate::portfolio::types::TokenHolding;

/// Enumerates the fungible token balances of one wallet.
#[async_trait]
pub trait HoldingsSource: Send + Sync {
    async fn fetch_holdings(&self, wallet: &str) -> anyhow::Result<Vec<TokenHolding>>;
}

/// Quotes the current USD unit price of one mint.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price_usd(&self, mint: &str) -> anyhow::Result<f64>;
}
