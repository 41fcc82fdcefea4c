use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::price::errors::PriceError;
use crate::price::types::TokenPairsResponse;
use crate::portfolio::sources::PriceSource;

#[derive(Clone)]
pub struct PriceClient {
    http: Client,
    url: String,
}

impl PriceClient {
    pub fn new(url: String) -> Result<Self, PriceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }

    /// Current USD unit price of a mint, taken from its first listed pair.
    ///
    /// A listed pair without a USD quote prices at 0; an unlisted token is
    /// an error so the caller can tell the two apart.
    #[instrument(
        skip(self),
        fields(mint = %mint),
        level = "debug"
    )]
    pub async fn fetch_price_usd(&self, mint: &str) -> Result<f64, PriceError> {
        let url = format!("{}/latest/dex/tokens/{}", self.url, mint);

        let resp = self.http.get(&url).send().await?.error_for_status()?;

        let envelope: TokenPairsResponse = resp.json().await?;

        let pairs = envelope.pairs.unwrap_or_default();
        let Some(first) = pairs.first() else {
            return Err(PriceError::NoPairs);
        };

        let price = match &first.price_usd {
            Some(raw) => raw.as_usd()?,
            None => 0.0,
        };

        debug!(price_usd = price, "token price fetched");

        Ok(price)
    }
}

#[async_trait::async_trait]
impl PriceSource for PriceClient {
    async fn fetch_price_usd(&self, mint: &str) -> anyhow::Result<f64> {
        Ok(PriceClient::fetch_price_usd(self, mint).await?)
    }
}
