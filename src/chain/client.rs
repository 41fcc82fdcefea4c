use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::chain::errors::ChainError;
use crate::chain::types::RpcResponse;
use crate::portfolio::sources::HoldingsSource;
use crate::portfolio::types::TokenHolding;

/// SPL token program whose accounts are enumerated per wallet.
const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

#[derive(Clone)]
pub struct RpcClient {
    http: Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: String) -> Result<Self, ChainError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }

    /// Enumerates the SPL token balances of one wallet.
    ///
    /// Only holdings with a positive `uiAmount` are returned. Accounts the
    /// node did not return in parsed form are skipped.
    #[instrument(
        skip(self),
        fields(wallet = %wallet),
        level = "debug"
    )]
    pub async fn fetch_token_holdings(
        &self,
        wallet: &str,
    ) -> Result<Vec<TokenHolding>, ChainError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getTokenAccountsByOwner",
            "params": [
                wallet,
                { "programId": TOKEN_PROGRAM_ID },
                { "encoding": "jsonParsed" },
            ],
        });

        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: RpcResponse = resp.json().await?;
        let holdings = collect_holdings(envelope)?;

        debug!(count = holdings.len(), "wallet holdings fetched");

        Ok(holdings)
    }
}

#[async_trait::async_trait]
impl HoldingsSource for RpcClient {
    async fn fetch_holdings(&self, wallet: &str) -> anyhow::Result<Vec<TokenHolding>> {
        Ok(self.fetch_token_holdings(wallet).await?)
    }
}

/// Flattens the RPC envelope into `(mint, amount)` pairs, dropping
/// zero and null balances.
fn collect_holdings(resp: RpcResponse) -> Result<Vec<TokenHolding>, ChainError> {
    let result = resp.result.ok_or(ChainError::MissingResult)?;

    let mut holdings = Vec::new();
    for account in result.value {
        let Some(info) = account.account.data.parsed.and_then(|p| p.info) else {
            continue;
        };

        let amount = info.token_amount.and_then(|t| t.ui_amount).unwrap_or(0.0);

        if let Some(mint) = info.mint {
            if amount > 0.0 {
                holdings.push(TokenHolding { mint, amount });
            }
        }
    }

    Ok(holdings)
}
