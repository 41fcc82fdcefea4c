#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,

    // =========================
    // Upstream endpoints
    // =========================
    /// Solana JSON-RPC endpoint used to enumerate token accounts.
    pub rpc_url: String,

    /// DexScreener base URL used for per-mint USD quotes.
    pub price_api_url: String,

    // =========================
    // Portfolio configuration
    // =========================
    /// Wallet addresses whose holdings are summed into one total.
    ///
    /// Fixed for the process lifetime. Every wallet is revalued on every
    /// cache refresh; there is no per-wallet state between passes.
    pub wallets: Vec<String>,

    /// Maximum age (in milliseconds) of the cached portfolio total.
    ///
    /// A read that finds the snapshot older than this triggers a full
    /// revaluation pass. Together with the cache's exclusive lock this
    /// bounds upstream traffic to at most one pass per TTL window:
    /// - too low => more RPC / price-API calls
    /// - too high => staler numbers on the dashboard
    pub cache_ttl_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let rpc_url = std::env::var("SOLANA_RPC_URL")
            .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string());

        let price_api_url = std::env::var("PRICE_API_URL")
            .unwrap_or_else(|_| "https://api.dexscreener.com".to_string());

        // Comma-separated override; defaults to the tracked wallets.
        let wallets = std::env::var("WALLETS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "2AiLzs7bhm2kJkx4hw62kNykTcqHuWhFWwbumLMaHJPv".to_string(),
                    "GvhEuFmQYnxtXnyT1dwkLabgWhMGbgimJXvGdHSuMdNU".to_string(),
                ]
            });

        let cache_ttl_ms = std::env::var("CACHE_TTL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5_000);

        Self {
            bind_addr,
            rpc_url,
            price_api_url,
            wallets,
            cache_ttl_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_two_wallets_with_five_second_ttl() {
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.wallets.len(), 2);
        assert_eq!(cfg.cache_ttl_ms, 5_000);
    }
}
