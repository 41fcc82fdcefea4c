use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{instrument, warn};

use crate::logger::warn_if_slow;
use crate::metrics::counters::Counters;
use crate::portfolio::sources::{HoldingsSource, PriceSource};
use crate::portfolio::types::TokenHolding;

/// Computes the aggregate USD value of the configured wallets.
#[async_trait]
pub trait Valuation: Send + Sync {
    async fn total_usd(&self) -> f64;
}

/// Values the configured wallet set against live holdings and prices.
///
/// This is the fail-soft boundary: any fetch failure collapses to a 0
/// contribution for the failing term, logged and counted, and a pass
/// always completes with a (possibly understated) total.
pub struct PortfolioValuer {
    holdings: Arc<dyn HoldingsSource>,
    prices: Arc<dyn PriceSource>,
    wallets: Vec<String>,
    counters: Counters,
}

impl PortfolioValuer {
    pub fn new(
        holdings: Arc<dyn HoldingsSource>,
        prices: Arc<dyn PriceSource>,
        wallets: Vec<String>,
        counters: Counters,
    ) -> Self {
        Self {
            holdings,
            prices,
            wallets,
            counters,
        }
    }

    /// USD value of one wallet. A failed holdings fetch values the whole
    /// wallet at 0 for this pass.
    #[instrument(skip(self), target = "valuer", fields(wallet = %wallet))]
    async fn wallet_value(&self, wallet: &str) -> f64 {
        let fetched = warn_if_slow(
            "holdings_fetch",
            Duration::from_millis(2_000),
            self.holdings.fetch_holdings(wallet),
        )
        .await;

        let holdings = match fetched {
            Ok(h) => h,
            Err(e) => {
                self.counters
                    .holdings_fetch_failures
                    .fetch_add(1, Ordering::Relaxed);
                warn!(error = ?e, "holdings fetch failed; wallet valued at 0");
                return 0.0;
            }
        };

        let values = join_all(holdings.iter().map(|h| self.holding_value(h))).await;
        values.into_iter().sum()
    }

    /// quantity × unit price for one holding. A failed price fetch values
    /// the holding at 0, indistinguishable in the total from a genuinely
    /// worthless token.
    async fn holding_value(&self, holding: &TokenHolding) -> f64 {
        let fetched = warn_if_slow(
            "price_fetch",
            Duration::from_millis(2_000),
            self.prices.fetch_price_usd(&holding.mint),
        )
        .await;

        match fetched {
            Ok(price) => holding.amount * price,
            Err(e) => {
                self.counters
                    .price_fetch_failures
                    .fetch_add(1, Ordering::Relaxed);
                warn!(error = ?e, mint = %holding.mint, "price fetch failed; holding valued at 0");
                0.0
            }
        }
    }
}

#[async_trait]
impl Valuation for PortfolioValuer {
    #[instrument(skip(self), target = "valuer", fields(wallets = self.wallets.len()))]
    async fn total_usd(&self) -> f64 {
        let per_wallet = join_all(self.wallets.iter().map(|w| self.wallet_value(w))).await;
        per_wallet.into_iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tracing_test::traced_test;

    struct StaticHoldings {
        by_wallet: HashMap<String, Vec<TokenHolding>>,
    }

    #[async_trait]
    impl HoldingsSource for StaticHoldings {
        async fn fetch_holdings(&self, wallet: &str) -> anyhow::Result<Vec<TokenHolding>> {
            match self.by_wallet.get(wallet) {
                Some(h) => Ok(h.clone()),
                None => anyhow::bail!("rpc unreachable"),
            }
        }
    }

    struct StaticPrices {
        by_mint: HashMap<String, f64>,
    }

    #[async_trait]
    impl PriceSource for StaticPrices {
        async fn fetch_price_usd(&self, mint: &str) -> anyhow::Result<f64> {
            match self.by_mint.get(mint) {
                Some(p) => Ok(*p),
                None => anyhow::bail!("no pairs for {mint}"),
            }
        }
    }

    fn holding(mint: &str, amount: f64) -> TokenHolding {
        TokenHolding {
            mint: mint.to_string(),
            amount,
        }
    }

    fn valuer(
        by_wallet: HashMap<String, Vec<TokenHolding>>,
        by_mint: HashMap<String, f64>,
        wallets: Vec<String>,
    ) -> PortfolioValuer {
        PortfolioValuer::new(
            Arc::new(StaticHoldings { by_wallet }),
            Arc::new(StaticPrices { by_mint }),
            wallets,
            Counters::default(),
        )
    }

    #[tokio::test]
    async fn empty_wallet_list_totals_zero() {
        let v = valuer(HashMap::new(), HashMap::new(), vec![]);
        assert_eq!(v.total_usd().await, 0.0);
    }

    #[tokio::test]
    #[traced_test]
    async fn failing_wallet_contributes_nothing() {
        let by_wallet = HashMap::from([(
            "good".to_string(),
            vec![holding("M1", 4.0)],
        )]);
        let by_mint = HashMap::from([("M1".to_string(), 2.0)]);

        let v = valuer(by_wallet, by_mint, vec!["good".into(), "down".into()]);

        assert_eq!(v.total_usd().await, 8.0);
        assert!(logs_contain("holdings fetch failed"));
    }

    #[tokio::test]
    #[traced_test]
    async fn failing_price_zeroes_only_that_term() {
        let by_wallet = HashMap::from([(
            "w".to_string(),
            vec![holding("M1", 10.0), holding("Munknown", 99.0)],
        )]);
        let by_mint = HashMap::from([("M1".to_string(), 2.5)]);

        let v = valuer(by_wallet, by_mint, vec!["w".into()]);

        assert_eq!(v.total_usd().await, 25.0);
        assert!(logs_contain("price fetch failed"));
    }

    #[tokio::test]
    async fn genuinely_zero_price_is_a_zero_term_without_failure() {
        let counters = Counters::default();
        let by_wallet = HashMap::from([(
            "w".to_string(),
            vec![holding("M1", 10.0), holding("Mworthless", 50.0)],
        )]);
        let by_mint =
            HashMap::from([("M1".to_string(), 2.5), ("Mworthless".to_string(), 0.0)]);

        let v = PortfolioValuer::new(
            Arc::new(StaticHoldings { by_wallet }),
            Arc::new(StaticPrices { by_mint }),
            vec!["w".into()],
            counters.clone(),
        );

        assert_eq!(v.total_usd().await, 25.0);
        assert_eq!(counters.price_fetch_failures.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn failure_counters_tally_per_term() {
        let counters = Counters::default();
        let by_wallet = HashMap::from([(
            "w".to_string(),
            vec![holding("Ma", 1.0), holding("Mb", 1.0)],
        )]);

        let v = PortfolioValuer::new(
            Arc::new(StaticHoldings { by_wallet }),
            Arc::new(StaticPrices {
                by_mint: HashMap::new(),
            }),
            vec!["w".into(), "down".into()],
            counters.clone(),
        );

        assert_eq!(v.total_usd().await, 0.0);
        assert_eq!(counters.holdings_fetch_failures.load(Ordering::Relaxed), 1);
        assert_eq!(counters.price_fetch_failures.load(Ordering::Relaxed), 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]
            #[test]
            fn total_is_sum_of_quantity_times_price(
                terms in prop::collection::vec((0.001..1_000_000.0f64, 0.0..10_000.0f64), 0..20)
            ) {
                let mut by_mint = HashMap::new();
                let mut holdings = Vec::new();
                let mut expected = 0.0f64;

                for (i, (amount, price)) in terms.iter().enumerate() {
                    let mint = format!("Mint{i}");
                    by_mint.insert(mint.clone(), *price);
                    holdings.push(TokenHolding { mint, amount: *amount });
                    expected += amount * price;
                }

                let by_wallet = HashMap::from([("w".to_string(), holdings)]);
                let v = valuer(by_wallet, by_mint, vec!["w".to_string()]);

                let rt = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .expect("runtime");
                let total = rt.block_on(v.total_usd());

                let tolerance = expected.abs().max(1.0) * 1e-12;
                prop_assert!((total - expected).abs() <= tolerance);
            }
        }
    }
}
