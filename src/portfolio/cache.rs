use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::metrics::counters::Counters;
use crate::portfolio::types::{PortfolioSnapshot, ValueReading};
use crate::portfolio::valuer::Valuation;
use crate::time::Clock;

/// TTL cache over the portfolio total.
///
/// Guarantees:
/// - At most one valuation pass is in flight process-wide; readers that
///   arrive during a refresh block and then observe its result.
/// - Value and capture time are always written together.
/// - A read never fails; a refresh stores whatever total the valuer
///   produced.
pub struct ValueCache {
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
    valuer: Arc<dyn Valuation>,
    counters: Counters,

    /// Guards the staleness check and the recompute-and-store behind it.
    /// Held across the valuer await: one valuation pass per stale window,
    /// no matter how many readers arrive.
    snapshot: Mutex<PortfolioSnapshot>,
}

impl ValueCache {
    pub fn new(
        ttl_ms: u64,
        clock: Arc<dyn Clock>,
        valuer: Arc<dyn Valuation>,
        counters: Counters,
    ) -> Self {
        Self {
            ttl_ms,
            clock,
            valuer,
            counters,
            snapshot: Mutex::new(PortfolioSnapshot::default()),
        }
    }

    /// Returns the cached total, refreshing it first when stale.
    ///
    /// A fresh read mirrors the cached value into `previous_value`; only a
    /// refreshing read reports the genuinely previous total.
    pub async fn read(&self) -> ValueReading {
        let mut snap = self.snapshot.lock().await;
        let now = self.clock.now_ms();

        if let Some(captured) = snap.captured_at_ms {
            let age_ms = now.saturating_sub(captured);
            if age_ms <= self.ttl_ms {
                self.counters.reads_fresh.fetch_add(1, Ordering::Relaxed);
                debug!(age_ms, "serving cached portfolio value");

                return ValueReading {
                    value: snap.total_usd,
                    previous_value: snap.total_usd,
                    at_ms: now,
                };
            }
        }

        let previous = snap.total_usd;
        let total = self.valuer.total_usd().await;
        let captured = self.clock.now_ms();

        snap.total_usd = total;
        snap.captured_at_ms = Some(captured);

        self.counters.reads_refreshed.fetch_add(1, Ordering::Relaxed);
        info!(
            total_usd = total,
            previous_usd = previous,
            "portfolio value refreshed"
        );

        ValueReading {
            value: total,
            previous_value: previous,
            at_ms: captured,
        }
    }
}
