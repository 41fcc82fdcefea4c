use std::sync::Arc;
use std::sync::atomic::AtomicU64;

/// Minimal counters for operational visibility.
#[derive(Clone, Default)]
pub struct Counters {
    pub reads_fresh: Arc<AtomicU64>,
    pub reads_refreshed: Arc<AtomicU64>,

    // upstream failure tallies
    pub holdings_fetch_failures: Arc<AtomicU64>,
    pub price_fetch_failures: Arc<AtomicU64>,
}
