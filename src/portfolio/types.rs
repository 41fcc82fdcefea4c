/// One wallet's balance of a single mint.
///
/// Produced fresh on every fetch; never persisted. The holdings fetcher
/// guarantees `amount > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHolding {
    pub mint: String,
    pub amount: f64,
}

/// Last computed portfolio total.
///
/// `captured_at_ms: None` means no valuation pass has completed yet, so
/// the first read always refreshes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioSnapshot {
    pub total_usd: f64,
    pub captured_at_ms: Option<u64>,
}

/// What one cache read hands to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueReading {
    pub value: f64,
    pub previous_value: f64,
    pub at_ms: u64,
}
