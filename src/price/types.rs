use serde::Deserialize;

/// Envelope returned by the DexScreener token lookup.
#[derive(Debug, Deserialize)]
pub struct TokenPairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<PairQuote>>,
}

#[derive(Debug, Deserialize)]
pub struct PairQuote {
    #[serde(rename = "priceUsd", default)]
    pub price_usd: Option<RawPrice>,
}

/// `priceUsd` arrives as a string on most pairs but as a bare number on
/// some; both forms are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    pub fn as_usd(&self) -> Result<f64, std::num::ParseFloatError> {
        match self {
            RawPrice::Number(v) => Ok(*v),
            RawPrice::Text(s) => s.parse(),
        }
    }
}
