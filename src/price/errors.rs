use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token has no listed pairs")]
    NoPairs,

    #[error("numeric parse error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}
