use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rpc response missing result")]
    MissingResult,
}
