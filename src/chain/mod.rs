pub mod client;
pub mod errors;
pub mod types;

pub use client::RpcClient;
pub use errors::ChainError;
