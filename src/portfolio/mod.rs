pub mod cache;
pub mod sources;
pub mod types;
pub mod valuer;

pub use cache::ValueCache;
pub use valuer::{PortfolioValuer, Valuation};
