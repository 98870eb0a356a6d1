//! Pricewatch Core - caching, asset queries and the watchlist domain.
//!
//! This crate holds the business logic of the dashboard. It is
//! database-agnostic: persistence is described by the traits in
//! [`watchlist`] and implemented by the `storage-sqlite` crate, while
//! market data comes from the providers in `pricewatch-market-data`.

pub mod assets;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod watchlist;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
