//! Watchlist module - persisted symbols joined with live snapshots.

mod watchlist_model;
mod watchlist_service;
mod watchlist_traits;


pub use watchlist_model::{NewWatchlistItem, WatchlistEntry, WatchlistItem};
pub use watchlist_service::WatchlistService;
pub use watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
