use crate::errors::Result;
use crate::watchlist::watchlist_model::{NewWatchlistItem, WatchlistEntry, WatchlistItem};
use async_trait::async_trait;

/// Trait for watchlist repository operations
#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    /// All items, ordered by id.
    fn list_items(&self) -> Result<Vec<WatchlistItem>>;
    fn find_by_symbol(&self, symbol: &str) -> Result<Option<WatchlistItem>>;
    /// Fails with `Conflict` when the symbol is already stored under any asset type.
    async fn insert_item(&self, new_item: NewWatchlistItem) -> Result<WatchlistItem>;
    /// Returns the deleted row, or `None` when the id is unknown.
    async fn delete_item(&self, item_id: i32) -> Result<Option<WatchlistItem>>;
}

/// Trait for watchlist service operations
#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<WatchlistEntry>>;
    async fn add(&self, new_item: NewWatchlistItem) -> Result<WatchlistEntry>;
    /// Returns the symbol that was removed.
    async fn remove(&self, item_id: i32) -> Result<String>;
}
