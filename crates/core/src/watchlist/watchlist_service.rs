use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{info, warn};
use tokio::sync::Mutex;

use super::watchlist_model::{NewWatchlistItem, WatchlistEntry, WatchlistItem};
use super::watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
use crate::assets::AssetQueryServiceTrait;
use crate::errors::{Error, Result};

pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
    asset_service: Arc<dyn AssetQueryServiceTrait>,
    // Serializes check-then-insert so concurrent adds of one symbol yield a single row.
    add_lock: Mutex<()>,
}

impl WatchlistService {
    pub fn new(
        repository: Arc<dyn WatchlistRepositoryTrait>,
        asset_service: Arc<dyn AssetQueryServiceTrait>,
    ) -> Self {
        WatchlistService {
            repository,
            asset_service,
            add_lock: Mutex::new(()),
        }
    }

    async fn enrich(&self, item: WatchlistItem) -> WatchlistEntry {
        let asset_info = match self
            .asset_service
            .get_snapshot(item.asset_type, &item.symbol)
            .await
        {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("No snapshot for watchlist item {}: {}", item.symbol, e);
                None
            }
        };
        WatchlistEntry { item, asset_info }
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    async fn list(&self) -> Result<Vec<WatchlistEntry>> {
        let items = self.repository.list_items()?;
        Ok(join_all(items.into_iter().map(|item| self.enrich(item))).await)
    }

    async fn add(&self, new_item: NewWatchlistItem) -> Result<WatchlistEntry> {
        let new_item = new_item.normalized()?;

        // Existence is checked before duplicates, so an unknown symbol is always NotFound.
        let snapshot = self
            .asset_service
            .get_snapshot(new_item.asset_type, &new_item.symbol)
            .await?;

        let _guard = self.add_lock.lock().await;
        if self.repository.find_by_symbol(&new_item.symbol)?.is_some() {
            return Err(Error::Conflict(format!(
                "{} is already in your watchlist",
                new_item.symbol
            )));
        }

        let item = self.repository.insert_item(new_item).await?;
        info!("Added {} ({}) to watchlist", item.symbol, item.asset_type);
        Ok(WatchlistEntry {
            item,
            asset_info: Some(snapshot),
        })
    }

    async fn remove(&self, item_id: i32) -> Result<String> {
        match self.repository.delete_item(item_id).await? {
            Some(item) => {
                info!("Removed {} from watchlist", item.symbol);
                Ok(item.symbol)
            }
            None => Err(Error::NotFound("Watchlist item not found".to_string())),
        }
    }
}
