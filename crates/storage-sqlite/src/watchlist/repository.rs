use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use pricewatch_core::errors::{Error, Result};
use pricewatch_core::watchlist::{NewWatchlistItem, WatchlistItem, WatchlistRepositoryTrait};

use super::model::{NewWatchlistItemDB, WatchlistItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{is_unique_violation, StorageError};
use crate::schema::watchlist;
use crate::schema::watchlist::dsl::*;

pub struct WatchlistRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn duplicate(sym: &str) -> Error {
    Error::Conflict(format!("{} is already in your watchlist", sym))
}

fn to_domain(rows: Vec<WatchlistItemDB>) -> Result<Vec<WatchlistItem>> {
    rows.into_iter()
        .map(|row| WatchlistItem::try_from(row).map_err(Error::from))
        .collect()
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WatchlistRepository { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    fn list_items(&self) -> Result<Vec<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = watchlist
            .order(id.asc())
            .select(WatchlistItemDB::as_select())
            .load::<WatchlistItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    fn find_by_symbol(&self, sym: &str) -> Result<Option<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;
        let row = watchlist
            .filter(symbol.eq(sym))
            .select(WatchlistItemDB::as_select())
            .first::<WatchlistItemDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(WatchlistItem::try_from).transpose()?)
    }

    async fn insert_item(&self, new_item: NewWatchlistItem) -> Result<WatchlistItem> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WatchlistItem> {
                let new_row: NewWatchlistItemDB = new_item.into();

                let existing: i64 = watchlist
                    .filter(symbol.eq(&new_row.symbol))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if existing > 0 {
                    return Err(duplicate(&new_row.symbol));
                }

                let inserted = diesel::insert_into(watchlist::table)
                    .values(&new_row)
                    .returning(WatchlistItemDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            duplicate(&new_row.symbol)
                        } else {
                            StorageError::from(e).into()
                        }
                    })?;
                Ok(WatchlistItem::try_from(inserted)?)
            })
            .await
    }

    async fn delete_item(&self, item_id: i32) -> Result<Option<WatchlistItem>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<WatchlistItem>> {
                let deleted = diesel::delete(watchlist.find(item_id))
                    .returning(WatchlistItemDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                Ok(deleted.map(WatchlistItem::try_from).transpose()?)
            })
            .await
    }
}
