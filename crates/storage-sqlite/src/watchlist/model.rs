//! Database models for the watchlist.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use pricewatch_core::watchlist::{NewWatchlistItem, WatchlistItem};
use pricewatch_market_data::AssetType;

use crate::errors::StorageError;

/// Database model for a watchlist row
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatchlistItemDB {
    pub id: i32,
    pub asset_type: String,
    pub symbol: String,
    pub added_at: NaiveDateTime,
}

/// Database model for inserting a watchlist row; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist)]
pub struct NewWatchlistItemDB {
    pub asset_type: String,
    pub symbol: String,
    pub added_at: NaiveDateTime,
}

impl TryFrom<WatchlistItemDB> for WatchlistItem {
    type Error = StorageError;

    fn try_from(db: WatchlistItemDB) -> Result<Self, Self::Error> {
        let asset_type = db
            .asset_type
            .parse::<AssetType>()
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;
        Ok(Self {
            id: db.id,
            asset_type,
            symbol: db.symbol,
            added_at: Utc.from_utc_datetime(&db.added_at),
        })
    }
}

impl From<NewWatchlistItem> for NewWatchlistItemDB {
    fn from(domain: NewWatchlistItem) -> Self {
        Self {
            asset_type: domain.asset_type.as_str().to_string(),
            symbol: domain.symbol,
            added_at: Utc::now().naive_utc(),
        }
    }
}
