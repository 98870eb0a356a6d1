//! SQLite storage implementation for Pricewatch.
//!
//! This crate is the only place where Diesel is used. It implements the
//! repository traits defined in `pricewatch-core` and owns:
//! - connection pooling and pragmas
//! - embedded Diesel migrations
//! - the single-writer actor that serializes every write
//! - database row types and their conversion to domain models
//!
//! ```text
//!   core (domain traits)
//!          │
//!          ▼
//!   storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod watchlist;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use errors::StorageError;
pub use watchlist::WatchlistRepository;

// Re-export from pricewatch-core for convenience
pub use pricewatch_core::errors::{DatabaseError, Error, Result};
