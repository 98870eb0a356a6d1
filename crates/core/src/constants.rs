use std::time::Duration;

/// Lifetime of a cache entry when the caller does not pass one
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Lifetime of a cached asset snapshot
pub const SNAPSHOT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Lifetime of a cached price history
pub const HISTORY_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Day count used when a crypto history request does not specify one
pub const DEFAULT_CRYPTO_DAYS: u16 = 30;
