use std::{collections::HashMap, net::SocketAddr, time::Duration};

use anyhow::Context;
use pricewatch_market_data::provider::coingecko::{parse_symbol_ids, DEFAULT_BASE_URL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub provider_timeout: Duration,
    pub coingecko_base_url: String,
    /// Extra or overriding ticker to CoinGecko id entries.
    pub crypto_symbols: HashMap<String, String>,
}

fn env_millis(key: &str, default: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PW_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .context("Invalid PW_LISTEN_ADDR")?;
        let db_path =
            std::env::var("PW_DB_PATH").unwrap_or_else(|_| "./db/pricewatch.db".into());
        let cors_allow = std::env::var("PW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let coingecko_base_url =
            std::env::var("PW_COINGECKO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let crypto_symbols = std::env::var("PW_CRYPTO_SYMBOLS")
            .map(|spec| parse_symbol_ids(&spec))
            .unwrap_or_default();
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: env_millis("PW_REQUEST_TIMEOUT_MS", 30_000),
            provider_timeout: env_millis("PW_PROVIDER_TIMEOUT_MS", 10_000),
            coingecko_base_url,
            crypto_symbols,
        })
    }
}
