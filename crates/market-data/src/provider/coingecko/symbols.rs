use std::collections::HashMap;

/// Tickers resolvable out of the box, paired with their CoinGecko coin ids.
const BUILTIN_SYMBOL_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("USDT", "tether"),
    ("BNB", "binancecoin"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("TRX", "tron"),
    ("LINK", "chainlink"),
    ("MATIC", "matic-network"),
    ("SHIB", "shiba-inu"),
    ("LTC", "litecoin"),
    ("ATOM", "cosmos"),
    ("UNI", "uniswap"),
    ("XLM", "stellar"),
    ("ALGO", "algorand"),
    ("NEAR", "near"),
];

/// The built-in ticker to coin id table.
pub fn default_symbol_ids() -> HashMap<String, String> {
    BUILTIN_SYMBOL_IDS
        .iter()
        .map(|(symbol, id)| (symbol.to_string(), id.to_string()))
        .collect()
}

/// Parses `SYM=id,SYM=id` overrides. Malformed pairs are skipped.
pub fn parse_symbol_ids(spec: &str) -> HashMap<String, String> {
    spec.split(',')
        .filter_map(|pair| {
            let (symbol, id) = pair.split_once('=')?;
            let (symbol, id) = (symbol.trim(), id.trim());
            if symbol.is_empty() || id.is_empty() {
                return None;
            }
            Some((symbol.to_uppercase(), id.to_string()))
        })
        .collect()
}
