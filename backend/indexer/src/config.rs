//! Application configuration loaded from environment variables.

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// The escrow contract address (Strkey format)
    pub contract_id: String,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            rpc_url: env_var("RPC_URL")
                .unwrap_or_else(|_| "https://soroban-testnet.stellar.org".to_string()),
            contract_id: env_var("CONTRACT_ID").map_err(|_| {
                IndexerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./escrow_events.db".to_string()),
            api_port: parse_or("API_PORT", 3001)?,
            poll_interval_secs: parse_or("POLL_INTERVAL_SECS", 5)?,
            events_per_page: parse_or("EVENTS_PER_PAGE", 100)?,
            start_ledger: parse_or("START_LEDGER", 0)?,
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| IndexerError::Config(format!("Missing env var: {key}")))
}

/// Parse `key` if set, otherwise fall back to `default`.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env_var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| IndexerError::Config(format!("Invalid {key}: {raw:?}")))
}
