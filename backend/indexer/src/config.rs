//! Application configuration loaded from environment variables.

use std::str::FromStr;

use crate::errors::{IndexerError, Result};

const DEFAULT_RPC_URL: &str = "https://soroban-testnet.stellar.org";
const DEFAULT_DATABASE_URL: &str = "sqlite:./task_escrow_events.db";

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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing optional keys
    /// fall back to their defaults; present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contract_id = lookup("CONTRACT_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                IndexerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?;

        Ok(Config {
            rpc_url: lookup("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            contract_id,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            api_port: parse_or(&lookup, "API_PORT", 3001)?,
            poll_interval_secs: parse_or(&lookup, "POLL_INTERVAL_SECS", 5)?,
            events_per_page: parse_or(&lookup, "EVENTS_PER_PAGE", 100)?,
            start_ledger: parse_or(&lookup, "START_LEDGER", 0)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| IndexerError::Config(format!("Invalid {key}: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_contract_is_set() {
        let config = Config::from_lookup(lookup_from(&[("CONTRACT_ID", "CESCROW")])).unwrap();
        assert_eq!(config.contract_id, "CESCROW");
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.events_per_page, 100);
        assert_eq!(config.start_ledger, 0);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("CONTRACT_ID", "CESCROW"),
            ("API_PORT", "8080"),
            ("POLL_INTERVAL_SECS", " 30 "),
            ("START_LEDGER", "123456"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.start_ledger, 123_456);
    }

    #[test]
    fn missing_contract_id_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("CONTRACT_ID", "  ")])).unwrap_err();
        assert!(matches!(err, IndexerError::Config(_)));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("CONTRACT_ID", "CESCROW"),
            ("API_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }
}
