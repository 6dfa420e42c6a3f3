use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Seconds between stablecoin price / FX rate refreshes
    pub market_refresh_secs: u64,
    /// Seconds between gas fee refreshes
    pub gas_refresh_secs: u64,
    pub etherscan_api_key: Option<String>,
    /// JSON file replacing the built-in exchange catalog
    pub exchange_catalog_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            market_refresh_secs: 30,
            gas_refresh_secs: 15,
            etherscan_api_key: None,
            exchange_catalog_path: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: env_parse("API_PORT").unwrap_or(defaults.port),
            market_refresh_secs: env_parse("MARKET_REFRESH_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.market_refresh_secs),
            gas_refresh_secs: env_parse("GAS_REFRESH_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.gas_refresh_secs),
            etherscan_api_key: env_non_empty("ETHERSCAN_API_KEY"),
            exchange_catalog_path: env_non_empty("EXCHANGE_CATALOG_PATH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.market_refresh_secs, 30);
        assert_eq!(config.gas_refresh_secs, 15);
        assert!(config.etherscan_api_key.is_none());
    }
}
