use crate::{fallback, http_client, GasSource};
use async_trait::async_trait;
use chrono::Utc;
use common::{
    models::{Chain, GasFee, GasFees},
    Error, Result,
};
use serde::Deserialize;
use tracing::{debug, error};

const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/api";

/// Gas used by a typical ERC-20 `transfer`
const ERC20_TRANSFER_GAS: f64 = 65_000.0;
const DEFAULT_ETH_GAS_GWEI: f64 = 15.0;
/// Approximate ETH/USD used to price the ERC-20 row
const ETH_PRICE_USD: f64 = 2_500.0;

/// Per-chain transfer costs. Only Ethereum is priced live, from Etherscan's
/// gas oracle, and only when an API key is configured.
pub struct GasConnector {
    client: reqwest::Client,
    base_url: String,
    etherscan_api_key: Option<String>,
}

impl GasConnector {
    pub fn new(etherscan_api_key: Option<String>) -> Self {
        Self::with_base_url(ETHERSCAN_API_URL, etherscan_api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, etherscan_api_key: Option<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.into(),
            etherscan_api_key,
        }
    }

    /// Proposed gas price in gwei, or the default when Etherscan has no answer
    async fn eth_gas_gwei(&self, api_key: &str) -> Result<f64> {
        debug!("Fetching Ethereum gas oracle from Etherscan");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("module", "gastracker"),
                ("action", "gasoracle"),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(Error::HttpError)?;

        if !response.status().is_success() {
            error!("Etherscan API error: {}", response.status());
            return Ok(DEFAULT_ETH_GAS_GWEI);
        }

        let oracle: GasOracleResponse = response.json().await.map_err(|e| {
            Error::ParseError(format!("Failed to parse Etherscan gas oracle: {}", e))
        })?;

        Ok(oracle.propose_gas_price().unwrap_or(DEFAULT_ETH_GAS_GWEI))
    }
}

#[derive(Debug, Deserialize)]
pub struct GasOracleResponse {
    pub status: String,
    /// An object on success, an error string otherwise
    pub result: serde_json::Value,
}

impl GasOracleResponse {
    pub fn propose_gas_price(&self) -> Option<f64> {
        if self.status != "1" {
            return None;
        }
        self.result
            .get("ProposeGasPrice")
            .and_then(|v| v.as_str())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|gwei| *gwei > 0.0)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Reprice the Ethereum row of the table for a given gas price
pub fn apply_eth_gas_price(fees: Vec<GasFee>, gwei: f64) -> Vec<GasFee> {
    fees.into_iter()
        .map(|fee| {
            if fee.chain_id != Chain::Erc20 {
                return fee;
            }
            let cost_eth = ERC20_TRANSFER_GAS * gwei * 1e-9;
            let cost_usd = cost_eth * ETH_PRICE_USD;
            GasFee {
                gas_price: format!("~{} Gwei", gwei),
                transfer_cost_usd: round_to(cost_usd, 2),
                transfer_cost_native: round_to(cost_eth, 5),
                ..fee
            }
        })
        .collect()
}

#[async_trait]
impl GasSource for GasConnector {
    async fn get_gas_fees(&self) -> Result<GasFees> {
        let gwei = match &self.etherscan_api_key {
            Some(key) => self.eth_gas_gwei(key).await?,
            None => DEFAULT_ETH_GAS_GWEI,
        };

        Ok(GasFees {
            data: apply_eth_gas_price(fallback::gas_fees(), gwei),
            timestamp: Utc::now(),
        })
    }
}
