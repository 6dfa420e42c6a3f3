use crate::{http_client, PriceSource};
use async_trait::async_trait;
use common::{
    models::{Stablecoin, StablecoinPrices},
    Error, Result,
};
use tracing::{debug, error};

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

pub struct CoinGeckoConnector {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoConnector {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.into(),
        }
    }

    fn coin_ids() -> String {
        Stablecoin::ALL
            .iter()
            .map(|coin| coin.coingecko_id())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for CoinGeckoConnector {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `/simple/price` body, e.g. `{"tether":{"usd":1.0003}}`
pub fn parse_simple_price(body: &str) -> Result<StablecoinPrices> {
    serde_json::from_str(body)
        .map_err(|e| Error::ParseError(format!("Failed to parse CoinGecko response: {}", e)))
}

#[async_trait]
impl PriceSource for CoinGeckoConnector {
    async fn get_stablecoin_prices(&self) -> Result<StablecoinPrices> {
        let url = format!("{}/simple/price", self.base_url);
        let ids = Self::coin_ids();

        debug!("Fetching stablecoin prices from CoinGecko: {} ({})", url, ids);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(Error::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("CoinGecko API error: {} - {}", status, error_text);
            return Err(Error::ExchangeError(format!(
                "CoinGecko API error: {} - {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(Error::HttpError)?;
        parse_simple_price(&body)
    }
}
