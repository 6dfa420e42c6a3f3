use crate::{fallback, http_client, FxRateSource};
use async_trait::async_trait;
use common::{models::ExchangeRates, Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

const OPEN_ER_API_URL: &str = "https://open.er-api.com/v6";

/// Currencies extracted from the full rate table
const TRACKED_CURRENCIES: [&str; 4] = ["KRW", "EUR", "GBP", "JPY"];

pub struct OpenExchangeRateConnector {
    client: reqwest::Client,
    base_url: String,
}

impl OpenExchangeRateConnector {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_ER_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.into(),
        }
    }
}

impl Default for OpenExchangeRateConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenErLatest {
    #[serde(default)]
    pub rates: Option<HashMap<String, f64>>,
}

/// Keep USD plus the tracked currencies; anything missing takes its fallback
pub fn extract_rates(latest: &OpenErLatest) -> ExchangeRates {
    let mut rates = BTreeMap::from([("USD".to_string(), 1.0)]);

    for code in TRACKED_CURRENCIES {
        let rate = latest
            .rates
            .as_ref()
            .and_then(|all| all.get(code))
            .copied()
            .unwrap_or_else(|| fallback::fallback_rate(code));
        rates.insert(code.to_string(), rate);
    }

    ExchangeRates {
        base: "USD".to_string(),
        rates,
    }
}

#[async_trait]
impl FxRateSource for OpenExchangeRateConnector {
    async fn get_exchange_rates(&self) -> Result<ExchangeRates> {
        let url = format!("{}/latest/USD", self.base_url);

        debug!("Fetching exchange rates: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Error::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Exchange rate API error: {} - {}", status, error_text);
            return Err(Error::ExchangeError(format!(
                "Exchange rate API error: {} - {}",
                status, error_text
            )));
        }

        let latest: OpenErLatest = response.json().await.map_err(|e| {
            Error::ParseError(format!("Failed to parse exchange rate response: {}", e))
        })?;

        Ok(extract_rates(&latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::FiatCurrency;

    #[test]
    fn test_extract_tracked_rates() {
        let latest: OpenErLatest = serde_json::from_str(
            r#"{
                "result": "success",
                "base_code": "USD",
                "rates": {"USD": 1, "KRW": 1387.2, "EUR": 0.9312, "GBP": 0.7903, "JPY": 149.8, "CHF": 0.88}
            }"#,
        )
        .unwrap();

        let rates = extract_rates(&latest);
        assert_eq!(rates.rate(FiatCurrency::Krw), 1387.2);
        assert_eq!(rates.rate(FiatCurrency::Eur), 0.9312);
        assert_eq!(rates.rate_for_code("JPY"), 149.8);
        // Untracked currencies are dropped
        assert!(!rates.rates.contains_key("CHF"));
        assert_eq!(rates.rates.len(), 5);
    }

    #[test]
    fn test_missing_rates_use_fallback() {
        let latest: OpenErLatest =
            serde_json::from_str(r#"{"result": "success", "rates": {"EUR": 0.95}}"#).unwrap();

        let rates = extract_rates(&latest);
        assert_eq!(rates.rate(FiatCurrency::Usd), 1.0);
        assert_eq!(rates.rate(FiatCurrency::Eur), 0.95);
        assert_eq!(rates.rate(FiatCurrency::Krw), 1350.0);
        assert_eq!(rates.rate(FiatCurrency::Gbp), 0.79);
    }

    #[test]
    fn test_no_rates_object() {
        let latest: OpenErLatest = serde_json::from_str(r#"{"result": "error"}"#).unwrap();
        assert_eq!(extract_rates(&latest), fallback::exchange_rates());
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_back() {
        let connector = OpenExchangeRateConnector::with_base_url("http://127.0.0.1:9");
        let rates = connector.exchange_rates_or_fallback().await;
        assert_eq!(rates, fallback::exchange_rates());
    }
}
