use crate::models::{Chain, FiatCurrency, Stablecoin};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// USD prices keyed by CoinGecko id, e.g. `{"tether": {"usd": 1.0}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct StablecoinPrices(pub BTreeMap<String, BTreeMap<String, f64>>);

impl StablecoinPrices {
    /// USD price of a stablecoin, 1.0 when the feed has no entry for it
    pub fn usd_price(&self, stablecoin: Stablecoin) -> f64 {
        self.0
            .get(stablecoin.coingecko_id())
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .unwrap_or(1.0)
    }
}

/// Units of each currency per one unit of `base`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRates {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
}

impl ExchangeRates {
    pub fn rate(&self, currency: FiatCurrency) -> f64 {
        self.rate_for_code(currency.code())
    }

    /// Rate for an arbitrary code, 1.0 when unknown
    pub fn rate_for_code(&self, code: &str) -> f64 {
        self.rates.get(code).copied().unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GasSpeed {
    #[serde(rename = "Very Fast")]
    VeryFast,
    #[serde(rename = "Fast")]
    Fast,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Slow")]
    Slow,
}

impl GasSpeed {
    /// Lower is faster
    pub fn rank(&self) -> u8 {
        match self {
            GasSpeed::VeryFast => 1,
            GasSpeed::Fast => 2,
            GasSpeed::Medium => 3,
            GasSpeed::Slow => 4,
        }
    }
}

/// Estimated cost of one stablecoin transfer on a chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasFee {
    pub chain: String,
    pub chain_id: Chain,
    pub native_token: String,
    pub gas_price: String,
    pub transfer_cost_usd: f64,
    pub transfer_cost_native: f64,
    pub speed: GasSpeed,
    pub avg_confirm_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GasFees {
    pub data: Vec<GasFee>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_price_defaults_to_peg() {
        let json = r#"{"tether": {"usd": 0.9991}}"#;
        let prices: StablecoinPrices = serde_json::from_str(json).unwrap();

        assert_eq!(prices.usd_price(Stablecoin::Usdt), 0.9991);
        assert_eq!(prices.usd_price(Stablecoin::Dai), 1.0);
    }

    #[test]
    fn test_rate_defaults_to_one() {
        let rates = ExchangeRates {
            base: "USD".to_string(),
            rates: BTreeMap::from([("KRW".to_string(), 1380.5)]),
        };

        assert_eq!(rates.rate(FiatCurrency::Krw), 1380.5);
        assert_eq!(rates.rate(FiatCurrency::Eur), 1.0);
        assert_eq!(rates.rate_for_code("CHF"), 1.0);
    }

    #[test]
    fn test_speed_rank_order() {
        assert!(GasSpeed::VeryFast.rank() < GasSpeed::Fast.rank());
        assert!(GasSpeed::Medium.rank() < GasSpeed::Slow.rank());
    }
}
