pub mod coingecko;
pub mod exchange_rate;
pub mod fallback;
pub mod gas;

use async_trait::async_trait;
use common::{
    models::{ExchangeRates, GasFees, StablecoinPrices},
    Result,
};
use tracing::warn;

pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 10;

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

/// USD prices of the supported stablecoins
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn get_stablecoin_prices(&self) -> Result<StablecoinPrices>;

    /// Never fails: any error degrades to pegged prices
    async fn stablecoin_prices_or_fallback(&self) -> StablecoinPrices {
        match self.get_stablecoin_prices().await {
            Ok(prices) => prices,
            Err(e) => {
                warn!("Stablecoin price fetch failed, using fallback: {}", e);
                fallback::stablecoin_prices()
            }
        }
    }
}

/// Fiat exchange rates quoted against USD
#[async_trait]
pub trait FxRateSource: Send + Sync {
    async fn get_exchange_rates(&self) -> Result<ExchangeRates>;

    async fn exchange_rates_or_fallback(&self) -> ExchangeRates {
        match self.get_exchange_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                warn!("Exchange rate fetch failed, using fallback: {}", e);
                fallback::exchange_rates()
            }
        }
    }
}

/// Per-chain stablecoin transfer costs
#[async_trait]
pub trait GasSource: Send + Sync {
    async fn get_gas_fees(&self) -> Result<GasFees>;

    async fn gas_fees_or_fallback(&self) -> GasFees {
        match self.get_gas_fees().await {
            Ok(fees) => fees,
            Err(e) => {
                warn!("Gas fee fetch failed, using fallback: {}", e);
                GasFees {
                    data: fallback::gas_fees(),
                    timestamp: chrono::Utc::now(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Error;
    use common::models::{FiatCurrency, Stablecoin};

    struct FailingSource;

    #[async_trait]
    impl PriceSource for FailingSource {
        async fn get_stablecoin_prices(&self) -> Result<StablecoinPrices> {
            Err(Error::ExchangeError("CoinGecko API error: 429".to_string()))
        }
    }

    #[async_trait]
    impl FxRateSource for FailingSource {
        async fn get_exchange_rates(&self) -> Result<ExchangeRates> {
            Err(Error::ParseError("unexpected body".to_string()))
        }
    }

    #[async_trait]
    impl GasSource for FailingSource {
        async fn get_gas_fees(&self) -> Result<GasFees> {
            Err(Error::ExchangeError("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_prices_fall_back_to_peg() {
        let prices = FailingSource.stablecoin_prices_or_fallback().await;
        for coin in Stablecoin::ALL {
            assert_eq!(prices.usd_price(coin), 1.0);
        }
    }

    #[tokio::test]
    async fn test_rates_fall_back_to_table() {
        let rates = FailingSource.exchange_rates_or_fallback().await;
        assert_eq!(rates.base, "USD");
        assert_eq!(rates.rate(FiatCurrency::Usd), 1.0);
        assert_eq!(rates.rate(FiatCurrency::Krw), 1350.0);
        assert_eq!(rates.rate(FiatCurrency::Eur), 0.92);
        assert_eq!(rates.rate(FiatCurrency::Gbp), 0.79);
        assert_eq!(rates.rate_for_code("JPY"), 155.0);
    }

    #[tokio::test]
    async fn test_gas_falls_back_to_table() {
        let fees = FailingSource.gas_fees_or_fallback().await;
        assert_eq!(fees.data, fallback::gas_fees());
    }

    #[test]
    fn test_fallback_rate_lookup() {
        assert_eq!(fallback::fallback_rate("GBP"), 0.79);
        assert_eq!(fallback::fallback_rate("CHF"), 1.0);
    }
}
