use chrono::{DateTime, Utc};
use common::{
    models::{
        ComparisonRequest, ComparisonResult, ExchangeId, ExchangeInfo, ExchangeRates,
        FiatCurrency, GasFees, StablecoinPrices,
    },
    Error, Result,
};
use connectors::{fallback, FxRateSource, GasSource, PriceSource};
use engine::{
    gas::{rank_gas_fees, GasComparison, GasSortKey},
    remittance::{compare_remittance, CryptoRoute, RemittanceComparison},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Latest market inputs the engine is evaluated against
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub prices: StablecoinPrices,
    pub rates: ExchangeRates,
    pub gas: GasFees,
    /// None until the first refresh completes
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self {
            prices: fallback::stablecoin_prices(),
            rates: fallback::exchange_rates(),
            gas: GasFees {
                data: fallback::gas_fees(),
                timestamp: Utc::now(),
            },
            updated_at: None,
        }
    }
}

/// Service for pricing ramp requests against the latest market data
pub struct ComparisonService {
    /// Exchange catalog, fixed at startup
    exchanges: Vec<ExchangeInfo>,
    prices: Arc<dyn PriceSource>,
    rates: Arc<dyn FxRateSource>,
    gas: Arc<dyn GasSource>,
    crypto_route: CryptoRoute,
    snapshot: RwLock<MarketSnapshot>,
}

impl ComparisonService {
    pub fn new(
        exchanges: Vec<ExchangeInfo>,
        prices: Arc<dyn PriceSource>,
        rates: Arc<dyn FxRateSource>,
        gas: Arc<dyn GasSource>,
    ) -> Self {
        Self {
            exchanges,
            prices,
            rates,
            gas,
            crypto_route: CryptoRoute::default(),
            snapshot: RwLock::new(MarketSnapshot::default()),
        }
    }

    /// List all exchanges in catalog order
    pub fn list_exchanges(&self) -> &[ExchangeInfo] {
        &self.exchanges
    }

    pub fn get_exchange(&self, id: ExchangeId) -> Result<ExchangeInfo> {
        self.exchanges
            .iter()
            .find(|exchange| exchange.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Exchange '{}' not found", id)))
    }

    pub async fn snapshot(&self) -> MarketSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Fetch stablecoin prices and FX rates. Failures degrade to fallback values.
    pub async fn refresh_market_data(&self) {
        let (prices, rates) = tokio::join!(
            self.prices.stablecoin_prices_or_fallback(),
            self.rates.exchange_rates_or_fallback()
        );

        let mut snapshot = self.snapshot.write().await;
        snapshot.prices = prices;
        snapshot.rates = rates;
        snapshot.updated_at = Some(Utc::now());

        debug!("Market data refreshed: {} rates", snapshot.rates.rates.len());
    }

    pub async fn refresh_gas(&self) {
        let gas = self.gas.gas_fees_or_fallback().await;
        debug!("Gas fees refreshed for {} chains", gas.data.len());
        self.snapshot.write().await.gas = gas;
    }

    /// Rank every exchange for a request using the current snapshot
    pub async fn compare(&self, request: ComparisonRequest) -> Result<ComparisonResult> {
        if !(request.amount.is_finite() && request.amount > 0.0) {
            return Err(Error::InvalidRequest(format!(
                "Amount must be greater than zero, got {}",
                request.amount
            )));
        }

        let snapshot = self.snapshot.read().await;
        let result = engine::compare(&self.exchanges, &request, &snapshot.prices, &snapshot.rates);

        info!(
            "Compared {} {} -> {} on {}: {} quotes, best {:?}",
            request.amount,
            request.fiat_currency,
            request.stablecoin,
            request.chain,
            result.quotes.len(),
            result.best_quote_id
        );

        Ok(result)
    }

    pub async fn gas_comparison(&self, sort_by: GasSortKey) -> GasComparison {
        let snapshot = self.snapshot.read().await;
        rank_gas_fees(&snapshot.gas.data, sort_by)
    }

    pub async fn remittance(
        &self,
        amount: f64,
        from: FiatCurrency,
        to: FiatCurrency,
    ) -> Result<RemittanceComparison> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(Error::InvalidRequest(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }
        if from == to {
            return Err(Error::InvalidRequest(format!(
                "Sending and receiving currency are both {}",
                from
            )));
        }

        let snapshot = self.snapshot.read().await;
        Ok(compare_remittance(
            amount,
            from,
            to,
            &snapshot.rates,
            &self.crypto_route,
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::catalog;
    use common::models::{Chain, RampMode, Stablecoin};
    use std::collections::BTreeMap;

    /// Market data source returning fixed values
    pub(crate) struct FixedMarket {
        pub krw_rate: f64,
    }

    #[async_trait]
    impl PriceSource for FixedMarket {
        async fn get_stablecoin_prices(&self) -> Result<StablecoinPrices> {
            Ok(StablecoinPrices(BTreeMap::from([(
                "tether".to_string(),
                BTreeMap::from([("usd".to_string(), 1.0)]),
            )])))
        }
    }

    #[async_trait]
    impl FxRateSource for FixedMarket {
        async fn get_exchange_rates(&self) -> Result<ExchangeRates> {
            Ok(ExchangeRates {
                base: "USD".to_string(),
                rates: BTreeMap::from([
                    ("USD".to_string(), 1.0),
                    ("KRW".to_string(), self.krw_rate),
                ]),
            })
        }
    }

    #[async_trait]
    impl GasSource for FixedMarket {
        async fn get_gas_fees(&self) -> Result<GasFees> {
            Err(Error::ExchangeError("gas oracle down".to_string()))
        }
    }

    pub(crate) fn test_service() -> ComparisonService {
        let market = Arc::new(FixedMarket { krw_rate: 1400.0 });
        ComparisonService::new(catalog::exchanges(), market.clone(), market.clone(), market)
    }

    fn request(amount: f64, fiat: FiatCurrency) -> ComparisonRequest {
        ComparisonRequest {
            amount,
            fiat_currency: fiat,
            stablecoin: Stablecoin::Usdt,
            chain: Chain::Trc20,
            mode: RampMode::OnRamp,
        }
    }

    #[tokio::test]
    async fn test_compare_uses_fallback_before_refresh() {
        let service = test_service();
        assert!(service.snapshot().await.updated_at.is_none());

        let result = service.compare(request(1_000_000.0, FiatCurrency::Krw)).await.unwrap();
        // Only the Korean exchanges take KRW
        assert_eq!(result.quotes.len(), 2);
        let upbit = result.quotes.iter().find(|q| q.exchange_id == ExchangeId::Upbit).unwrap();
        assert!((upbit.stablecoin_price - 1350.0 * 1.013).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let service = test_service();
        service.refresh_market_data().await;

        let snapshot = service.snapshot().await;
        assert!(snapshot.updated_at.is_some());
        assert_eq!(snapshot.rates.rate(FiatCurrency::Krw), 1400.0);

        let result = service.compare(request(1_000_000.0, FiatCurrency::Krw)).await.unwrap();
        let upbit = result.quotes.iter().find(|q| q.exchange_id == ExchangeId::Upbit).unwrap();
        assert!((upbit.stablecoin_price - 1400.0 * 1.013).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_gas_refresh_failure_keeps_fallback() {
        let service = test_service();
        service.refresh_gas().await;

        let ranking = service.gas_comparison(GasSortKey::Cost).await;
        assert_eq!(ranking.chains.len(), 6);
        assert_eq!(ranking.cheapest.unwrap().fee.chain_id, Chain::Sol);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let service = test_service();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = service.compare(request(amount, FiatCurrency::Usd)).await;
            assert!(matches!(result, Err(Error::InvalidRequest(_))));
        }
    }

    #[tokio::test]
    async fn test_remittance_rejects_same_currency() {
        let service = test_service();
        let result = service
            .remittance(1000.0, FiatCurrency::Eur, FiatCurrency::Eur)
            .await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        let result = service
            .remittance(f64::INFINITY, FiatCurrency::Usd, FiatCurrency::Krw)
            .await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        let result = service
            .remittance(1000.0, FiatCurrency::Usd, FiatCurrency::Krw)
            .await
            .unwrap();
        assert_eq!(result.mid_market_rate, 1350.0);
    }

    #[test]
    fn test_get_exchange() {
        let service = test_service();
        assert_eq!(service.get_exchange(ExchangeId::Kraken).unwrap().name, "Kraken");
        assert_eq!(service.list_exchanges().len(), 7);

        let service = ComparisonService::new(
            vec![],
            Arc::new(FixedMarket { krw_rate: 1.0 }),
            Arc::new(FixedMarket { krw_rate: 1.0 }),
            Arc::new(FixedMarket { krw_rate: 1.0 }),
        );
        assert!(matches!(
            service.get_exchange(ExchangeId::Kraken),
            Err(Error::NotFound(_))
        ));
    }
}
