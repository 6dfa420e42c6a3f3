use crate::models::{Chain, FiatCurrency, Stablecoin};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Exchange identifiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Upbit,
    Bithumb,
    Binance,
    Coinbase,
    Bybit,
    Kraken,
    Okx,
}

impl ExchangeId {
    pub const ALL: [ExchangeId; 7] = [
        ExchangeId::Upbit,
        ExchangeId::Bithumb,
        ExchangeId::Binance,
        ExchangeId::Coinbase,
        ExchangeId::Bybit,
        ExchangeId::Kraken,
        ExchangeId::Okx,
    ];
}

impl FromStr for ExchangeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExchangeId::ALL
            .into_iter()
            .find(|id| id.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::NotFound(format!("Exchange '{}' not found", s)))
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeId::Upbit => write!(f, "upbit"),
            ExchangeId::Bithumb => write!(f, "bithumb"),
            ExchangeId::Binance => write!(f, "binance"),
            ExchangeId::Coinbase => write!(f, "coinbase"),
            ExchangeId::Bybit => write!(f, "bybit"),
            ExchangeId::Kraken => write!(f, "kraken"),
            ExchangeId::Okx => write!(f, "okx"),
        }
    }
}

/// Maker/taker fee rates as fractions (0.001 = 0.1%)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TradingFee {
    pub maker: f64,
    pub taker: f64,
}

/// Sparse withdrawal fee table, in stablecoin units
pub type WithdrawalFees = BTreeMap<Chain, BTreeMap<Stablecoin, f64>>;

/// Static fee schedule and capabilities of an exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub id: ExchangeId,
    pub name: String,
    pub country: String,
    pub supported_fiat: Vec<FiatCurrency>,
    pub supported_stablecoins: Vec<Stablecoin>,
    pub trading_fee: TradingFee,
    /// Fraction of the mid-market price
    pub spread_estimate: f64,
    /// Fraction over the mid-market FX rate
    pub fx_markup: f64,
    #[serde(default)]
    pub withdrawal_fees: WithdrawalFees,
    #[serde(default)]
    pub deposit_methods: Vec<String>,
    pub processing_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_url: Option<String>,
}

impl ExchangeInfo {
    pub fn supports(&self, fiat: FiatCurrency, stablecoin: Stablecoin) -> bool {
        self.supported_fiat.contains(&fiat) && self.supported_stablecoins.contains(&stablecoin)
    }

    /// Withdrawal fee for a stablecoin on a chain. Missing entries cost nothing.
    pub fn withdrawal_fee(&self, chain: Chain, stablecoin: Stablecoin) -> f64 {
        self.withdrawal_fees
            .get(&chain)
            .and_then(|fees| fees.get(&stablecoin))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange_with_fees(fees: WithdrawalFees) -> ExchangeInfo {
        ExchangeInfo {
            id: ExchangeId::Binance,
            name: "Binance".to_string(),
            country: "Global".to_string(),
            supported_fiat: vec![FiatCurrency::Usd],
            supported_stablecoins: vec![Stablecoin::Usdt],
            trading_fee: TradingFee {
                maker: 0.001,
                taker: 0.001,
            },
            spread_estimate: 0.0005,
            fx_markup: 0.002,
            withdrawal_fees: fees,
            deposit_methods: vec![],
            processing_time: "Instant".to_string(),
            referral_url: None,
        }
    }

    #[test]
    fn test_withdrawal_fee_lookup() {
        let mut fees = WithdrawalFees::new();
        fees.insert(Chain::Trc20, BTreeMap::from([(Stablecoin::Usdt, 1.0)]));
        let exchange = exchange_with_fees(fees);

        assert_eq!(exchange.withdrawal_fee(Chain::Trc20, Stablecoin::Usdt), 1.0);
        // Chain present, stablecoin missing
        assert_eq!(exchange.withdrawal_fee(Chain::Trc20, Stablecoin::Usdc), 0.0);
        // Chain missing
        assert_eq!(exchange.withdrawal_fee(Chain::Erc20, Stablecoin::Usdt), 0.0);
    }

    #[test]
    fn test_parse_exchange_id() {
        assert_eq!("OKX".parse::<ExchangeId>().unwrap(), ExchangeId::Okx);
        assert!(matches!("ftx".parse::<ExchangeId>(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_supports() {
        let exchange = exchange_with_fees(WithdrawalFees::new());
        assert!(exchange.supports(FiatCurrency::Usd, Stablecoin::Usdt));
        assert!(!exchange.supports(FiatCurrency::Krw, Stablecoin::Usdt));
        assert!(!exchange.supports(FiatCurrency::Usd, Stablecoin::Dai));
    }

    #[test]
    fn test_deserialize_sparse_fee_table() {
        let json = r#"{
            "id": "kraken",
            "name": "Kraken",
            "country": "US",
            "supportedFiat": ["USD", "EUR"],
            "supportedStablecoins": ["USDC"],
            "tradingFee": { "maker": 0.0025, "taker": 0.004 },
            "spreadEstimate": 0.0005,
            "fxMarkup": 0.001,
            "withdrawalFees": { "SOL": { "USDC": 1.0 } },
            "processingTime": "1-5 business days"
        }"#;

        let exchange: ExchangeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(exchange.id, ExchangeId::Kraken);
        assert_eq!(exchange.withdrawal_fee(Chain::Sol, Stablecoin::Usdc), 1.0);
        assert_eq!(exchange.withdrawal_fee(Chain::Base, Stablecoin::Usdc), 0.0);
        assert!(exchange.deposit_methods.is_empty());
        assert!(exchange.referral_url.is_none());
    }
}
