use crate::models::{Chain, ExchangeId, FiatCurrency, RampMode, Stablecoin};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user wants to convert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    /// Fiat units when buying, stablecoin units when selling
    pub amount: f64,
    pub fiat_currency: FiatCurrency,
    pub stablecoin: Stablecoin,
    pub chain: Chain,
    pub mode: RampMode,
}

/// Cost breakdown for a single exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeQuote {
    pub exchange_id: ExchangeId,
    pub exchange_name: String,
    /// Effective price of one stablecoin in fiat
    pub stablecoin_price: f64,
    /// Absolute, in fiat
    pub trading_fee: f64,
    pub trading_fee_percent: f64,
    /// Absolute, in fiat
    pub spread: f64,
    pub spread_percent: f64,
    /// Absolute, in fiat
    pub fx_markup: f64,
    pub fx_markup_percent: f64,
    /// In stablecoin units
    pub withdrawal_fee: f64,
    pub withdrawal_fee_in_fiat: f64,
    /// Absolute, in fiat
    pub total_cost: f64,
    pub total_cost_percent: f64,
    /// Stablecoins received when buying, fiat received when selling
    pub amount_received: f64,
    pub is_best_rate: bool,
}

/// Ranked quotes for one request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub request: ComparisonRequest,
    pub quotes: Vec<ExchangeQuote>,
    /// None when no exchange supports the request
    pub best_quote_id: Option<ExchangeId>,
    pub timestamp: DateTime<Utc>,
}
