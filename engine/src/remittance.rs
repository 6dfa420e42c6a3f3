//! Cross-border transfer: traditional providers vs. a stablecoin route
//! (buy stablecoin, send on-chain, sell on the other side).

use common::models::{ExchangeRates, FiatCurrency};
use serde::{Deserialize, Serialize};

/// Fee schedule of a traditional transfer provider, in the sending currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankFee {
    pub provider: String,
    pub send_fee: f64,
    pub fx_markup_percent: f64,
    pub receive_fee: f64,
    pub speed: String,
}

/// Fee schedule of the stablecoin route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CryptoRoute {
    pub buy_fee_percent: f64,
    pub gas_fee_usd: f64,
    pub sell_fee_percent: f64,
    pub speed: String,
}

impl Default for CryptoRoute {
    fn default() -> Self {
        Self {
            buy_fee_percent: 0.001,
            gas_fee_usd: 0.5,
            sell_fee_percent: 0.001,
            speed: "10-30 minutes".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankQuote {
    #[serde(flatten)]
    pub bank: BankFee,
    pub total_fee: f64,
    pub received: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CryptoQuote {
    pub buy_fee: f64,
    pub gas_fee_local: f64,
    pub sell_fee: f64,
    pub total_fee: f64,
    pub received: f64,
    pub speed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemittanceComparison {
    pub amount: f64,
    pub from: FiatCurrency,
    pub to: FiatCurrency,
    /// Units of `to` per unit of `from`
    pub mid_market_rate: f64,
    pub banks: Vec<BankQuote>,
    pub best_bank: Option<BankQuote>,
    pub crypto: CryptoQuote,
    /// Extra amount the recipient gets with the stablecoin route
    pub savings: f64,
}

fn bank(provider: &str, send_fee: f64, fx_markup_percent: f64, receive_fee: f64, speed: &str) -> BankFee {
    BankFee {
        provider: provider.to_string(),
        send_fee,
        fx_markup_percent,
        receive_fee,
        speed: speed.to_string(),
    }
}

/// Typical provider fees for sending from `currency`
pub fn bank_fees(currency: FiatCurrency) -> Vec<BankFee> {
    const WIRE: &str = "1-3 business days";
    const WU: &str = "Minutes - 1 day";
    const WISE: &str = "1-2 business days";

    match currency {
        FiatCurrency::Usd => vec![
            bank("Wire Transfer (Bank)", 30.0, 0.03, 15.0, WIRE),
            bank("Western Union", 8.0, 0.04, 0.0, WU),
            bank("Wise (TransferWise)", 5.0, 0.005, 0.0, WISE),
        ],
        FiatCurrency::Krw => vec![
            bank("Bank Wire (Korea)", 20_000.0, 0.025, 10_000.0, WIRE),
            bank("Western Union", 10_000.0, 0.04, 0.0, WU),
            bank("Wise (TransferWise)", 3_000.0, 0.005, 0.0, WISE),
        ],
        FiatCurrency::Eur => vec![
            bank("SEPA Transfer (Bank)", 5.0, 0.025, 5.0, "1-2 business days"),
            bank("Western Union", 6.0, 0.04, 0.0, WU),
            bank("Wise (TransferWise)", 3.0, 0.005, 0.0, WISE),
        ],
        FiatCurrency::Gbp => vec![
            bank("Wire Transfer (Bank)", 25.0, 0.03, 10.0, WIRE),
            bank("Western Union", 5.0, 0.04, 0.0, WU),
            bank("Wise (TransferWise)", 3.0, 0.005, 0.0, WISE),
        ],
    }
}

/// Mid-market rate between two currencies quoted against a common base
pub fn mid_market_rate(rates: &ExchangeRates, from: FiatCurrency, to: FiatCurrency) -> f64 {
    rates.rate(to) / rates.rate(from)
}

pub fn compare_remittance(
    amount: f64,
    from: FiatCurrency,
    to: FiatCurrency,
    rates: &ExchangeRates,
    route: &CryptoRoute,
) -> RemittanceComparison {
    let mid = mid_market_rate(rates, from, to);

    let banks: Vec<BankQuote> = bank_fees(from)
        .into_iter()
        .map(|bank| {
            let total_fee = bank.send_fee + amount * bank.fx_markup_percent + bank.receive_fee;
            BankQuote {
                received: (amount - total_fee) * mid,
                total_fee,
                bank,
            }
        })
        .collect();

    // First provider wins ties
    let best_bank = banks
        .iter()
        .fold(None::<&BankQuote>, |best, quote| match best {
            Some(b) if b.received >= quote.received => Some(b),
            _ => Some(quote),
        })
        .cloned();

    let gas_fee_local = route.gas_fee_usd * rates.rate(from);
    let buy_fee = amount * route.buy_fee_percent;
    let sell_fee = amount * route.sell_fee_percent;
    let total_fee = buy_fee + gas_fee_local + sell_fee;

    let crypto = CryptoQuote {
        buy_fee,
        gas_fee_local,
        sell_fee,
        total_fee,
        received: (amount - total_fee) * mid,
        speed: route.speed.clone(),
    };

    let savings = crypto.received - best_bank.as_ref().map(|b| b.received).unwrap_or(0.0);

    RemittanceComparison {
        amount,
        from,
        to,
        mid_market_rate: mid,
        banks,
        best_bank,
        crypto,
        savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn rates() -> ExchangeRates {
        ExchangeRates {
            base: "USD".to_string(),
            rates: BTreeMap::from([
                ("USD".to_string(), 1.0),
                ("KRW".to_string(), 1350.0),
                ("EUR".to_string(), 0.92),
                ("GBP".to_string(), 0.79),
            ]),
        }
    }

    #[test]
    fn test_mid_market_rate() {
        let rates = rates();
        assert_eq!(mid_market_rate(&rates, FiatCurrency::Usd, FiatCurrency::Krw), 1350.0);
        assert!((mid_market_rate(&rates, FiatCurrency::Eur, FiatCurrency::Gbp) - 0.79 / 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_usd_to_krw() {
        let result = compare_remittance(
            1000.0,
            FiatCurrency::Usd,
            FiatCurrency::Krw,
            &rates(),
            &CryptoRoute::default(),
        );

        assert_eq!(result.banks.len(), 3);
        // Wire: 30 + 30 + 15
        assert!((result.banks[0].total_fee - 75.0).abs() < 1e-9);
        assert!((result.banks[0].received - 925.0 * 1350.0).abs() < 1e-6);

        // Wise: 5 + 5 = 10 is the cheapest provider
        let best = result.best_bank.as_ref().unwrap();
        assert_eq!(best.bank.provider, "Wise (TransferWise)");
        assert!((best.received - 990.0 * 1350.0).abs() < 1e-6);

        // 1 + 0.5 + 1
        assert!((result.crypto.total_fee - 2.5).abs() < 1e-9);
        assert!((result.crypto.received - 997.5 * 1350.0).abs() < 1e-6);
        assert!((result.savings - 7.5 * 1350.0).abs() < 1e-6);
    }

    #[test]
    fn test_gas_fee_converted_to_sending_currency() {
        let result = compare_remittance(
            1_000_000.0,
            FiatCurrency::Krw,
            FiatCurrency::Usd,
            &rates(),
            &CryptoRoute::default(),
        );

        assert!((result.crypto.gas_fee_local - 675.0).abs() < 1e-9);
        assert_eq!(result.banks[0].bank.provider, "Bank Wire (Korea)");
    }
}
