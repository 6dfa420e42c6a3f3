//! Values served when a market data source is unreachable or misbehaves.

use common::models::{Chain, ExchangeRates, GasFee, GasSpeed, StablecoinPrices};
use std::collections::BTreeMap;

/// Stablecoins are assumed to hold their peg
pub fn stablecoin_prices() -> StablecoinPrices {
    StablecoinPrices(
        ["tether", "usd-coin", "dai"]
            .into_iter()
            .map(|id| (id.to_string(), BTreeMap::from([("usd".to_string(), 1.0)])))
            .collect(),
    )
}

/// Approximate units per USD
pub const FALLBACK_RATES: [(&str, f64); 5] = [
    ("USD", 1.0),
    ("KRW", 1350.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 155.0),
];

pub fn exchange_rates() -> ExchangeRates {
    ExchangeRates {
        base: "USD".to_string(),
        rates: FALLBACK_RATES
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect(),
    }
}

pub fn fallback_rate(code: &str) -> f64 {
    FALLBACK_RATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, rate)| *rate)
        .unwrap_or(1.0)
}

fn gas(
    chain: &str,
    chain_id: Chain,
    native_token: &str,
    gas_price: &str,
    transfer_cost_usd: f64,
    transfer_cost_native: f64,
    speed: GasSpeed,
    avg_confirm_time: &str,
) -> GasFee {
    GasFee {
        chain: chain.to_string(),
        chain_id,
        native_token: native_token.to_string(),
        gas_price: gas_price.to_string(),
        transfer_cost_usd,
        transfer_cost_native,
        speed,
        avg_confirm_time: avg_confirm_time.to_string(),
    }
}

/// Estimated USDT/USDC transfer costs per chain
pub fn gas_fees() -> Vec<GasFee> {
    vec![
        gas("Ethereum (ERC-20)", Chain::Erc20, "ETH", "~15 Gwei", 3.5, 0.0014, GasSpeed::Slow, "~15 sec"),
        gas("Tron (TRC-20)", Chain::Trc20, "TRX", "~420 SUN", 0.5, 6.5, GasSpeed::Fast, "~3 sec"),
        gas("Solana", Chain::Sol, "SOL", "~0.000005 SOL", 0.01, 0.000005, GasSpeed::VeryFast, "~0.4 sec"),
        gas("Arbitrum", Chain::Arbitrum, "ETH", "~0.1 Gwei", 0.1, 0.00004, GasSpeed::Fast, "~2 sec"),
        gas("Base", Chain::Base, "ETH", "~0.05 Gwei", 0.05, 0.00002, GasSpeed::Fast, "~2 sec"),
        gas("Polygon", Chain::Polygon, "POL", "~30 Gwei", 0.02, 0.05, GasSpeed::Fast, "~2 sec"),
    ]
}
