//! Static reference data: exchanges, fiat currencies, stablecoins and chains.

use crate::models::{
    Chain, ChainInfo, ExchangeId, ExchangeInfo, FiatCurrency, FiatCurrencyInfo, Stablecoin,
    StablecoinInfo, TradingFee, WithdrawalFees,
};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

fn fees(entries: &[(Chain, &[(Stablecoin, f64)])]) -> WithdrawalFees {
    entries
        .iter()
        .map(|(chain, coins)| (*chain, coins.iter().copied().collect::<BTreeMap<_, _>>()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Built-in exchange catalog. Order matters: earlier entries win ties.
pub fn exchanges() -> Vec<ExchangeInfo> {
    use Chain::*;
    use Stablecoin::*;

    vec![
        ExchangeInfo {
            id: ExchangeId::Upbit,
            name: "Upbit".to_string(),
            country: "South Korea".to_string(),
            supported_fiat: vec![FiatCurrency::Krw],
            supported_stablecoins: vec![Usdt, Usdc],
            trading_fee: TradingFee {
                maker: 0.0005,
                taker: 0.0005,
            },
            spread_estimate: 0.001,
            fx_markup: 0.012,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 6.0), (Usdc, 6.0)]),
                (Trc20, &[(Usdt, 1.0)]),
                (Sol, &[(Usdc, 1.0)]),
            ]),
            deposit_methods: strings(&["KRW Bank Transfer (K Bank)"]),
            processing_time: "Instant".to_string(),
            referral_url: None,
        },
        ExchangeInfo {
            id: ExchangeId::Bithumb,
            name: "Bithumb".to_string(),
            country: "South Korea".to_string(),
            supported_fiat: vec![FiatCurrency::Krw],
            supported_stablecoins: vec![Usdt, Usdc],
            trading_fee: TradingFee {
                maker: 0.0004,
                taker: 0.0004,
            },
            spread_estimate: 0.0015,
            fx_markup: 0.013,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 6.5), (Usdc, 6.5)]),
                (Trc20, &[(Usdt, 1.0)]),
            ]),
            deposit_methods: strings(&["KRW Bank Transfer (KB Kookmin)"]),
            processing_time: "Instant".to_string(),
            referral_url: None,
        },
        ExchangeInfo {
            id: ExchangeId::Binance,
            name: "Binance".to_string(),
            country: "Global".to_string(),
            supported_fiat: vec![FiatCurrency::Usd, FiatCurrency::Eur, FiatCurrency::Gbp],
            supported_stablecoins: vec![Usdt, Usdc, Dai],
            trading_fee: TradingFee {
                maker: 0.001,
                taker: 0.001,
            },
            spread_estimate: 0.0005,
            fx_markup: 0.002,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 4.5), (Usdc, 4.5), (Dai, 5.0)]),
                (Trc20, &[(Usdt, 1.0)]),
                (Sol, &[(Usdt, 1.0), (Usdc, 1.0)]),
                (Arbitrum, &[(Usdt, 0.8), (Usdc, 0.8)]),
                (Base, &[(Usdc, 0.5)]),
                (Polygon, &[(Usdt, 0.8), (Usdc, 0.8)]),
            ]),
            deposit_methods: strings(&["Bank Transfer (SEPA)", "Credit/Debit Card", "Apple Pay"]),
            processing_time: "Instant - 1 day".to_string(),
            referral_url: Some("https://accounts.binance.com/register".to_string()),
        },
        ExchangeInfo {
            id: ExchangeId::Coinbase,
            name: "Coinbase".to_string(),
            country: "United States".to_string(),
            supported_fiat: vec![FiatCurrency::Usd, FiatCurrency::Eur, FiatCurrency::Gbp],
            supported_stablecoins: vec![Usdc, Usdt, Dai],
            trading_fee: TradingFee {
                maker: 0.004,
                taker: 0.006,
            },
            spread_estimate: 0.005,
            fx_markup: 0.0,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 5.0), (Dai, 5.0)]),
                (Polygon, &[(Usdt, 0.1)]),
            ]),
            deposit_methods: strings(&["ACH", "Wire Transfer", "Debit Card", "PayPal"]),
            processing_time: "1-5 business days".to_string(),
            referral_url: Some("https://www.coinbase.com/join".to_string()),
        },
        ExchangeInfo {
            id: ExchangeId::Bybit,
            name: "Bybit".to_string(),
            country: "Global".to_string(),
            supported_fiat: vec![FiatCurrency::Usd, FiatCurrency::Eur, FiatCurrency::Gbp],
            supported_stablecoins: vec![Usdt, Usdc],
            trading_fee: TradingFee {
                maker: 0.001,
                taker: 0.001,
            },
            spread_estimate: 0.0008,
            fx_markup: 0.003,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 3.0), (Usdc, 3.0)]),
                (Trc20, &[(Usdt, 1.0)]),
                (Sol, &[(Usdt, 1.0), (Usdc, 1.0)]),
                (Arbitrum, &[(Usdt, 0.5), (Usdc, 0.5)]),
                (Polygon, &[(Usdt, 0.3), (Usdc, 0.3)]),
            ]),
            deposit_methods: strings(&["Bank Transfer (SEPA)", "Credit/Debit Card", "P2P"]),
            processing_time: "Instant - 1 day".to_string(),
            referral_url: None,
        },
        ExchangeInfo {
            id: ExchangeId::Kraken,
            name: "Kraken".to_string(),
            country: "United States".to_string(),
            supported_fiat: vec![FiatCurrency::Usd, FiatCurrency::Eur, FiatCurrency::Gbp],
            supported_stablecoins: vec![Usdt, Usdc, Dai],
            trading_fee: TradingFee {
                maker: 0.0025,
                taker: 0.004,
            },
            spread_estimate: 0.0005,
            fx_markup: 0.001,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 2.5), (Usdc, 2.5), (Dai, 5.0)]),
                (Trc20, &[(Usdt, 2.5)]),
                (Sol, &[(Usdt, 1.0), (Usdc, 1.0)]),
                (Arbitrum, &[(Usdc, 0.5)]),
                (Polygon, &[(Usdt, 1.0), (Usdc, 1.0)]),
            ]),
            deposit_methods: strings(&["ACH", "Wire Transfer", "SEPA", "Faster Payments"]),
            processing_time: "1-5 business days".to_string(),
            referral_url: None,
        },
        ExchangeInfo {
            id: ExchangeId::Okx,
            name: "OKX".to_string(),
            country: "Global".to_string(),
            supported_fiat: vec![FiatCurrency::Usd, FiatCurrency::Eur, FiatCurrency::Gbp],
            supported_stablecoins: vec![Usdt, Usdc, Dai],
            trading_fee: TradingFee {
                maker: 0.0008,
                taker: 0.001,
            },
            spread_estimate: 0.0005,
            fx_markup: 0.0025,
            withdrawal_fees: fees(&[
                (Erc20, &[(Usdt, 3.0), (Usdc, 3.0), (Dai, 4.0)]),
                (Trc20, &[(Usdt, 1.0)]),
                (Sol, &[(Usdt, 1.0), (Usdc, 1.0)]),
                (Arbitrum, &[(Usdt, 0.1), (Usdc, 0.1)]),
                (Base, &[(Usdc, 0.1)]),
                (Polygon, &[(Usdt, 0.1), (Usdc, 0.1)]),
            ]),
            deposit_methods: strings(&["Bank Transfer (SEPA)", "Credit/Debit Card", "P2P"]),
            processing_time: "Instant - 1 day".to_string(),
            referral_url: None,
        },
    ]
}

/// Load an exchange catalog from a JSON file instead of the built-in one
pub fn load_exchanges(path: impl AsRef<Path>) -> Result<Vec<ExchangeInfo>> {
    let path = path.as_ref();
    debug!("Loading exchange catalog from {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read exchange catalog {}: {}",
            path.display(),
            e
        ))
    })?;

    let exchanges: Vec<ExchangeInfo> = serde_json::from_str(&raw).map_err(|e| {
        Error::ParseError(format!("Failed to parse exchange catalog: {}", e))
    })?;

    validate_exchanges(&exchanges)?;
    info!("Loaded {} exchanges from {}", exchanges.len(), path.display());

    Ok(exchanges)
}

/// Fee rates, spreads, markups and withdrawal fees must be non-negative
pub fn validate_exchanges(exchanges: &[ExchangeInfo]) -> Result<()> {
    for exchange in exchanges {
        let rates = [
            exchange.trading_fee.maker,
            exchange.trading_fee.taker,
            exchange.spread_estimate,
            exchange.fx_markup,
        ];
        let withdrawal_ok = exchange
            .withdrawal_fees
            .values()
            .flat_map(|coins| coins.values())
            .all(|fee| *fee >= 0.0);

        if rates.iter().any(|rate| *rate < 0.0) || !withdrawal_ok {
            return Err(Error::ConfigError(format!(
                "Exchange '{}' has a negative fee, spread or markup",
                exchange.id
            )));
        }
    }
    Ok(())
}

pub fn fiat_currencies() -> Vec<FiatCurrencyInfo> {
    vec![
        FiatCurrencyInfo {
            code: FiatCurrency::Usd,
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
            flag: "🇺🇸".to_string(),
            default_amount: 1_000.0,
        },
        FiatCurrencyInfo {
            code: FiatCurrency::Krw,
            name: "South Korean Won".to_string(),
            symbol: "₩".to_string(),
            flag: "🇰🇷".to_string(),
            default_amount: 1_000_000.0,
        },
        FiatCurrencyInfo {
            code: FiatCurrency::Eur,
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            flag: "🇪🇺".to_string(),
            default_amount: 1_000.0,
        },
        FiatCurrencyInfo {
            code: FiatCurrency::Gbp,
            name: "British Pound".to_string(),
            symbol: "£".to_string(),
            flag: "🇬🇧".to_string(),
            default_amount: 1_000.0,
        },
    ]
}

/// Default amount to pre-fill for a currency
pub fn default_amount(currency: FiatCurrency) -> f64 {
    fiat_currencies()
        .into_iter()
        .find(|info| info.code == currency)
        .map(|info| info.default_amount)
        .unwrap_or(1_000.0)
}

pub fn stablecoins() -> Vec<StablecoinInfo> {
    Stablecoin::ALL
        .into_iter()
        .map(|coin| StablecoinInfo {
            id: coin,
            name: match coin {
                Stablecoin::Usdt => "Tether",
                Stablecoin::Usdc => "USD Coin",
                Stablecoin::Dai => "Dai",
            }
            .to_string(),
            coingecko_id: coin.coingecko_id().to_string(),
        })
        .collect()
}

pub fn chains() -> Vec<ChainInfo> {
    Chain::ALL
        .into_iter()
        .map(|chain| ChainInfo {
            id: chain,
            name: match chain {
                Chain::Erc20 => "Ethereum (ERC-20)",
                Chain::Trc20 => "Tron (TRC-20)",
                Chain::Sol => "Solana",
                Chain::Arbitrum => "Arbitrum",
                Chain::Base => "Base",
                Chain::Polygon => "Polygon",
            }
            .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = exchanges();
        assert_eq!(catalog.len(), 7);
        assert!(validate_exchanges(&catalog).is_ok());

        let ids: HashSet<_> = catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_every_fiat_is_served() {
        let catalog = exchanges();
        for fiat in FiatCurrency::ALL {
            assert!(
                catalog.iter().any(|e| e.supported_fiat.contains(&fiat)),
                "no exchange supports {}",
                fiat
            );
        }
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut catalog = exchanges();
        catalog[0].spread_estimate = -0.01;
        assert!(matches!(
            validate_exchanges(&catalog),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_exchanges_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", std::process::id()));
        let json = serde_json::to_string(&exchanges()[2..4]).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = load_exchanges(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, ExchangeId::Binance);
        assert_eq!(loaded[1].id, ExchangeId::Coinbase);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_exchanges("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_default_amounts() {
        assert_eq!(default_amount(FiatCurrency::Krw), 1_000_000.0);
        assert_eq!(default_amount(FiatCurrency::Usd), 1_000.0);
        assert_eq!(stablecoins()[1].coingecko_id, "usd-coin");
        assert_eq!(chains()[1].name, "Tron (TRC-20)");
    }
}
