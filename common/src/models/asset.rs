use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fiat currencies a user can pay with or cash out to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiatCurrency {
    Usd,
    Krw,
    Eur,
    Gbp,
}

impl FiatCurrency {
    pub const ALL: [FiatCurrency; 4] = [
        FiatCurrency::Usd,
        FiatCurrency::Krw,
        FiatCurrency::Eur,
        FiatCurrency::Gbp,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Krw => "KRW",
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Gbp => "GBP",
        }
    }
}

impl std::fmt::Display for FiatCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FiatCurrency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(FiatCurrency::Usd),
            "KRW" => Ok(FiatCurrency::Krw),
            "EUR" => Ok(FiatCurrency::Eur),
            "GBP" => Ok(FiatCurrency::Gbp),
            unknown => Err(Error::ParseError(format!(
                "Unknown fiat currency: {}. Supported currencies: USD, KRW, EUR, GBP",
                unknown
            ))),
        }
    }
}

/// Supported stablecoins
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stablecoin {
    Usdt,
    Usdc,
    Dai,
}

impl Stablecoin {
    pub const ALL: [Stablecoin; 3] = [Stablecoin::Usdt, Stablecoin::Usdc, Stablecoin::Dai];

    pub fn symbol(&self) -> &'static str {
        match self {
            Stablecoin::Usdt => "USDT",
            Stablecoin::Usdc => "USDC",
            Stablecoin::Dai => "DAI",
        }
    }

    /// Identifier used by CoinGecko's simple price endpoint
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            Stablecoin::Usdt => "tether",
            Stablecoin::Usdc => "usd-coin",
            Stablecoin::Dai => "dai",
        }
    }
}

impl std::fmt::Display for Stablecoin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Stablecoin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USDT" => Ok(Stablecoin::Usdt),
            "USDC" => Ok(Stablecoin::Usdc),
            "DAI" => Ok(Stablecoin::Dai),
            unknown => Err(Error::ParseError(format!(
                "Unknown stablecoin: {}. Supported stablecoins: USDT, USDC, DAI",
                unknown
            ))),
        }
    }
}

/// Networks a stablecoin can be withdrawn on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chain {
    #[serde(rename = "ERC-20")]
    Erc20,
    #[serde(rename = "TRC-20")]
    Trc20,
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "Arbitrum")]
    Arbitrum,
    #[serde(rename = "Base")]
    Base,
    #[serde(rename = "Polygon")]
    Polygon,
}

impl Chain {
    pub const ALL: [Chain; 6] = [
        Chain::Erc20,
        Chain::Trc20,
        Chain::Sol,
        Chain::Arbitrum,
        Chain::Base,
        Chain::Polygon,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Chain::Erc20 => "ERC-20",
            Chain::Trc20 => "TRC-20",
            Chain::Sol => "SOL",
            Chain::Arbitrum => "Arbitrum",
            Chain::Base => "Base",
            Chain::Polygon => "Polygon",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::ParseError(format!(
                    "Unknown chain: {}. Supported chains: ERC-20, TRC-20, SOL, Arbitrum, Base, Polygon",
                    s
                ))
            })
    }
}

/// Direction of a conversion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RampMode {
    /// Fiat -> stablecoin
    OnRamp,
    /// Stablecoin -> fiat
    OffRamp,
}

impl std::fmt::Display for RampMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RampMode::OnRamp => write!(f, "on-ramp"),
            RampMode::OffRamp => write!(f, "off-ramp"),
        }
    }
}

impl FromStr for RampMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on-ramp" | "buy" => Ok(RampMode::OnRamp),
            "off-ramp" | "sell" => Ok(RampMode::OffRamp),
            unknown => Err(Error::ParseError(format!(
                "Unknown mode: {}. Supported modes: on-ramp, off-ramp",
                unknown
            ))),
        }
    }
}

/// Display metadata for a fiat currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FiatCurrencyInfo {
    pub code: FiatCurrency,
    pub name: String,
    pub symbol: String,
    pub flag: String,
    /// Amount pre-filled when the user switches to this currency
    pub default_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StablecoinInfo {
    pub id: Stablecoin,
    pub name: String,
    pub coingecko_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub id: Chain,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes_case_insensitive() {
        assert_eq!("krw".parse::<FiatCurrency>().unwrap(), FiatCurrency::Krw);
        assert_eq!("usdc".parse::<Stablecoin>().unwrap(), Stablecoin::Usdc);
        assert_eq!("trc-20".parse::<Chain>().unwrap(), Chain::Trc20);
        assert_eq!("sell".parse::<RampMode>().unwrap(), RampMode::OffRamp);
    }

    #[test]
    fn test_parse_unknown_code() {
        assert!(matches!(
            "JPY".parse::<FiatCurrency>(),
            Err(Error::ParseError(_))
        ));
        assert!("BSC".parse::<Chain>().is_err());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Chain::Erc20).unwrap(), "\"ERC-20\"");
        assert_eq!(serde_json::to_string(&RampMode::OffRamp).unwrap(), "\"off-ramp\"");
        assert_eq!(serde_json::to_string(&FiatCurrency::Gbp).unwrap(), "\"GBP\"");
        let coin: Stablecoin = serde_json::from_str("\"DAI\"").unwrap();
        assert_eq!(coin, Stablecoin::Dai);
    }
}
