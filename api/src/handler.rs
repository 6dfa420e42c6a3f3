use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    catalog,
    models::{
        Chain, ChainInfo, ComparisonRequest, ComparisonResult, ExchangeId, ExchangeInfo,
        ExchangeRates, FiatCurrency, FiatCurrencyInfo, RampMode, Stablecoin, StablecoinInfo,
        StablecoinPrices,
    },
    Error as CommonError,
};
use engine::{
    gas::{GasComparison, GasSortKey},
    remittance::RemittanceComparison,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

use crate::service::ComparisonService;

pub type SharedService = Arc<ComparisonService>;

pub struct ApiError(CommonError);

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            CommonError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            CommonError::ExchangeError(msg) => (StatusCode::BAD_GATEWAY, msg),
            CommonError::ParseError(msg) => (StatusCode::BAD_REQUEST, msg),
            CommonError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            CommonError::HttpError(e) => (
                StatusCode::BAD_GATEWAY,
                format!("External API request failed: {}", e),
            ),
            CommonError::ConfigError(msg) => {
                error!("Configuration error while serving request: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Parse an optional query value, falling back to `default` when absent
fn parse_or<T>(value: Option<&str>, default: T) -> Result<T, CommonError>
where
    T: FromStr<Err = CommonError>,
{
    match value {
        Some(raw) => raw.parse(),
        None => Ok(default),
    }
}

pub async fn list_exchanges(State(service): State<SharedService>) -> Json<Vec<ExchangeInfo>> {
    Json(service.list_exchanges().to_vec())
}

pub async fn get_exchange(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<ExchangeInfo>, ApiError> {
    let id = ExchangeId::from_str(&id)?;
    Ok(Json(service.get_exchange(id)?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrenciesResponse {
    pub fiat: Vec<FiatCurrencyInfo>,
    pub stablecoins: Vec<StablecoinInfo>,
    pub chains: Vec<ChainInfo>,
}

pub async fn list_currencies() -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        fiat: catalog::fiat_currencies(),
        stablecoins: catalog::stablecoins(),
        chains: catalog::chains(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub amount: Option<f64>,
    pub fiat: Option<String>,
    pub stablecoin: Option<String>,
    pub chain: Option<String>,
    pub mode: Option<String>,
}

impl CompareQuery {
    /// Missing fields default to a USD -> USDT purchase on TRC-20
    pub fn into_request(self) -> Result<ComparisonRequest, CommonError> {
        let fiat_currency = parse_or(self.fiat.as_deref(), FiatCurrency::Usd)?;

        Ok(ComparisonRequest {
            amount: self
                .amount
                .unwrap_or_else(|| catalog::default_amount(fiat_currency)),
            fiat_currency,
            stablecoin: parse_or(self.stablecoin.as_deref(), Stablecoin::Usdt)?,
            chain: parse_or(self.chain.as_deref(), Chain::Trc20)?,
            mode: parse_or(self.mode.as_deref(), RampMode::OnRamp)?,
        })
    }
}

pub async fn compare(
    State(service): State<SharedService>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let request = query.into_request()?;
    debug!("Comparison request: {:?}", request);

    let result = service.compare(request).await?;
    Ok(Json(result))
}

pub async fn get_prices(State(service): State<SharedService>) -> Json<StablecoinPrices> {
    Json(service.snapshot().await.prices)
}

pub async fn get_exchange_rates(State(service): State<SharedService>) -> Json<ExchangeRates> {
    Json(service.snapshot().await.rates)
}

#[derive(Debug, Deserialize)]
pub struct GasQuery {
    pub sort: Option<String>,
}

pub async fn get_gas(
    State(service): State<SharedService>,
    Query(query): Query<GasQuery>,
) -> Result<Json<GasComparison>, ApiError> {
    let sort_by = match query.sort.as_deref() {
        Some("cost") | None => GasSortKey::Cost,
        Some("speed") => GasSortKey::Speed,
        Some(unknown) => {
            return Err(CommonError::ParseError(format!(
                "Unknown sort key: {}. Supported keys: cost, speed",
                unknown
            ))
            .into())
        }
    };

    Ok(Json(service.gas_comparison(sort_by).await))
}

#[derive(Debug, Deserialize)]
pub struct RemittanceQuery {
    pub amount: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn get_remittance(
    State(service): State<SharedService>,
    Query(query): Query<RemittanceQuery>,
) -> Result<Json<RemittanceComparison>, ApiError> {
    let from = parse_or(query.from.as_deref(), FiatCurrency::Usd)?;
    let to = parse_or(query.to.as_deref(), FiatCurrency::Krw)?;
    let amount = query
        .amount
        .unwrap_or_else(|| catalog::default_amount(from));

    let comparison = service.remittance(amount, from, to).await?;
    Ok(Json(comparison))
}
