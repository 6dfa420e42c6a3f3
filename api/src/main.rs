mod config;
mod handler;
mod refresh;
mod service;

use axum::{routing::get, Router};
use common::catalog;
use config::ApiConfig;
use connectors::{
    coingecko::CoinGeckoConnector, exchange_rate::OpenExchangeRateConnector, gas::GasConnector,
};
use handler::SharedService;
use service::ComparisonService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

fn router(service: SharedService) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/exchanges", get(handler::list_exchanges))
        .route("/api/v1/exchanges/:id", get(handler::get_exchange))
        .route("/api/v1/currencies", get(handler::list_currencies))
        .route("/api/v1/compare", get(handler::compare))
        .route("/api/v1/prices", get(handler::get_prices))
        .route("/api/v1/exchange-rate", get(handler::get_exchange_rates))
        .route("/api/v1/gas", get(handler::get_gas))
        .route("/api/v1/remittance", get(handler::get_remittance))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting stablecoin ramp comparison API");

    let config = ApiConfig::from_env();

    let exchanges = match &config.exchange_catalog_path {
        Some(path) => catalog::load_exchanges(path)
            .map_err(|e| format!("Failed to load exchange catalog: {}", e))?,
        None => catalog::exchanges(),
    };
    info!("Comparing {} exchanges", exchanges.len());

    let service = Arc::new(ComparisonService::new(
        exchanges,
        Arc::new(CoinGeckoConnector::new()),
        Arc::new(OpenExchangeRateConnector::new()),
        Arc::new(GasConnector::new(config.etherscan_api_key.clone())),
    ));

    let _refresh = refresh::spawn_refresh_tasks(
        service.clone(),
        Duration::from_secs(config.market_refresh_secs),
        Duration::from_secs(config.gas_refresh_secs),
    );

    let app = router(service);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid listen address: {}", e))?;
    info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
