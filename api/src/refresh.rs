use crate::service::ComparisonService;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Poll market data and gas fees on independent timers. The first refresh of
/// each runs immediately.
pub fn spawn_refresh_tasks(
    service: Arc<ComparisonService>,
    market_every: Duration,
    gas_every: Duration,
) -> Vec<JoinHandle<()>> {
    info!(
        "Refreshing market data every {:?}, gas fees every {:?}",
        market_every, gas_every
    );

    let market_service = service.clone();
    let market = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(market_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            market_service.refresh_market_data().await;
        }
    });

    let gas = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(gas_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            service.refresh_gas().await;
        }
    });

    vec![market, gas]
}
