use crate::quote::compute_quote;
use chrono::Utc;
use common::models::{
    ComparisonRequest, ComparisonResult, ExchangeInfo, ExchangeRates, StablecoinPrices,
};
use tracing::debug;

/// Quote every eligible exchange and rank them by amount received.
///
/// The sort is stable, so exchanges listed earlier in `exchanges` win ties.
/// Higher `amount_received` is better in both directions since it is always
/// denominated in the asset the user wants to end up with.
pub fn compare_all(
    exchanges: &[ExchangeInfo],
    request: &ComparisonRequest,
    stablecoin_price_usd: f64,
    fx_rate: f64,
) -> ComparisonResult {
    let mut quotes: Vec<_> = exchanges
        .iter()
        .filter_map(|exchange| compute_quote(exchange, request, stablecoin_price_usd, fx_rate))
        .collect();

    quotes.sort_by(|a, b| b.amount_received.total_cmp(&a.amount_received));

    if let Some(best) = quotes.first_mut() {
        best.is_best_rate = true;
    }

    debug!(
        "Compared {} of {} exchanges for {} {} -> {} ({})",
        quotes.len(),
        exchanges.len(),
        request.amount,
        request.fiat_currency,
        request.stablecoin,
        request.mode
    );

    ComparisonResult {
        request: *request,
        best_quote_id: quotes.first().map(|quote| quote.exchange_id),
        quotes,
        timestamp: Utc::now(),
    }
}

/// Same as [`compare_all`], resolving the stablecoin price and FX rate from
/// the latest market data.
pub fn compare(
    exchanges: &[ExchangeInfo],
    request: &ComparisonRequest,
    prices: &StablecoinPrices,
    rates: &ExchangeRates,
) -> ComparisonResult {
    let stablecoin_price_usd = prices.usd_price(request.stablecoin);
    let fx_rate = rates.rate(request.fiat_currency);

    compare_all(exchanges, request, stablecoin_price_usd, fx_rate)
}
