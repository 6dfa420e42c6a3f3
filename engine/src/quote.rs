use common::models::{ComparisonRequest, ExchangeInfo, ExchangeQuote, RampMode};

/// Price a request on a single exchange.
///
/// Returns `None` when the exchange does not list the requested fiat currency
/// or stablecoin. `fx_rate` is units of the request's fiat currency per 1 USD.
pub fn compute_quote(
    exchange: &ExchangeInfo,
    request: &ComparisonRequest,
    stablecoin_price_usd: f64,
    fx_rate: f64,
) -> Option<ExchangeQuote> {
    if !exchange.supports(request.fiat_currency, request.stablecoin) {
        return None;
    }

    let amount = request.amount;

    // Mid-market price of one stablecoin in the request's fiat
    let base_price = stablecoin_price_usd * fx_rate;

    let fx_markup_amount = base_price * exchange.fx_markup;
    let spread_amount = base_price * exchange.spread_estimate;
    let trading_fee_rate = exchange.trading_fee.taker;

    let quote = match request.mode {
        RampMode::OnRamp => {
            let withdrawal_fee = exchange.withdrawal_fee(request.chain, request.stablecoin);
            let effective_price = base_price + fx_markup_amount + spread_amount;

            let trading_fee = amount * trading_fee_rate;
            let stablecoins_bought = (amount - trading_fee) / effective_price;
            let withdrawal_fee_in_fiat = withdrawal_fee * effective_price;

            let total_cost = trading_fee
                + (fx_markup_amount + spread_amount) * stablecoins_bought
                + withdrawal_fee_in_fiat;

            ExchangeQuote {
                exchange_id: exchange.id,
                exchange_name: exchange.name.clone(),
                stablecoin_price: effective_price,
                trading_fee,
                trading_fee_percent: trading_fee_rate,
                spread: spread_amount * stablecoins_bought,
                spread_percent: exchange.spread_estimate,
                fx_markup: fx_markup_amount * stablecoins_bought,
                fx_markup_percent: exchange.fx_markup,
                withdrawal_fee,
                withdrawal_fee_in_fiat,
                total_cost,
                total_cost_percent: total_cost / amount,
                amount_received: (stablecoins_bought - withdrawal_fee).max(0.0),
                is_best_rate: false,
            }
        }
        RampMode::OffRamp => {
            // Amount is in stablecoin units; nothing is withdrawn on-chain
            let effective_price = base_price - fx_markup_amount - spread_amount;

            let gross_fiat = amount * effective_price;
            let trading_fee = gross_fiat * trading_fee_rate;

            let total_cost = trading_fee + (fx_markup_amount + spread_amount) * amount;

            ExchangeQuote {
                exchange_id: exchange.id,
                exchange_name: exchange.name.clone(),
                stablecoin_price: effective_price,
                trading_fee,
                trading_fee_percent: trading_fee_rate,
                spread: spread_amount * amount,
                spread_percent: exchange.spread_estimate,
                fx_markup: fx_markup_amount * amount,
                fx_markup_percent: exchange.fx_markup,
                withdrawal_fee: 0.0,
                withdrawal_fee_in_fiat: 0.0,
                total_cost,
                total_cost_percent: total_cost / (amount * base_price),
                amount_received: (gross_fiat - trading_fee).max(0.0),
                is_best_rate: false,
            }
        }
    };

    Some(quote)
}
