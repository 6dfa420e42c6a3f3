use common::models::GasFee;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GasSortKey {
    #[default]
    Cost,
    Speed,
}

/// A chain's transfer cost alongside its share of the most expensive chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasRanking {
    #[serde(flatten)]
    pub fee: GasFee,
    /// Percentage of the highest transfer cost, capped at 100
    pub cost_bar: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasComparison {
    pub sort_by: GasSortKey,
    pub chains: Vec<GasRanking>,
    pub cheapest: Option<GasRanking>,
}

pub fn cost_bar(cost: f64, max_cost: f64) -> f64 {
    if max_cost == 0.0 {
        return 0.0;
    }
    (cost / max_cost * 100.0).min(100.0)
}

/// Order chains by transfer cost or confirmation speed. Stable, so equal
/// entries keep their input order. The first entry after sorting is reported
/// as `cheapest`.
pub fn rank_gas_fees(fees: &[GasFee], sort_by: GasSortKey) -> GasComparison {
    let max_cost = fees
        .iter()
        .map(|fee| fee.transfer_cost_usd)
        .fold(0.0_f64, f64::max);

    let mut sorted = fees.to_vec();
    match sort_by {
        GasSortKey::Cost => {
            sorted.sort_by(|a, b| a.transfer_cost_usd.total_cmp(&b.transfer_cost_usd))
        }
        GasSortKey::Speed => sorted.sort_by_key(|fee| fee.speed.rank()),
    }

    let chains: Vec<GasRanking> = sorted
        .into_iter()
        .map(|fee| GasRanking {
            cost_bar: cost_bar(fee.transfer_cost_usd, max_cost),
            fee,
        })
        .collect();

    GasComparison {
        sort_by,
        cheapest: chains.first().cloned(),
        chains,
    }
}
