use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Final comparison record for one (pair, strategy) run.
///
/// The serialized field names are a stable contract; downstream
/// aggregation and reporting key on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub pair: String,
    pub strategy_id: String,
    pub uniswap_final_value: Decimal,
    pub pennysia_final_value: Decimal,
    pub advantage_percent: Decimal,
    pub token_a_price_change_percent: Decimal,
    pub token_b_price_change_percent: Decimal,
}
