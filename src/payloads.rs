use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::{FN_ADD_LIQUIDITY, FN_COLLECT, FN_CREATE_POOL, FN_REMOVE_LIQUIDITY, FN_SWAP};
use crate::converters::TickRange;
use crate::error::{BelugaError, Result};

/// Wide integers go over the wire as decimal strings.
pub(crate) fn as_decimal_string<S: Serializer>(value: &u128, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Protocol-unit arguments of a contract call, keyed by argument name.
///
/// Only integers and stringified wide integers, never human units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContractParams(Map<String, Value>);

impl ContractParams {
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self> {
        match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(BelugaError::InvalidArgument(format!(
                "contract params must be an object, got {other}"
            ))),
            Err(e) => Err(BelugaError::InvalidArgument(format!(
                "failed to encode contract params: {e}"
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// A built payload ready for `submit`.
pub trait ContractCall {
    /// Contract function the payload is meant for
    fn function(&self) -> &'static str;

    fn contract_params(&self) -> Result<ContractParams>;
}

// CREATE POOL

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePoolArgs {
    pub token_a: String,
    pub token_b: String,
    pub fee_bps: u32,
    pub creator_fee_bps: u32,
    #[serde(serialize_with = "as_decimal_string")]
    pub initial_sqrt_price_x64: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount0_desired: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount1_desired: u128,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub lock_duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePoolPayload {
    pub creator: String,
    pub params: CreatePoolArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePoolSummary {
    pub pair: String,
    pub fee: String,
    pub creator_fee: String,
    pub initial_price: Decimal,
    pub price_range: String,
    pub amounts: String,
    pub lock_duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePoolTechnical {
    pub fee_bps: u32,
    pub creator_fee_bps: u32,
    #[serde(serialize_with = "as_decimal_string")]
    pub sqrt_price_x64: u128,
    pub current_tick: i32,
    pub tick_spacing: i32,
    pub lower_tick: i32,
    pub upper_tick: i32,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount0_stroops: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount1_stroops: u128,
    pub lock_duration_ledgers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePoolResult {
    pub summary: CreatePoolSummary,
    pub contract_params: CreatePoolPayload,
    pub technical: CreatePoolTechnical,
}

impl ContractCall for CreatePoolResult {
    fn function(&self) -> &'static str {
        FN_CREATE_POOL
    }

    fn contract_params(&self) -> Result<ContractParams> {
        ContractParams::from_payload(&self.contract_params)
    }
}

// LIQUIDITY

/// Owner plus the aligned tick bounds of a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionPayload {
    pub owner: String,
    pub lower_tick: i32,
    pub upper_tick: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddLiquidityPayload {
    pub owner: String,
    pub lower_tick: i32,
    pub upper_tick: i32,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount0_desired: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount1_desired: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddLiquiditySummary {
    pub price_range: String,
    pub amounts: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddLiquidityTechnical {
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub tick_spacing: i32,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount0_stroops: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount1_stroops: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddLiquidityResult {
    pub summary: AddLiquiditySummary,
    pub contract_params: AddLiquidityPayload,
    pub technical: AddLiquidityTechnical,
}

impl ContractCall for AddLiquidityResult {
    fn function(&self) -> &'static str {
        FN_ADD_LIQUIDITY
    }

    fn contract_params(&self) -> Result<ContractParams> {
        ContractParams::from_payload(&self.contract_params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveLiquiditySummary {
    pub removing: String,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveLiquidityTechnical {
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub percent_to_remove: Decimal,
    pub percent_to_remove_bps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveLiquidityResult {
    pub summary: RemoveLiquiditySummary,
    pub contract_params: PositionPayload,
    pub technical: RemoveLiquidityTechnical,
}

impl ContractCall for RemoveLiquidityResult {
    fn function(&self) -> &'static str {
        FN_REMOVE_LIQUIDITY
    }

    fn contract_params(&self) -> Result<ContractParams> {
        ContractParams::from_payload(&self.contract_params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectFeesResult {
    pub contract_params: PositionPayload,
    pub technical: TickRange,
}

impl ContractCall for CollectFeesResult {
    fn function(&self) -> &'static str {
        FN_COLLECT
    }

    fn contract_params(&self) -> Result<ContractParams> {
        ContractParams::from_payload(&self.contract_params)
    }
}

// SWAP

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapPayload {
    pub sender: String,
    pub token_in: String,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount_in: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub amount_out_min: u128,
    /// 0 means no limit
    #[serde(serialize_with = "as_decimal_string")]
    pub sqrt_price_limit_x64: u128,
}

/// Authoritative output estimate returned by the pool contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapQuote {
    #[serde(serialize_with = "as_decimal_string")]
    pub amount_out: u128,
    pub price_impact_bps: u32,
    #[serde(serialize_with = "as_decimal_string")]
    pub sqrt_price_after_x64: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapSummary {
    pub swapping: String,
    pub estimated_output: String,
    pub minimum_output: String,
    pub slippage: String,
    pub price_limit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapTechnical {
    #[serde(serialize_with = "as_decimal_string")]
    pub amount_in_stroops: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub estimated_out_stroops: u128,
    #[serde(serialize_with = "as_decimal_string")]
    pub min_amount_out_stroops: u128,
    pub slippage_bps: u32,
    #[serde(serialize_with = "as_decimal_string")]
    pub sqrt_price_limit_x64: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapResult {
    pub summary: SwapSummary,
    pub contract_params: SwapPayload,
    pub technical: SwapTechnical,
}

impl ContractCall for SwapResult {
    fn function(&self) -> &'static str {
        FN_SWAP
    }

    fn contract_params(&self) -> Result<ContractParams> {
        ContractParams::from_payload(&self.contract_params)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSwapResult {
    pub amount_out: Decimal,
    pub price_impact_percent: Decimal,
    pub new_price: f64,
    pub quote: SwapQuote,
}

// READS

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionFormatted {
    pub liquidity: String,
    pub amounts: String,
    pub fees: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionInfo {
    #[serde(serialize_with = "as_decimal_string")]
    pub liquidity: u128,
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub fees_owed0: Decimal,
    pub fees_owed1: Decimal,
    pub formatted: PositionFormatted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStateTechnical {
    #[serde(serialize_with = "as_decimal_string")]
    pub sqrt_price_x64: u128,
    pub current_tick: i32,
    #[serde(serialize_with = "as_decimal_string")]
    pub liquidity: u128,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolState {
    pub current_price: f64,
    pub current_tick: i32,
    #[serde(serialize_with = "as_decimal_string")]
    pub liquidity: u128,
    pub technical: PoolStateTechnical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_integers_are_strings() {
        let payload = AddLiquidityPayload {
            owner: "GOWNER".to_string(),
            lower_tick: -540,
            upper_tick: 480,
            amount0_desired: 1_000_000_000,
            amount1_desired: u128::MAX,
        };
        let params = ContractParams::from_payload(&payload).unwrap();

        assert_eq!(params.get("lower_tick"), Some(&Value::from(-540)));
        assert_eq!(params.get("amount0_desired"), Some(&Value::from("1000000000")));
        assert_eq!(
            params.get("amount1_desired"),
            Some(&Value::from("340282366920938463463374607431768211455"))
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(ContractParams::from_payload(&42u32).is_err());
    }
}
