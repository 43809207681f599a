// Builder inputs in human units: decimal prices, token amounts, percents and days

use rust_decimal::Decimal;

use crate::config::FeeTierId;

/// How long the creator's initial liquidity stays locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDuration {
    Permanent,
    Days(Decimal),
}

/// Pool creation parameters
#[derive(Debug, Clone)]
pub struct CreatePoolParams {
    pub creator: String,
    pub token_a: String,
    pub token_b: String,
    pub fee_tier: FeeTierId,
    pub creator_fee_percent: Decimal,
    pub initial_price: Decimal,
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub price_range_lower: Decimal,
    pub price_range_upper: Decimal,
    pub lock: Option<LockDuration>, // None locks for the protocol minimum
}

/// Pool lookup parameters
#[derive(Debug, Clone)]
pub struct GetPoolParams {
    pub token_a: String,
    pub token_b: String,
    pub fee_tier: FeeTierId,
}

/// Add liquidity parameters
#[derive(Debug, Clone)]
pub struct AddLiquidityParams {
    pub owner: String,
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub price_range_lower: Decimal,
    pub price_range_upper: Decimal,
    pub fee_tier: FeeTierId,
}

/// Remove liquidity parameters
#[derive(Debug, Clone)]
pub struct RemoveLiquidityParams {
    pub owner: String,
    pub liquidity_percent: Decimal, // (0, 100]
    pub price_range_lower: Decimal,
    pub price_range_upper: Decimal,
    pub fee_tier: FeeTierId,
}

/// Identifies a position by owner and price range
#[derive(Debug, Clone)]
pub struct PositionParams {
    pub owner: String,
    pub price_range_lower: Decimal,
    pub price_range_upper: Decimal,
    pub fee_tier: FeeTierId,
}

pub type CollectFeesParams = PositionParams;

/// Swap parameters
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub sender: String,
    pub token_in: String,
    pub amount_in: Decimal,
    pub slippage_percent: Decimal,
    pub price_limit: Option<Decimal>,
}

/// Preview swap parameters
#[derive(Debug, Clone)]
pub struct PreviewSwapParams {
    pub token_in: String,
    pub amount_in: Decimal,
}
