use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::{FeeTierId, NetworkConfig},
    constants::{FN_GET_POOL_STATE, FN_GET_POSITION, FN_PREVIEW_SWAP, MAX_BPS},
    converters::{
        TickRange, amount_to_smallest_unit, bps_to_percent, floor_div, format_amount,
        percent_to_bps, price_range_to_ticks, price_to_sqrt_x64, sqrt_x64_to_price,
    },
    error::{BelugaError, Result},
    ledger::{LedgerClient, field_amount, field_i32, field_u32, field_u128},
    params::{
        AddLiquidityParams, CollectFeesParams, PositionParams, PreviewSwapParams,
        RemoveLiquidityParams, SwapParams,
    },
    payloads::{
        AddLiquidityPayload, AddLiquidityResult, AddLiquiditySummary, AddLiquidityTechnical,
        CollectFeesResult, ContractCall, ContractParams, PoolState, PoolStateTechnical,
        PositionFormatted, PositionInfo, PositionPayload, PreviewSwapResult,
        RemoveLiquidityResult, RemoveLiquiditySummary, RemoveLiquidityTechnical, SwapPayload,
        SwapQuote, SwapResult, SwapSummary, SwapTechnical, as_decimal_string,
    },
    utils::{format_pair, format_range, group_thousands},
    validation::{
        validate_removal_percent, validate_slippage, validate_swap_amount, validate_tick_range,
    },
};

#[derive(Serialize)]
struct PreviewSwapArgs<'a> {
    token_in: &'a str,
    #[serde(serialize_with = "as_decimal_string")]
    amount_in: u128,
}

/// Swap inputs after conversion and validation, before a quote is known
struct PreparedSwap {
    amount_in: u128,
    slippage_bps: u32,
    sqrt_price_limit: u128,
}

/// Builds liquidity and swap payloads for one BelugaSwap pool contract.
///
/// Holds nothing but the pool address and the shared collaborator handles, so
/// every call is an independent request -> payload transformation. Reads
/// (`preview_swap`, `get_position`, `get_pool_state`) always go to the ledger.
#[derive(Clone)]
pub struct PoolBuilder {
    contract_id: String,
    ledger: Arc<dyn LedgerClient>,
    network: Arc<NetworkConfig>,
}

impl fmt::Debug for PoolBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("contract_id", &self.contract_id)
            .field("rpc_url", &self.network.rpc_url)
            .finish_non_exhaustive()
    }
}

impl PoolBuilder {
    pub fn new(
        contract_id: impl Into<String>,
        ledger: Arc<dyn LedgerClient>,
        network: Arc<NetworkConfig>,
    ) -> Self {
        Self {
            contract_id: contract_id.into(),
            ledger,
            network,
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn position_range(
        lower: Decimal,
        upper: Decimal,
        fee_tier: FeeTierId,
    ) -> Result<TickRange> {
        let range = price_range_to_ticks(lower, upper, fee_tier.tier().tick_spacing)?;
        validate_tick_range(&range)?;
        Ok(range)
    }

    // LIQUIDITY

    /// Add liquidity with human-friendly inputs
    ///
    /// # Arguments
    /// * `params` - Owner, token amounts, price range and the pool's fee tier
    ///
    /// # Returns
    /// Returns an `AddLiquidityResult` ready for `submit`
    pub fn add_liquidity(&self, params: &AddLiquidityParams) -> Result<AddLiquidityResult> {
        let tick_spacing = params.fee_tier.tier().tick_spacing;
        let range = Self::position_range(
            params.price_range_lower,
            params.price_range_upper,
            params.fee_tier,
        )?;

        let amount0_stroops = amount_to_smallest_unit(params.amount0)?;
        let amount1_stroops = amount_to_smallest_unit(params.amount1)?;

        log::debug!(
            "add_liquidity ticks=[{}, {}] amounts={}+{}",
            range.lower_tick,
            range.upper_tick,
            amount0_stroops,
            amount1_stroops
        );

        Ok(AddLiquidityResult {
            summary: AddLiquiditySummary {
                price_range: format!(
                    "{:.4} - {:.4}",
                    params.price_range_lower, params.price_range_upper
                ),
                amounts: format_pair(params.amount0, params.amount1),
            },
            contract_params: AddLiquidityPayload {
                owner: params.owner.clone(),
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
                amount0_desired: amount0_stroops,
                amount1_desired: amount1_stroops,
            },
            technical: AddLiquidityTechnical {
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
                tick_spacing,
                amount0_stroops,
                amount1_stroops,
            },
        })
    }

    /// Remove a share of a position
    ///
    /// The percent is validated and reported in `technical`; the payload itself
    /// only identifies the position.
    pub fn remove_liquidity(&self, params: &RemoveLiquidityParams) -> Result<RemoveLiquidityResult> {
        validate_removal_percent(params.liquidity_percent)?;
        let percent_bps = percent_to_bps(params.liquidity_percent)?;

        let range = Self::position_range(
            params.price_range_lower,
            params.price_range_upper,
            params.fee_tier,
        )?;

        log::debug!(
            "remove_liquidity ticks=[{}, {}] share={}bps",
            range.lower_tick,
            range.upper_tick,
            percent_bps
        );

        Ok(RemoveLiquidityResult {
            summary: RemoveLiquiditySummary {
                removing: format!("{}% of liquidity", params.liquidity_percent),
                price_range: format_range(params.price_range_lower, params.price_range_upper),
            },
            contract_params: PositionPayload {
                owner: params.owner.clone(),
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
            },
            technical: RemoveLiquidityTechnical {
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
                percent_to_remove: params.liquidity_percent,
                percent_to_remove_bps: percent_bps,
            },
        })
    }

    pub fn collect_fees(&self, params: &CollectFeesParams) -> Result<CollectFeesResult> {
        let range = Self::position_range(
            params.price_range_lower,
            params.price_range_upper,
            params.fee_tier,
        )?;

        Ok(CollectFeesResult {
            contract_params: PositionPayload {
                owner: params.owner.clone(),
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
            },
            technical: range,
        })
    }

    // SWAP

    fn prepare_swap(params: &SwapParams) -> Result<PreparedSwap> {
        let amount_in = amount_to_smallest_unit(params.amount_in)?;
        validate_swap_amount(amount_in)?;

        let slippage_bps = percent_to_bps(params.slippage_percent)?;
        validate_slippage(slippage_bps)?;

        let sqrt_price_limit = match params.price_limit {
            Some(limit) => price_to_sqrt_x64(limit)?,
            None => 0,
        };

        Ok(PreparedSwap {
            amount_in,
            slippage_bps,
            sqrt_price_limit,
        })
    }

    fn assemble_swap(
        params: &SwapParams,
        prepared: PreparedSwap,
        quote: &SwapQuote,
    ) -> Result<SwapResult> {
        let min_amount_out = floor_div(
            quote.amount_out,
            u128::from(MAX_BPS - prepared.slippage_bps),
            u128::from(MAX_BPS),
        )
        .ok_or_else(|| {
            BelugaError::out_of_range("quoted amount out", quote.amount_out, 0, u128::MAX / 10_000)
        })?;

        log::debug!(
            "swap amount_in={} quoted_out={} min_out={} slippage={}bps limit={}",
            prepared.amount_in,
            quote.amount_out,
            min_amount_out,
            prepared.slippage_bps,
            prepared.sqrt_price_limit
        );

        Ok(SwapResult {
            summary: SwapSummary {
                swapping: format!("{} {}", params.amount_in, params.token_in),
                estimated_output: format!("~{}", format_amount(quote.amount_out, 4)),
                minimum_output: format_amount(min_amount_out, 4),
                slippage: format!("{}%", params.slippage_percent),
                price_limit: params
                    .price_limit
                    .map_or_else(|| "None".to_string(), |limit| limit.to_string()),
            },
            contract_params: SwapPayload {
                sender: params.sender.clone(),
                token_in: params.token_in.clone(),
                amount_in: prepared.amount_in,
                amount_out_min: min_amount_out,
                sqrt_price_limit_x64: prepared.sqrt_price_limit,
            },
            technical: SwapTechnical {
                amount_in_stroops: prepared.amount_in,
                estimated_out_stroops: quote.amount_out,
                min_amount_out_stroops: min_amount_out,
                slippage_bps: prepared.slippage_bps,
                sqrt_price_limit_x64: prepared.sqrt_price_limit,
            },
        })
    }

    /// Build a swap payload from a quote the caller already holds
    ///
    /// `amount_out_min = floor(quote.amount_out * (10000 - slippage_bps) / 10000)`
    pub fn build_swap(&self, params: &SwapParams, quote: &SwapQuote) -> Result<SwapResult> {
        let prepared = Self::prepare_swap(params)?;
        Self::assemble_swap(params, prepared, quote)
    }

    /// Quote the swap on the ledger, then build the payload
    ///
    /// Inputs are validated before the remote call, so a bad slippage never
    /// reaches the ledger.
    pub async fn swap(&self, params: &SwapParams) -> Result<SwapResult> {
        let prepared = Self::prepare_swap(params)?;
        let (quote, _) = self.quote(&params.token_in, prepared.amount_in).await?;
        Self::assemble_swap(params, prepared, &quote)
    }

    /// Pool quote plus the quoted output in human units
    async fn quote(&self, token_in: &str, amount_in: u128) -> Result<(SwapQuote, Decimal)> {
        let args = ContractParams::from_payload(&PreviewSwapArgs {
            token_in,
            amount_in,
        })?;
        let reply = self.query(FN_PREVIEW_SWAP, &args).await?;

        // bounded by Decimal, so the min-out product below cannot overflow
        let (amount_out, amount_out_human) = field_amount(&reply, FN_PREVIEW_SWAP, "amount_out")?;
        let quote = SwapQuote {
            amount_out,
            price_impact_bps: field_u32(&reply, FN_PREVIEW_SWAP, "price_impact_bps")?,
            sqrt_price_after_x64: field_u128(&reply, FN_PREVIEW_SWAP, "sqrt_price_after_x64")?,
        };
        Ok((quote, amount_out_human))
    }

    // READS

    async fn query(&self, function: &str, params: &ContractParams) -> Result<Value> {
        self.ledger
            .query(&self.contract_id, function, params)
            .await
            .inspect_err(|e| log::warn!("Query {} on pool {} failed: {}", function, self.contract_id, e))
    }

    /// Preview swap output (read-only)
    pub async fn preview_swap(&self, params: &PreviewSwapParams) -> Result<PreviewSwapResult> {
        let amount_in = amount_to_smallest_unit(params.amount_in)?;
        validate_swap_amount(amount_in)?;

        let (quote, amount_out) = self.quote(&params.token_in, amount_in).await?;

        Ok(PreviewSwapResult {
            amount_out,
            price_impact_percent: bps_to_percent(quote.price_impact_bps),
            new_price: sqrt_x64_to_price(quote.sqrt_price_after_x64),
            quote,
        })
    }

    /// Get position info in human units
    pub async fn get_position(&self, params: &PositionParams) -> Result<PositionInfo> {
        let range = Self::position_range(
            params.price_range_lower,
            params.price_range_upper,
            params.fee_tier,
        )?;
        let args = ContractParams::from_payload(&PositionPayload {
            owner: params.owner.clone(),
            lower_tick: range.lower_tick,
            upper_tick: range.upper_tick,
        })?;

        let reply = self.query(FN_GET_POSITION, &args).await?;
        let liquidity = field_u128(&reply, FN_GET_POSITION, "liquidity")?;
        let (_, amount0) = field_amount(&reply, FN_GET_POSITION, "amount0")?;
        let (_, amount1) = field_amount(&reply, FN_GET_POSITION, "amount1")?;
        let (_, fees_owed0) = field_amount(&reply, FN_GET_POSITION, "fees_owed_0")?;
        let (_, fees_owed1) = field_amount(&reply, FN_GET_POSITION, "fees_owed_1")?;

        Ok(PositionInfo {
            liquidity,
            amount0,
            amount1,
            fees_owed0,
            fees_owed1,
            formatted: PositionFormatted {
                liquidity: group_thousands(liquidity),
                amounts: format_pair(amount0, amount1),
                fees: format_pair(fees_owed0, fees_owed1),
            },
        })
    }

    /// Get current pool state in human units
    pub async fn get_pool_state(&self) -> Result<PoolState> {
        let reply = self.query(FN_GET_POOL_STATE, &ContractParams::default()).await?;

        let sqrt_price_x64 = field_u128(&reply, FN_GET_POOL_STATE, "sqrt_price_x64")?;
        let current_tick = field_i32(&reply, FN_GET_POOL_STATE, "current_tick")?;
        let liquidity = field_u128(&reply, FN_GET_POOL_STATE, "liquidity")?;

        Ok(PoolState {
            current_price: sqrt_x64_to_price(sqrt_price_x64),
            current_tick,
            liquidity,
            technical: PoolStateTechnical {
                sqrt_price_x64,
                current_tick,
                liquidity,
            },
        })
    }

    /// Forward a built payload to this pool
    pub async fn submit(&self, call: &(impl ContractCall + Sync)) -> Result<Value> {
        let params = call.contract_params()?;
        log::info!("submitting {} to pool {}", call.function(), self.contract_id);

        self.ledger
            .submit(&self.contract_id, call.function(), &params)
            .await
            .inspect_err(|e| log::warn!("Failed to submit {}: {}", call.function(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Network, ledger::OfflineLedger};
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn pool() -> PoolBuilder {
        PoolBuilder::new("CPOOL", Arc::new(OfflineLedger), Arc::new(Network::Testnet.config()))
    }

    fn swap_params(slippage_percent: Decimal) -> SwapParams {
        SwapParams {
            sender: "GTRADER".to_string(),
            token_in: "CUSDC".to_string(),
            amount_in: dec!(10),
            slippage_percent,
            price_limit: Some(dec!(0.95)),
        }
    }

    fn quote(amount_out: u128) -> SwapQuote {
        SwapQuote {
            amount_out,
            price_impact_bps: 30,
            sqrt_price_after_x64: 1u128 << 64,
        }
    }

    #[test]
    fn test_add_liquidity() {
        let result = pool()
            .add_liquidity(&AddLiquidityParams {
                owner: "GOWNER".to_string(),
                amount0: dec!(50),
                amount1: dec!(25.5),
                price_range_lower: dec!(0.95),
                price_range_upper: dec!(1.05),
                fee_tier: FeeTierId::Volatile,
            })
            .unwrap();

        assert_eq!(result.contract_params.lower_tick, -540);
        assert_eq!(result.contract_params.upper_tick, 480);
        assert_eq!(result.contract_params.amount0_desired, 500_000_000);
        assert_eq!(result.contract_params.amount1_desired, 255_000_000);
        assert_eq!(result.summary.price_range, "0.9500 - 1.0500");
        assert_eq!(result.summary.amounts, "50 + 25.5");
    }

    #[test]
    fn test_remove_liquidity_percent_bounds() {
        let mut params = RemoveLiquidityParams {
            owner: "GOWNER".to_string(),
            liquidity_percent: dec!(50),
            price_range_lower: dec!(0.95),
            price_range_upper: dec!(1.05),
            fee_tier: FeeTierId::Stable,
        };
        let result = pool().remove_liquidity(&params).unwrap();
        assert_eq!(result.technical.percent_to_remove_bps, 5_000);
        assert_eq!(result.summary.removing, "50% of liquidity");
        assert_eq!(result.contract_params.lower_tick % 10, 0);

        params.liquidity_percent = dec!(0);
        assert_matches!(pool().remove_liquidity(&params), Err(BelugaError::OutOfRange { .. }));
        params.liquidity_percent = dec!(101);
        assert_matches!(pool().remove_liquidity(&params), Err(BelugaError::OutOfRange { .. }));
    }

    #[test]
    fn test_collect_fees() {
        let result = pool()
            .collect_fees(&CollectFeesParams {
                owner: "GOWNER".to_string(),
                price_range_lower: dec!(0.5),
                price_range_upper: dec!(2),
                fee_tier: FeeTierId::Exotic,
            })
            .unwrap();
        assert_eq!(result.technical.lower_tick % 200, 0);
        assert_eq!(result.technical.upper_tick % 200, 0);
        assert_eq!(result.contract_params.owner, "GOWNER");
    }

    #[test]
    fn test_build_swap_min_out() {
        let result = pool().build_swap(&swap_params(dec!(1)), &quote(99_700_000)).unwrap();

        assert_eq!(result.contract_params.amount_in, 100_000_000);
        // 99_700_000 * 9_900 / 10_000
        assert_eq!(result.contract_params.amount_out_min, 98_703_000);
        assert_eq!(result.technical.slippage_bps, 100);
        assert_eq!(
            result.contract_params.sqrt_price_limit_x64,
            price_to_sqrt_x64(dec!(0.95)).unwrap()
        );
        assert_eq!(result.summary.estimated_output, "~9.9700");
        assert_eq!(result.summary.minimum_output, "9.8703");
    }

    #[test]
    fn test_swap_without_price_limit() {
        let mut params = swap_params(dec!(0.5));
        params.price_limit = None;
        let result = pool().build_swap(&params, &quote(1_000)).unwrap();
        assert_eq!(result.contract_params.sqrt_price_limit_x64, 0);
        assert_eq!(result.contract_params.amount_out_min, 995);
        assert_eq!(result.summary.price_limit, "None");
    }

    #[test]
    fn test_swap_slippage_cap() {
        assert_matches!(
            pool().build_swap(&swap_params(dec!(60)), &quote(1_000)),
            Err(BelugaError::OutOfRange { what: "slippage bps", .. })
        );
    }

    #[tokio::test]
    async fn test_swap_validates_before_remote_call() {
        assert_matches!(
            pool().swap(&swap_params(dec!(60))).await,
            Err(BelugaError::OutOfRange { .. })
        );
        assert_matches!(
            pool().swap(&swap_params(dec!(1))).await,
            Err(BelugaError::Unimplemented("query"))
        );
    }

    #[tokio::test]
    async fn test_reads_are_never_fabricated() {
        assert_matches!(pool().get_pool_state().await, Err(BelugaError::Unimplemented(_)));
        assert_matches!(
            pool()
                .preview_swap(&PreviewSwapParams {
                    token_in: "CUSDC".to_string(),
                    amount_in: dec!(10),
                })
                .await,
            Err(BelugaError::Unimplemented(_))
        );
    }
}
