use std::{fmt, sync::Arc};

use serde_json::Value;

use crate::{
    config::NetworkConfig,
    constants::{FN_GET_TOTAL_POOLS, MIN_LOCK_DURATION_LEDGERS},
    converters::{
        amount_to_smallest_unit, ledgers_to_days, percent_to_bps, price_range_to_ticks,
        price_to_sqrt_x64, price_to_tick,
    },
    error::Result,
    ledger::{LedgerClient, reply_u64},
    params::{CreatePoolParams, GetPoolParams, LockDuration},
    payloads::{
        ContractCall, ContractParams, CreatePoolArgs, CreatePoolPayload, CreatePoolResult,
        CreatePoolSummary, CreatePoolTechnical,
    },
    utils::{format_pair, format_range},
    validation::{
        resolve_lock_duration, validate_creator_fee, validate_initial_liquidity,
        validate_tick_range,
    },
};

/// Builds pool-creation payloads for the BelugaSwap factory contract and
/// answers factory lookups through the ledger collaborator.
#[derive(Clone)]
pub struct FactoryBuilder {
    contract_id: String,
    ledger: Arc<dyn LedgerClient>,
    network: Arc<NetworkConfig>,
}

impl fmt::Debug for FactoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryBuilder")
            .field("contract_id", &self.contract_id)
            .field("rpc_url", &self.network.rpc_url)
            .finish_non_exhaustive()
    }
}

impl FactoryBuilder {
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

    /// Create a new pool with human-friendly inputs
    ///
    /// # Arguments
    /// * `params` - Tokens, fee tier, creator fee (%), initial price, amounts, price range and lock
    ///
    /// # Returns
    /// Returns a `CreatePoolResult` whose `contract_params` only hold protocol units.
    /// Building twice from the same params yields identical output.
    pub fn create_pool(&self, params: &CreatePoolParams) -> Result<CreatePoolResult> {
        let fee_tier = params.fee_tier.tier();

        let creator_fee_bps = percent_to_bps(params.creator_fee_percent)?;
        validate_creator_fee(creator_fee_bps)?;

        let initial_sqrt_price = price_to_sqrt_x64(params.initial_price)?;
        let current_tick = price_to_tick(params.initial_price)?;

        let amount0_stroops = amount_to_smallest_unit(params.amount0)?;
        let amount1_stroops = amount_to_smallest_unit(params.amount1)?;
        validate_initial_liquidity(amount0_stroops, amount1_stroops)?;

        let range = price_range_to_ticks(
            params.price_range_lower,
            params.price_range_upper,
            fee_tier.tick_spacing,
        )?;
        validate_tick_range(&range)?;

        let lock_duration = resolve_lock_duration(params.lock)?;

        log::debug!(
            "create_pool {}/{} fee={}bps creator_fee={}bps sqrt_price={} ticks=[{}, {}] lock={}",
            params.token_a,
            params.token_b,
            fee_tier.bps,
            creator_fee_bps,
            initial_sqrt_price,
            range.lower_tick,
            range.upper_tick,
            lock_duration
        );

        let lock_summary = match params.lock {
            Some(LockDuration::Permanent) => "Permanent".to_string(),
            Some(LockDuration::Days(days)) => format!("{days} days"),
            None => format!("{} days", ledgers_to_days(MIN_LOCK_DURATION_LEDGERS)),
        };

        Ok(CreatePoolResult {
            summary: CreatePoolSummary {
                pair: format!("{}/{}", params.token_a, params.token_b),
                fee: format!("{}%", fee_tier.display_percent),
                creator_fee: format!("{}%", params.creator_fee_percent),
                initial_price: params.initial_price,
                price_range: format_range(params.price_range_lower, params.price_range_upper),
                amounts: format_pair(params.amount0, params.amount1),
                lock_duration: lock_summary,
            },
            contract_params: CreatePoolPayload {
                creator: params.creator.clone(),
                params: CreatePoolArgs {
                    token_a: params.token_a.clone(),
                    token_b: params.token_b.clone(),
                    fee_bps: fee_tier.bps,
                    creator_fee_bps,
                    initial_sqrt_price_x64: initial_sqrt_price,
                    amount0_desired: amount0_stroops,
                    amount1_desired: amount1_stroops,
                    lower_tick: range.lower_tick,
                    upper_tick: range.upper_tick,
                    lock_duration,
                },
            },
            technical: CreatePoolTechnical {
                fee_bps: fee_tier.bps,
                creator_fee_bps,
                sqrt_price_x64: initial_sqrt_price,
                current_tick,
                tick_spacing: fee_tier.tick_spacing,
                lower_tick: range.lower_tick,
                upper_tick: range.upper_tick,
                amount0_stroops,
                amount1_stroops,
                lock_duration_ledgers: lock_duration,
            },
        })
    }

    /// Get the pool address for a token pair and fee tier, `None` when no pool exists
    pub async fn get_pool(&self, params: &GetPoolParams) -> Result<Option<String>> {
        let fee_bps = params.fee_tier.tier().bps;
        log::debug!(
            "resolving pool {}/{} ({}bps) via factory {} on {}",
            params.token_a,
            params.token_b,
            fee_bps,
            self.contract_id,
            self.network.network_passphrase
        );

        self.ledger
            .resolve_pool_address(&self.contract_id, &params.token_a, &params.token_b, fee_bps)
            .await
            .inspect_err(|e| log::warn!("Failed to resolve pool address: {}", e))
    }

    pub async fn pool_exists(&self, params: &GetPoolParams) -> Result<bool> {
        Ok(self.get_pool(params).await?.is_some())
    }

    /// Get the number of pools deployed by the factory
    pub async fn get_total_pools(&self) -> Result<u64> {
        let reply = self
            .ledger
            .query(&self.contract_id, FN_GET_TOTAL_POOLS, &ContractParams::default())
            .await
            .inspect_err(|e| log::warn!("Failed to query total pools: {}", e))?;

        reply_u64(&reply, FN_GET_TOTAL_POOLS)
    }

    /// Forward a built payload (normally a `CreatePoolResult`) to the factory contract
    pub async fn submit(&self, call: &(impl ContractCall + Sync)) -> Result<Value> {
        let params = call.contract_params()?;
        log::info!("submitting {} to factory {}", call.function(), self.contract_id);

        self.ledger
            .submit(&self.contract_id, call.function(), &params)
            .await
            .inspect_err(|e| log::warn!("Failed to submit {}: {}", call.function(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{FeeTierId, Network},
        error::BelugaError,
        ledger::OfflineLedger,
    };
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn factory() -> FactoryBuilder {
        FactoryBuilder::new(
            "CFACTORY",
            Arc::new(OfflineLedger),
            Arc::new(Network::Testnet.config()),
        )
    }

    fn usdc_xlm() -> CreatePoolParams {
        CreatePoolParams {
            creator: "GCREATOR".to_string(),
            token_a: "CUSDC".to_string(),
            token_b: "CXLM".to_string(),
            fee_tier: FeeTierId::Volatile,
            creator_fee_percent: dec!(1),
            initial_price: dec!(1.0),
            amount0: dec!(100),
            amount1: dec!(100),
            price_range_lower: dec!(0.95),
            price_range_upper: dec!(1.05),
            lock: Some(LockDuration::Days(dec!(7))),
        }
    }

    #[test]
    fn test_create_pool_payload() {
        let result = factory().create_pool(&usdc_xlm()).unwrap();
        let args = &result.contract_params.params;

        assert_eq!(result.contract_params.creator, "GCREATOR");
        assert_eq!(args.fee_bps, 30);
        assert_eq!(args.creator_fee_bps, 100);
        assert_eq!(args.initial_sqrt_price_x64, 1u128 << 64);
        assert_eq!(args.amount0_desired, 1_000_000_000);
        assert_eq!(args.amount1_desired, 1_000_000_000);
        assert_eq!((args.lower_tick, args.upper_tick), (-540, 480));
        assert_eq!(args.lock_duration, 120_960);
        assert_eq!(result.technical.current_tick, 0);
        assert_eq!(result.technical.tick_spacing, 60);
    }

    #[test]
    fn test_create_pool_summary() {
        let result = factory().create_pool(&usdc_xlm()).unwrap();
        assert_eq!(result.summary.pair, "CUSDC/CXLM");
        assert_eq!(result.summary.fee, "0.30%");
        assert_eq!(result.summary.creator_fee, "1%");
        assert_eq!(result.summary.price_range, "0.95 - 1.05");
        assert_eq!(result.summary.amounts, "100 + 100");
        assert_eq!(result.summary.lock_duration, "7 days");
    }

    #[test]
    fn test_lock_variants() {
        let mut params = usdc_xlm();
        params.lock = Some(LockDuration::Permanent);
        let permanent = factory().create_pool(&params).unwrap();
        assert_eq!(permanent.contract_params.params.lock_duration, 0);
        assert_eq!(permanent.summary.lock_duration, "Permanent");

        params.lock = None;
        let default = factory().create_pool(&params).unwrap();
        assert_eq!(default.contract_params.params.lock_duration, MIN_LOCK_DURATION_LEDGERS);
        assert_eq!(default.summary.lock_duration, "7 days");

        params.lock = Some(LockDuration::Days(dec!(6)));
        assert_matches!(factory().create_pool(&params), Err(BelugaError::BelowMinimum { .. }));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut params = usdc_xlm();
        params.price_range_lower = dec!(1.05);
        params.price_range_upper = dec!(0.95);
        assert_matches!(factory().create_pool(&params), Err(BelugaError::InvalidRange { .. }));
    }

    #[test]
    fn test_range_collapsing_to_one_tick_is_rejected() {
        let mut params = usdc_xlm();
        params.fee_tier = FeeTierId::Exotic;
        params.price_range_lower = dec!(1.001);
        params.price_range_upper = dec!(1.002);
        assert_matches!(
            factory().create_pool(&params),
            Err(BelugaError::InvalidRange { lower: 0, upper: 0 })
        );
    }

    #[test]
    fn test_contract_params_are_protocol_units() {
        let params = factory().create_pool(&usdc_xlm()).unwrap().contract_params().unwrap();
        let nested = params.get("params").unwrap();
        assert_eq!(nested["initial_sqrt_price_x64"], "18446744073709551616");
        assert_eq!(nested["amount0_desired"], "1000000000");
        assert_eq!(nested["lower_tick"], -540);
    }

    #[tokio::test]
    async fn test_lookups_need_a_ledger() {
        let lookup = GetPoolParams {
            token_a: "CUSDC".to_string(),
            token_b: "CXLM".to_string(),
            fee_tier: FeeTierId::Volatile,
        };
        assert_matches!(factory().get_pool(&lookup).await, Err(BelugaError::Unimplemented(_)));
        assert_matches!(factory().pool_exists(&lookup).await, Err(BelugaError::Unimplemented(_)));
        assert_matches!(factory().get_total_pools().await, Err(BelugaError::Unimplemented(_)));
    }
}
