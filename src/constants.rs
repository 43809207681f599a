use lazy_static::lazy_static;
use num_bigint::BigUint;

// UNITS

/// Decimals of every Soroban token amount (stroops).
pub const TOKEN_DECIMALS: u32 = 7;
pub const SMALLEST_UNITS_PER_TOKEN: u128 = 10_000_000;

/// 1 day ≈ 17,280 ledgers (5s per ledger)
pub const LEDGERS_PER_DAY: u32 = 17_280;

pub const BPS_PER_PERCENT: u32 = 100;
pub const MAX_BPS: u32 = 10_000; // 100%

// Q64.64

pub const Q64_SHIFT: u32 = 64;
pub const Q64: u128 = 1u128 << Q64_SHIFT; // 18446744073709551616

// TICKS

pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = 887_272;
pub const TICK_BASE: f64 = 1.0001;

// PROTOCOL LIMITS
// bound to the deployed contract version, changing any of these breaks compatibility

pub const MIN_LOCK_DURATION_LEDGERS: u32 = 120_960; // ~7 days
pub const MIN_INITIAL_LIQUIDITY: u128 = 1_000_000; // 0.1 tokens
pub const MIN_CREATOR_FEE_BPS: u32 = 10; // 0.1%
pub const MAX_CREATOR_FEE_BPS: u32 = 1_000; // 10%
pub const MAX_SLIPPAGE_BPS: u32 = 5_000; // 50%

// NETWORKS

pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const MAINNET_RPC_URL: &str = "https://soroban-mainnet.stellar.org";
pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

// CONTRACT FUNCTIONS

pub const FN_CREATE_POOL: &str = "create_pool";
pub const FN_GET_TOTAL_POOLS: &str = "get_total_pools";
pub const FN_ADD_LIQUIDITY: &str = "add_liquidity";
pub const FN_REMOVE_LIQUIDITY: &str = "remove_liquidity";
pub const FN_COLLECT: &str = "collect";
pub const FN_SWAP: &str = "swap";
pub const FN_PREVIEW_SWAP: &str = "preview_swap";
pub const FN_GET_POSITION: &str = "get_position";
pub const FN_GET_POOL_STATE: &str = "get_pool_state";

lazy_static! {
    /// 2^128, the scale applied to a price before taking its integer square root.
    pub static ref Q128_BIG: BigUint = BigUint::from(1u8) << (2 * Q64_SHIFT);
    pub static ref LN_TICK_BASE: f64 = TICK_BASE.ln();
}
