//! # BelugaSwap SDK
//!
//! A client SDK for the BelugaSwap concentrated-liquidity AMM on Stellar/Soroban. The SDK turns
//! human-friendly inputs (decimal prices, token amounts, percents, days) into the exact integer
//! payloads the factory and pool contracts expect. It provides two groups of functions:
//!
//! 1. **Builders**: pure, synchronous functions returning a `*Result` value with a readable
//!    `summary`, the `contract_params` to send and a `technical` breakdown
//! 2. **Ledger Functions**: async lookups, quotes and submissions that go through a
//!    [`LedgerClient`]
//!
//! Builders never touch the network and building twice from the same params yields identical
//! output.
//!
//! ## 🚀 Quick Start
//!
//! ### Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! beluga-sdk = "0.1.0"
//! ```
//!
//! ### Basic Setup
//!
//! ```rust
//! use beluga_sdk::{BelugaSdkConfig, BelugaSwapSdk, Network};
//!
//! # fn main() -> beluga_sdk::Result<()> {
//! let sdk = BelugaSwapSdk::new(
//!     BelugaSdkConfig::new("CFACTORY...").with_network(Network::Testnet),
//! )?;
//! assert_eq!(sdk.rpc_url(), "https://soroban-testnet.stellar.org");
//! # Ok(())
//! # }
//! ```
//!
//! Configuration can also be read from the environment with [`BelugaSdkConfig::from_env`]
//! (`BELUGA_FACTORY_ADDRESS`, `BELUGA_POOL_ADDRESS`, `BELUGA_NETWORK`, `BELUGA_RPC_URL`,
//! `BELUGA_NETWORK_PASSPHRASE`). A predefined network and a custom endpoint are mutually
//! exclusive.
//!
//! ## 📖 Usage Patterns
//!
//! ### 1. Creating a Pool
//!
//! ```rust
//! use beluga_sdk::{
//!     BelugaSdkConfig, BelugaSwapSdk, CreatePoolParams, FeeTierId, LockDuration, Network,
//! };
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> beluga_sdk::Result<()> {
//! # let sdk = BelugaSwapSdk::new(BelugaSdkConfig::new("CFACTORY").with_network(Network::Testnet))?;
//! let result = sdk.factory().create_pool(&CreatePoolParams {
//!     creator: "GCREATOR...".to_string(),
//!     token_a: "CUSDC...".to_string(),
//!     token_b: "CXLM...".to_string(),
//!     fee_tier: FeeTierId::Volatile, // 0.30%, tick spacing 60
//!     creator_fee_percent: dec!(1),  // 1% of LP fees
//!     initial_price: dec!(1.0),
//!     amount0: dec!(100),
//!     amount1: dec!(100),
//!     price_range_lower: dec!(0.95),
//!     price_range_upper: dec!(1.05),
//!     lock: Some(LockDuration::Days(dec!(7))),
//! })?;
//!
//! assert_eq!(result.contract_params.params.lower_tick, -540);
//! assert_eq!(result.contract_params.params.upper_tick, 480);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Swapping
//!
//! A swap needs a quote to derive `amount_out_min`. [`PoolBuilder::swap`] asks the pool
//! contract for one; [`PoolBuilder::build_swap`] accepts a quote you already hold.
//!
//! ```rust,no_run
//! use beluga_sdk::{BelugaSdkConfig, BelugaSwapSdk, Network, SwapParams};
//! use rust_decimal_macros::dec;
//!
//! # async fn run(ledger: std::sync::Arc<dyn beluga_sdk::LedgerClient>) -> beluga_sdk::Result<()> {
//! let mut sdk = BelugaSwapSdk::with_ledger(
//!     BelugaSdkConfig::new("CFACTORY...").with_network(Network::Testnet),
//!     ledger,
//! )?;
//! let pool = sdk.connect_pool("CPOOL...");
//!
//! let swap = pool
//!     .swap(&SwapParams {
//!         sender: "GTRADER...".to_string(),
//!         token_in: "CUSDC...".to_string(),
//!         amount_in: dec!(10),
//!         slippage_percent: dec!(0.5),
//!         price_limit: None,
//!     })
//!     .await?;
//! pool.submit(&swap).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Liquidity
//!
//! - **`add_liquidity`**: token amounts into a price range of the pool's fee tier
//! - **`remove_liquidity`**: a percent (0, 100] of a position
//! - **`collect_fees`**: accrued fees of a position
//!
//! ## 🧮 Units
//!
//! - Tokens have 7 decimals: 1 token = 10,000,000 stroops
//! - Prices are sent as `floor(sqrt(price) * 2^64)` and ticks as `floor(log_1.0001(price))`,
//!   aligned down to the tier's tick spacing
//! - Percents become basis points, days become ledgers (17,280 per day)
//! - Every conversion floors; nothing is rounded up
//!
//! ## ⚠️ Protocol Limits
//!
//! | Limit                 | Value                          |
//! |-----------------------|--------------------------------|
//! | Creator fee           | 0.1% to 10% of LP fees         |
//! | Initial liquidity     | at least 0.1 token per side    |
//! | Lock duration         | permanent or at least 7 days   |
//! | Slippage              | at most 50%                    |
//!
//! ## 🌐 Ledger Integration
//!
//! The SDK does not encode, sign or send transactions itself. Implement [`LedgerClient`] and
//! pass it to [`BelugaSwapSdk::with_ledger`]. Without one, every ledger function fails with
//! [`BelugaError::Unimplemented`] and no value is ever fabricated.
//!
//! ## 📄 License
//!
//! MIT License - see LICENSE file for details.

mod config;
pub mod constants;
pub mod converters;
mod error;
mod factory;
mod ledger;
mod params;
mod payloads; // Private module - users should use re-exported types
mod pool;
mod sdk;
mod utils;
pub mod validation;

pub use sdk::BelugaSwapSdk;

pub use config::{BelugaSdkConfig, FEE_TIERS, FeeTier, FeeTierId, Network, NetworkConfig};
pub use error::{BelugaError, Result};
pub use factory::FactoryBuilder;
pub use ledger::{LedgerClient, OfflineLedger};
pub use pool::PoolBuilder;

pub use converters::TickRange;

pub use params::{
    AddLiquidityParams, CollectFeesParams, CreatePoolParams, GetPoolParams, LockDuration,
    PositionParams, PreviewSwapParams, RemoveLiquidityParams, SwapParams,
};

pub use payloads::{
    AddLiquidityPayload, AddLiquidityResult, AddLiquiditySummary, AddLiquidityTechnical,
    CollectFeesResult, ContractCall, ContractParams, CreatePoolArgs, CreatePoolPayload,
    CreatePoolResult, CreatePoolSummary, CreatePoolTechnical, PoolState, PoolStateTechnical,
    PositionFormatted, PositionInfo, PositionPayload, PreviewSwapResult, RemoveLiquidityResult,
    RemoveLiquiditySummary, RemoveLiquidityTechnical, SwapPayload, SwapQuote, SwapResult,
    SwapSummary, SwapTechnical,
};
