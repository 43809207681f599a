//! Protocol bound checks shared by the factory and pool builders.
//!
//! Every check runs on already-converted protocol units and fails before any
//! payload is assembled.

use rust_decimal::Decimal;

use crate::constants::{
    MAX_CREATOR_FEE_BPS, MAX_SLIPPAGE_BPS, MAX_TICK, MIN_CREATOR_FEE_BPS, MIN_INITIAL_LIQUIDITY,
    MIN_LOCK_DURATION_LEDGERS, MIN_TICK,
};
use crate::converters::{TickRange, days_to_ledgers};
use crate::error::{BelugaError, Result};
use crate::params::LockDuration;

pub fn validate_creator_fee(creator_fee_bps: u32) -> Result<()> {
    if creator_fee_bps < MIN_CREATOR_FEE_BPS {
        return Err(BelugaError::below_minimum(
            "creator fee bps",
            creator_fee_bps,
            MIN_CREATOR_FEE_BPS,
        ));
    }
    if creator_fee_bps > MAX_CREATOR_FEE_BPS {
        return Err(BelugaError::out_of_range(
            "creator fee bps",
            creator_fee_bps,
            MIN_CREATOR_FEE_BPS,
            MAX_CREATOR_FEE_BPS,
        ));
    }
    Ok(())
}

pub fn validate_initial_liquidity(amount0: u128, amount1: u128) -> Result<()> {
    for (what, amount) in [("amount0", amount0), ("amount1", amount1)] {
        if amount < MIN_INITIAL_LIQUIDITY {
            return Err(BelugaError::below_minimum(what, amount, MIN_INITIAL_LIQUIDITY));
        }
    }
    Ok(())
}

pub fn validate_tick(tick: i32) -> Result<()> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(BelugaError::out_of_range("tick", tick, MIN_TICK, MAX_TICK));
    }
    Ok(())
}

/// Both ticks inside the protocol bounds and lower strictly below upper.
pub fn validate_tick_range(range: &TickRange) -> Result<()> {
    validate_tick(range.lower_tick)?;
    validate_tick(range.upper_tick)?;

    if range.lower_tick >= range.upper_tick {
        return Err(BelugaError::InvalidRange {
            lower: range.lower_tick,
            upper: range.upper_tick,
        });
    }
    Ok(())
}

/// Ledger count submitted as `lock_duration`. Permanent locks are encoded as 0,
/// an unset duration defaults to the protocol minimum.
pub fn resolve_lock_duration(lock: Option<LockDuration>) -> Result<u32> {
    match lock {
        None => Ok(MIN_LOCK_DURATION_LEDGERS),
        Some(LockDuration::Permanent) => Ok(0),
        Some(LockDuration::Days(days)) => {
            let ledgers = days_to_ledgers(days)?;
            if ledgers < MIN_LOCK_DURATION_LEDGERS {
                return Err(BelugaError::below_minimum(
                    "lock duration ledgers",
                    ledgers,
                    MIN_LOCK_DURATION_LEDGERS,
                ));
            }
            Ok(ledgers)
        }
    }
}

pub fn validate_slippage(slippage_bps: u32) -> Result<()> {
    if slippage_bps > MAX_SLIPPAGE_BPS {
        return Err(BelugaError::out_of_range(
            "slippage bps",
            slippage_bps,
            0,
            MAX_SLIPPAGE_BPS,
        ));
    }
    Ok(())
}

/// Share of a position to withdraw, in the half-open interval (0, 100].
pub fn validate_removal_percent(percent: Decimal) -> Result<()> {
    if percent <= Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(BelugaError::out_of_range("liquidity percent", percent, "0 (exclusive)", 100));
    }
    Ok(())
}

pub fn validate_swap_amount(amount_in: u128) -> Result<()> {
    if amount_in == 0 {
        return Err(BelugaError::below_minimum("amount in", amount_in, 1));
    }
    Ok(())
}
