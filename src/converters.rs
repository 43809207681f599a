//! Human units ↔ protocol units.
//!
//! Every forward conversion floors. On-chain arithmetic must never receive
//! more value than the caller typed, so nothing here rounds up.
//!
//! Backward conversions are for display and are lossy: a price recovered from
//! a sqrt x64 value or from a tick is an approximation of the typed input.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::{
    BPS_PER_PERCENT, LEDGERS_PER_DAY, LN_TICK_BASE, Q64, Q128_BIG, SMALLEST_UNITS_PER_TOKEN,
    TICK_BASE, TOKEN_DECIMALS,
};
use crate::error::{BelugaError, Result};

/// Tick pair derived from a price range, each bound aligned independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickRange {
    pub lower_tick: i32,
    pub upper_tick: i32,
}

pub fn floor_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount.checked_mul(numerator)?.checked_div(denominator)
}

/// floor(value * multiplier) computed on the decimal's integer mantissa, so no
/// precision is lost before the truncation.
fn floor_scaled(what: &'static str, value: Decimal, multiplier: u128) -> Result<u128> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BelugaError::InvalidArgument(format!(
            "{what} must not be negative, got {value}"
        )));
    }

    let scale = 10u128.pow(value.scale());
    floor_div(value.mantissa().unsigned_abs(), multiplier, scale)
        .ok_or_else(|| BelugaError::out_of_range(what, value, 0, u128::MAX))
}

fn narrow_u32(what: &'static str, value: u128, source: Decimal) -> Result<u32> {
    u32::try_from(value).map_err(|_| BelugaError::out_of_range(what, source, 0, u32::MAX))
}

fn ensure_positive_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(BelugaError::InvalidArgument(format!(
            "price must be positive, got {price}"
        )));
    }
    Ok(())
}

// PRICE

/// floor(sqrt(price) * 2^64), computed exactly as isqrt(floor(price * 2^128)).
pub fn price_to_sqrt_x64(price: Decimal) -> Result<u128> {
    ensure_positive_price(price)?;

    let mantissa = BigUint::from(price.mantissa().unsigned_abs());
    let scale = BigUint::from(10u8).pow(price.scale());
    let scaled = mantissa * &*Q128_BIG / scale;

    scaled
        .sqrt()
        .to_u128()
        .ok_or_else(|| BelugaError::out_of_range("sqrt price", price, 0, u128::MAX))
}

/// (sqrt_x64 / 2^64)^2 as a float. Lossy, for display and estimates only.
pub fn sqrt_x64_to_price(sqrt_price_x64: u128) -> f64 {
    let sqrt_price = sqrt_price_x64 as f64 / Q64 as f64;
    sqrt_price * sqrt_price
}

pub fn format_price(sqrt_price_x64: u128, decimals: usize) -> String {
    format!("{:.*}", decimals, sqrt_x64_to_price(sqrt_price_x64))
}

// TICK

/// floor(ln(price) / ln(1.0001)), evaluated in `f64`.
///
/// A price sitting exactly on a grid point, such as `1.0001^2 = 1.00020001`, can
/// land one tick below the exact logarithm because of float rounding. Callers
/// that need an exact boundary should pass a price slightly above it.
pub fn price_to_tick(price: Decimal) -> Result<i32> {
    ensure_positive_price(price)?;

    let price = price
        .to_f64()
        .ok_or_else(|| BelugaError::InvalidArgument(format!("price {price} is not representable")))?;
    let tick = (price.ln() / *LN_TICK_BASE).floor();

    // any positive Decimal lands well inside i32
    tick.to_i32()
        .ok_or_else(|| BelugaError::InvalidArgument(format!("price {price} has no tick")))
}

/// 1.0001^tick. Quantization makes this an approximate inverse of [`price_to_tick`].
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// Largest multiple of `spacing` that is `<= tick`.
pub fn align_tick(tick: i32, spacing: i32) -> Result<i32> {
    if spacing <= 0 {
        return Err(BelugaError::InvalidArgument(format!(
            "tick spacing must be positive, got {spacing}"
        )));
    }
    Ok(tick.div_euclid(spacing) * spacing)
}

/// Converts and aligns both bounds independently. Ordering is not checked here.
pub fn price_range_to_ticks(lower: Decimal, upper: Decimal, spacing: i32) -> Result<TickRange> {
    Ok(TickRange {
        lower_tick: align_tick(price_to_tick(lower)?, spacing)?,
        upper_tick: align_tick(price_to_tick(upper)?, spacing)?,
    })
}

// AMOUNT

pub fn amount_to_smallest_unit(amount: Decimal) -> Result<u128> {
    floor_scaled("amount", amount, SMALLEST_UNITS_PER_TOKEN)
}

pub fn smallest_unit_to_amount(units: u128) -> Result<Decimal> {
    i128::try_from(units)
        .ok()
        .and_then(|units| Decimal::try_from_i128_with_scale(units, TOKEN_DECIMALS).ok())
        .map(|amount| amount.normalize())
        .ok_or_else(|| BelugaError::out_of_range("smallest units", units, 0, Decimal::MAX))
}

/// Exact rendering of a smallest-unit count, truncated (never rounded) to `decimals`.
pub fn format_amount(units: u128, decimals: usize) -> String {
    let whole = units / SMALLEST_UNITS_PER_TOKEN;
    let fraction = format!(
        "{:0width$}",
        units % SMALLEST_UNITS_PER_TOKEN,
        width = TOKEN_DECIMALS as usize
    );

    match decimals {
        0 => whole.to_string(),
        d if d <= fraction.len() => format!("{whole}.{}", &fraction[..d]),
        d => format!("{whole}.{fraction:0<d$}"),
    }
}

pub fn format_amount_with_symbol(units: u128, symbol: &str, decimals: usize) -> String {
    format!("{} {}", format_amount(units, decimals), symbol)
}

// FEES

pub fn percent_to_bps(percent: Decimal) -> Result<u32> {
    let bps = floor_scaled("percent", percent, u128::from(BPS_PER_PERCENT))?;
    narrow_u32("percent", bps, percent)
}

pub fn bps_to_percent(bps: u32) -> Decimal {
    Decimal::new(i64::from(bps), 2).normalize()
}

// TIME

pub fn days_to_ledgers(days: Decimal) -> Result<u32> {
    let ledgers = floor_scaled("lock duration", days, u128::from(LEDGERS_PER_DAY))?;
    narrow_u32("lock duration", ledgers, days)
}

pub fn ledgers_to_days(ledgers: u32) -> Decimal {
    (Decimal::from(ledgers) / Decimal::from(LEDGERS_PER_DAY)).normalize()
}
