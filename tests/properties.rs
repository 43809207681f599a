//! Property-based tests for the unit conversions.
//!
//! 1. **Sqrt price round trip**: price -> sqrt x64 -> price within 1e-9 relative.
//! 2. **Tick floor**: `1.0001^tick <= price < 1.0001^(tick + 1)`, up to float error.
//! 3. **Tick alignment**: aligned tick is a multiple of the spacing and the largest one `<= tick`.
//! 4. **Amount floor**: smallest units never exceed the typed amount and lose less than one unit.
//! 5. **Percent floor**: basis points never exceed the typed percent.

use beluga_sdk::{
    FEE_TIERS,
    constants::{MAX_TICK, MIN_TICK, SMALLEST_UNITS_PER_TOKEN},
    converters::{
        align_tick, amount_to_smallest_unit, floor_div, percent_to_bps, price_to_sqrt_x64,
        price_to_tick, smallest_unit_to_amount, sqrt_x64_to_price, tick_to_price,
    },
};
use proptest::prelude::*;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

// prices from 1e-18 up to 1e9
fn price() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000_000_000, 9u32..=18).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000_000, 0u32..=12).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn spacing() -> impl Strategy<Value = i32> {
    prop::sample::select(FEE_TIERS.iter().map(|tier| tier.tick_spacing).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn sqrt_price_round_trip(price in price()) {
        let sqrt = price_to_sqrt_x64(price).unwrap();
        let expected = price.to_f64().unwrap();
        let recovered = sqrt_x64_to_price(sqrt);

        prop_assert!(recovered <= expected * (1.0 + 1e-12));
        prop_assert!((expected - recovered).abs() / expected < 1e-9);
    }

    #[test]
    fn tick_brackets_price(price in price()) {
        let tick = price_to_tick(price).unwrap();
        let expected = price.to_f64().unwrap();

        prop_assert!(tick_to_price(tick) <= expected * (1.0 + 1e-9));
        prop_assert!(tick_to_price(tick + 1) > expected * (1.0 - 1e-9));
    }

    #[test]
    fn aligned_tick_is_largest_multiple_below(tick in MIN_TICK..=MAX_TICK, spacing in spacing()) {
        let aligned = align_tick(tick, spacing).unwrap();

        prop_assert_eq!(aligned % spacing, 0);
        prop_assert!(aligned <= tick);
        prop_assert!(tick - aligned < spacing);
    }

    #[test]
    fn amounts_floor_to_smallest_units(amount in amount()) {
        let units = amount_to_smallest_unit(amount).unwrap();
        let exact = amount * Decimal::from_u128(SMALLEST_UNITS_PER_TOKEN).unwrap();
        let floored = Decimal::from_u128(units).unwrap();

        prop_assert!(floored <= exact);
        prop_assert!(exact - floored < Decimal::ONE);
        prop_assert!(smallest_unit_to_amount(units).unwrap() <= amount);
    }

    #[test]
    fn percents_floor_to_bps(mantissa in 0i64..10_000_000, scale in 0u32..=6) {
        let percent = Decimal::new(mantissa, scale);
        let bps = percent_to_bps(percent).unwrap();

        prop_assert!(Decimal::from(bps) <= percent * Decimal::ONE_HUNDRED);
    }

    #[test]
    fn floor_div_never_rounds_up(amount in any::<u64>(), numerator in 0u128..=10_000, denominator in 1u128..=10_000) {
        let amount = u128::from(amount);
        let result = floor_div(amount, numerator, denominator).unwrap();

        prop_assert!(result * denominator <= amount * numerator);
        prop_assert!(amount * numerator - result * denominator < denominator);
    }
}
