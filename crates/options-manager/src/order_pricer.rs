//! Limit prices from model values.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::WheelError;

/// Tick used when the collaborator supplies none.
pub const DEFAULT_TICK: Decimal = dec!(0.01);

/// Finest tick accepted from a chain.
pub const MIN_TICK: Decimal = dec!(0.00000001);

/// Round to the nearest multiple of `tick`, halves away from zero.
///
/// A non-positive tick falls back to [`DEFAULT_TICK`].
///
/// # Errors
///
/// `InvalidTick` when the price has no representable position on the grid.
pub fn round_to_tick(price: Decimal, tick: Decimal) -> Result<Decimal, WheelError> {
    let tick = if tick > Decimal::ZERO { tick } else { DEFAULT_TICK };
    price
        .checked_div(tick)
        .map(|steps| steps.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|steps| steps.checked_mul(tick))
        .ok_or(WheelError::InvalidTick { tick })
}

/// `round_to_tick(theo * (1 + markup))`.
///
/// # Errors
///
/// `InvalidPrice` when `theo` is not a positive finite number, `InvalidTick` when
/// the result cannot be placed on the tick grid.
pub fn price_order(theo: f64, markup: Decimal, tick: Decimal) -> Result<Decimal, WheelError> {
    if !theo.is_finite() || theo <= 0.0 {
        return Err(WheelError::InvalidPrice { price: theo });
    }
    let marked_up = Decimal::from_f64(theo)
        .and_then(|theo| theo.checked_mul(Decimal::ONE + markup))
        .ok_or(WheelError::InvalidPrice { price: theo })?;
    round_to_tick(marked_up, tick)
}

/// Prices orders for one chain: opening limits and closing limits share its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPricer {
    tick: Decimal,
    min_price: Decimal,
}

impl OrderPricer {
    /// A missing or non-positive tick uses [`DEFAULT_TICK`].
    ///
    /// # Errors
    ///
    /// `InvalidTick` when the chain's tick is finer than [`MIN_TICK`].
    pub fn new(tick_size: Option<Decimal>, min_price: Decimal) -> Result<Self, WheelError> {
        let tick = match tick_size {
            Some(tick) if tick > Decimal::ZERO && tick < MIN_TICK => {
                return Err(WheelError::InvalidTick { tick });
            }
            Some(tick) if tick > Decimal::ZERO => tick,
            _ => DEFAULT_TICK,
        };
        Ok(Self { tick, min_price })
    }

    #[must_use]
    pub const fn tick(&self) -> Decimal {
        self.tick
    }

    /// Sell-to-open limit, never below the configured minimum or one tick.
    ///
    /// # Errors
    ///
    /// `InvalidPrice` when the theoretical price is not positive.
    pub fn limit_for_open(&self, theo: f64, markup: Decimal) -> Result<Decimal, WheelError> {
        let price = price_order(theo, markup, self.tick)?;
        Ok(price.max(self.min_price).max(self.tick))
    }

    /// Buy-to-close limit from a reference price, never below one tick.
    ///
    /// # Errors
    ///
    /// `InvalidTick` when the reference cannot be placed on the tick grid.
    pub fn limit_for_close(&self, reference: Decimal) -> Result<Decimal, WheelError> {
        Ok(round_to_tick(reference, self.tick)?.max(self.tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_markup_and_rounds_to_cents() {
        // 2.0 * 1.10 = 2.20
        assert_eq!(price_order(2.0, dec!(0.10), DEFAULT_TICK), Ok(dec!(2.20)));
        // 1.234 * 1.10 = 1.3574
        assert_eq!(price_order(1.234, dec!(0.10), DEFAULT_TICK), Ok(dec!(1.36)));
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_to_tick(dec!(2.345), dec!(0.01)), Ok(dec!(2.35)));
        assert_eq!(round_to_tick(dec!(2.344), dec!(0.01)), Ok(dec!(2.34)));
        assert_eq!(round_to_tick(dec!(1.125), dec!(0.05)), Ok(dec!(1.15)));
        assert_eq!(round_to_tick(dec!(1.12), dec!(0.05)), Ok(dec!(1.10)));
    }

    #[test]
    fn non_positive_tick_uses_default() {
        assert_eq!(round_to_tick(dec!(0.456), Decimal::ZERO), Ok(dec!(0.46)));
        assert_eq!(
            OrderPricer::new(Some(dec!(-0.05)), Decimal::ZERO).map(|p| p.tick()),
            Ok(DEFAULT_TICK)
        );
    }

    #[test]
    fn zero_or_negative_theo_is_invalid() {
        assert_eq!(
            price_order(0.0, dec!(0.10), DEFAULT_TICK),
            Err(WheelError::InvalidPrice { price: 0.0 })
        );
        assert!(matches!(
            price_order(-1.5, dec!(0.10), DEFAULT_TICK),
            Err(WheelError::InvalidPrice { .. })
        ));
        assert!(price_order(f64::NAN, dec!(0.10), DEFAULT_TICK).is_err());
    }

    #[test]
    fn opening_limit_respects_minimum() {
        let pricer = OrderPricer::new(None, dec!(0.05)).unwrap();
        assert_eq!(pricer.limit_for_open(0.01, dec!(0.10)), Ok(dec!(0.05)));
        assert_eq!(pricer.limit_for_open(3.0, dec!(0.10)), Ok(dec!(3.30)));
    }

    #[test]
    fn closing_limit_is_at_least_one_tick() {
        let pricer = OrderPricer::new(Some(dec!(0.05)), dec!(0.05)).unwrap();
        assert_eq!(pricer.limit_for_close(Decimal::ZERO), Ok(dec!(0.05)));
        assert_eq!(pricer.limit_for_close(dec!(0.93)), Ok(dec!(0.95)));
    }

    #[test]
    fn tick_below_minimum_is_rejected() {
        let tick = dec!(0.000000000000000000000000001);
        assert_eq!(
            OrderPricer::new(Some(tick), dec!(0.05)),
            Err(WheelError::InvalidTick { tick })
        );
        assert!(OrderPricer::new(Some(MIN_TICK), dec!(0.05)).is_ok());
    }

    #[test]
    fn off_grid_overflow_is_an_error() {
        let tick = dec!(0.000000000000000000000000001);
        assert_eq!(
            round_to_tick(dec!(150.00), tick),
            Err(WheelError::InvalidTick { tick })
        );
        assert!(matches!(
            price_order(150.0, dec!(0.10), tick),
            Err(WheelError::InvalidTick { .. })
        ));
    }
}
