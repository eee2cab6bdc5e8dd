//! Roll rule: a short leg near expiry that has not reached its profit target is
//! closed and replaced by a later-dated leg of the same right.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wheelbot_core::{OpenLeg, WheelConfig};

use crate::targets::profit_fraction;

/// Returns the leg's DTE if it should be rolled this pass.
///
/// Only called after the take-profit rule declined, but re-checks the fraction so
/// the rule stands on its own. An undefined fraction counts as short of target.
#[must_use]
pub fn check_roll(leg: &OpenLeg, as_of: NaiveDate, config: &WheelConfig) -> Option<i64> {
    let dte = leg.contract.days_to_expiry(as_of);
    if dte > config.roll_dte_threshold {
        return None;
    }

    let short_of_target =
        profit_fraction(leg).map_or(true, |f| f < config.take_profit_fraction);
    if !short_of_target {
        return None;
    }

    tracing::info!(
        contract = %leg.contract,
        dte,
        threshold = config.roll_dte_threshold,
        profit_fraction = %profit_fraction(leg).unwrap_or(Decimal::ZERO).round_dp(4),
        "Roll due: leg near expiry and short of profit target"
    );
    Some(dte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use wheelbot_core::{OptionContract, OptionRight};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn make_leg(dte: i64, entry_credit: Decimal, mark: Decimal) -> OpenLeg {
        OpenLeg {
            contract: OptionContract::new(as_of() + Duration::days(dte), dec!(460), OptionRight::Call),
            quantity: -1,
            entry_credit,
            mark,
        }
    }

    #[test]
    fn rolls_near_expiry_when_short_of_target() {
        let config = WheelConfig::default();
        let leg = make_leg(3, dec!(2.00), dec!(1.80));
        assert_eq!(check_roll(&leg, as_of(), &config), Some(3));
    }

    #[test]
    fn threshold_is_inclusive() {
        let config = WheelConfig::default();
        let leg = make_leg(5, dec!(2.00), dec!(1.80));
        assert_eq!(check_roll(&leg, as_of(), &config), Some(5));
        let later = make_leg(6, dec!(2.00), dec!(1.80));
        assert_eq!(check_roll(&later, as_of(), &config), None);
    }

    #[test]
    fn does_not_roll_a_leg_at_target() {
        let config = WheelConfig::default();
        let leg = make_leg(2, dec!(2.00), dec!(0.50));
        assert_eq!(check_roll(&leg, as_of(), &config), None);
    }

    #[test]
    fn undefined_fraction_still_rolls() {
        let config = WheelConfig::default();
        let leg = make_leg(1, Decimal::ZERO, dec!(0.30));
        assert_eq!(check_roll(&leg, as_of(), &config), Some(1));
    }
}
