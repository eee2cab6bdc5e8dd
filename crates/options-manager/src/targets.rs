//! Take-profit rule: buy back a short leg once enough premium has decayed.

use rust_decimal::Decimal;
use wheelbot_core::{OpenLeg, WheelConfig};

/// Share of the entry credit already captured: `(credit - mark) / credit`.
///
/// `None` when the entry credit is not positive, since the fraction is undefined.
#[must_use]
pub fn profit_fraction(leg: &OpenLeg) -> Option<Decimal> {
    if leg.entry_credit <= Decimal::ZERO {
        return None;
    }
    Some((leg.entry_credit - leg.mark) / leg.entry_credit)
}

/// Returns the captured fraction if the take-profit threshold is hit.
#[must_use]
pub fn check_take_profit(leg: &OpenLeg, config: &WheelConfig) -> Option<Decimal> {
    let fraction = profit_fraction(leg)?;

    if fraction >= config.take_profit_fraction {
        tracing::info!(
            contract = %leg.contract,
            entry_credit = %leg.entry_credit,
            mark = %leg.mark,
            profit_fraction = %fraction.round_dp(4),
            threshold = %config.take_profit_fraction,
            "Take-profit hit, closing leg"
        );
        return Some(fraction);
    }

    None
}
