//! Position classification: maps raw holdings onto the wheel state machine.

use wheelbot_core::{OpenLeg, OptionRight, LOT_SIZE};

use crate::error::WheelError;
use crate::types::PositionState;

/// Classify holdings in one symbol.
///
/// Only short legs count; long options are ignored. A short call takes precedence
/// over shares because it is the leg being managed.
///
/// # Errors
///
/// `AmbiguousPosition` if a short put and a short call are open at the same time.
pub fn classify(shares: i64, open_legs: &[OpenLeg]) -> Result<PositionState, WheelError> {
    let short_puts = open_legs.iter().filter(|l| l.is_short_put()).count();
    let short_calls = open_legs.iter().filter(|l| l.is_short_call()).count();

    let state = match (short_puts, short_calls) {
        (0, 0) if shares >= LOT_SIZE => PositionState::AssignedShares,
        (0, 0) => PositionState::Flat,
        (_, 0) => PositionState::ShortPut,
        (0, _) => PositionState::ShortCall,
        _ => {
            return Err(WheelError::AmbiguousPosition {
                short_puts,
                short_calls,
            })
        }
    };

    if short_puts > 1 || short_calls > 1 {
        tracing::warn!(
            short_puts,
            short_calls,
            "Multiple short legs of the same right, managing the nearest expiry"
        );
    }

    Ok(state)
}

/// The short leg of `right` to manage: earliest expiry, then lowest strike.
#[must_use]
pub fn managed_leg(open_legs: &[OpenLeg], right: OptionRight) -> Option<&OpenLeg> {
    open_legs
        .iter()
        .filter(|l| l.is_short() && l.contract.right == right)
        .min_by(|a, b| {
            a.contract
                .expiry
                .cmp(&b.contract.expiry)
                .then(a.contract.strike.cmp(&b.contract.strike))
        })
}
