//! Holdings on one underlying: share count and open option legs.

use crate::market::{OptionContract, OptionRight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shares per standard equity option contract.
pub const LOT_SIZE: i64 = 100;

/// An existing option position as reported by the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenLeg {
    #[serde(flatten)]
    pub contract: OptionContract,
    /// Lots held; negative means short.
    pub quantity: i32,
    /// Average credit received per contract when the leg was opened.
    pub entry_credit: Decimal,
    /// Current mark price per contract.
    pub mark: Decimal,
}

impl OpenLeg {
    #[must_use]
    pub const fn is_short(&self) -> bool {
        self.quantity < 0
    }

    #[must_use]
    pub fn is_short_put(&self) -> bool {
        self.is_short() && self.contract.right == OptionRight::Put
    }

    #[must_use]
    pub fn is_short_call(&self) -> bool {
        self.is_short() && self.contract.right == OptionRight::Call
    }

    /// Absolute number of contracts.
    #[must_use]
    pub const fn lots(&self) -> u32 {
        self.quantity.unsigned_abs()
    }
}

/// Holdings in one symbol at the start of a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    #[serde(default)]
    pub shares: i64,
    #[serde(default)]
    pub open_legs: Vec<OpenLeg>,
}

impl PositionSnapshot {
    /// Whole option lots covered by the share holding.
    #[must_use]
    pub const fn covered_lots(&self) -> i64 {
        if self.shares <= 0 {
            0
        } else {
            self.shares / LOT_SIZE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn make_leg(right: OptionRight, quantity: i32) -> OpenLeg {
        OpenLeg {
            contract: OptionContract::new(
                NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
                dec!(445),
                right,
            ),
            quantity,
            entry_credit: dec!(2.00),
            mark: dec!(1.00),
        }
    }

    #[test]
    fn short_detection_uses_sign() {
        assert!(make_leg(OptionRight::Put, -1).is_short_put());
        assert!(!make_leg(OptionRight::Put, 1).is_short_put());
        assert!(make_leg(OptionRight::Call, -2).is_short_call());
        assert_eq!(make_leg(OptionRight::Call, -2).lots(), 2);
    }

    #[test]
    fn covered_lots_rounds_down() {
        let snapshot = PositionSnapshot {
            shares: 250,
            open_legs: vec![],
        };
        assert_eq!(snapshot.covered_lots(), 2);

        let short_stock = PositionSnapshot {
            shares: -100,
            open_legs: vec![],
        };
        assert_eq!(short_stock.covered_lots(), 0);
    }
}
