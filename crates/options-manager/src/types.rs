//! Types for wheel position management.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wheelbot_core::{DteRange, IntendedAction, OptionQuote, OptionRight};

use crate::error::WheelError;

/// Where the account sits in the wheel cycle. Derived fresh every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    /// No shares, no short legs: sell a cash-secured put.
    Flat,
    /// A cash-secured put is open.
    ShortPut,
    /// At least one lot of shares and no call against them.
    AssignedShares,
    /// A covered call is open.
    ShortCall,
}

impl PositionState {
    /// Right of the leg managed in this state, if any.
    #[must_use]
    pub const fn managed_right(self) -> Option<OptionRight> {
        match self {
            Self::ShortPut => Some(OptionRight::Put),
            Self::ShortCall => Some(OptionRight::Call),
            Self::Flat | Self::AssignedShares => None,
        }
    }
}

impl std::fmt::Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "FLAT"),
            Self::ShortPut => write!(f, "SHORT_PUT"),
            Self::AssignedShares => write!(f, "ASSIGNED_SHARES"),
            Self::ShortCall => write!(f, "SHORT_CALL"),
        }
    }
}

/// What the chain selector is asked to find.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionCriteria {
    pub right: OptionRight,
    /// Target delta magnitude in (0, 1).
    pub target_delta: f64,
    pub dte: DteRange,
    /// Only contracts expiring strictly after this date qualify.
    pub expiry_after: Option<NaiveDate>,
}

impl SelectionCriteria {
    #[must_use]
    pub const fn new(right: OptionRight, target_delta: f64, dte: DteRange) -> Self {
        Self {
            right,
            target_delta,
            dte,
            expiry_after: None,
        }
    }

    #[must_use]
    pub const fn after(mut self, expiry: NaiveDate) -> Self {
        self.expiry_after = Some(expiry);
        self
    }
}

/// A contract chosen by the selector, with the figures it was chosen on.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub quote: OptionQuote,
    /// Signed model delta.
    pub delta: f64,
    pub dte: i64,
    pub volatility: f64,
    pub theoretical_price: f64,
}

/// Result of one strategy pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    pub action: IntendedAction,
    /// Classified state; absent when classification failed.
    pub state: Option<PositionState>,
    /// Non-fatal problem surfaced to the caller, e.g. an ambiguous position.
    pub diagnostic: Option<WheelError>,
}

impl PassOutcome {
    #[must_use]
    pub const fn new(state: PositionState, action: IntendedAction) -> Self {
        Self {
            action,
            state: Some(state),
            diagnostic: None,
        }
    }
}
