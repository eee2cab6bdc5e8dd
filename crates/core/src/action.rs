//! Output of a strategy pass.

use crate::market::{OptionContract, OptionRight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// A single limit order the execution collaborator should place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub contract: OptionContract,
    pub side: OrderSide,
    pub quantity: u32,
    pub limit_price: Decimal,
}

impl OrderIntent {
    #[must_use]
    pub const fn sell_to_open(contract: OptionContract, quantity: u32, limit_price: Decimal) -> Self {
        Self {
            contract,
            side: OrderSide::Sell,
            quantity,
            limit_price,
        }
    }

    #[must_use]
    pub const fn buy_to_close(contract: OptionContract, quantity: u32, limit_price: Decimal) -> Self {
        Self {
            contract,
            side: OrderSide::Buy,
            quantity,
            limit_price,
        }
    }
}

/// Why a pass decided not to trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleReason {
    /// A managed leg exists and no rule fired.
    Holding,
    /// No contract in the chain matched the selection window.
    NoCandidate,
    /// Roll was due but no replacement contract was found; the leg is held.
    NoRollCandidate,
    /// Holdings need manual reconciliation.
    AmbiguousPosition,
}

impl std::fmt::Display for IdleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Holding => write!(f, "holding"),
            Self::NoCandidate => write!(f, "no_candidate"),
            Self::NoRollCandidate => write!(f, "no_roll_candidate"),
            Self::AmbiguousPosition => write!(f, "ambiguous_position"),
        }
    }
}

/// Exactly one of these is produced per pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum IntendedAction {
    /// Sell a cash-secured put.
    OpenCsp(OrderIntent),
    /// Sell a covered call against assigned shares.
    OpenCc(OrderIntent),
    /// Buy back the managed leg after enough premium has decayed.
    TakeProfitClose(OrderIntent),
    /// Buy back the managed leg and sell a later-dated leg of the same right.
    Roll {
        close: OrderIntent,
        open: OrderIntent,
    },
    Idle { reason: IdleReason },
}

impl IntendedAction {
    #[must_use]
    pub const fn idle(reason: IdleReason) -> Self {
        Self::Idle { reason }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }

    /// Orders in submission order. Rolls close before they open.
    #[must_use]
    pub fn orders(&self) -> Vec<&OrderIntent> {
        match self {
            Self::OpenCsp(order) | Self::OpenCc(order) | Self::TakeProfitClose(order) => {
                vec![order]
            }
            Self::Roll { close, open } => vec![close, open],
            Self::Idle { .. } => vec![],
        }
    }

    /// Right of the leg the action trades, if any.
    #[must_use]
    pub fn right(&self) -> Option<OptionRight> {
        self.orders().first().map(|o| o.contract.right)
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OpenCsp(_) => "open_csp",
            Self::OpenCc(_) => "open_cc",
            Self::TakeProfitClose(_) => "take_profit_close",
            Self::Roll { .. } => "roll",
            Self::Idle { .. } => "idle",
        }
    }
}
