//! Error taxonomy for the decision core.

use rust_decimal::Decimal;
use thiserror::Error;
use wheelbot_core::ConfigError;

/// Errors raised by a strategy pass.
///
/// `InvalidExpiry`, `InsufficientData` and `InvalidInput` are recovered inside the
/// chain selector by skipping the offending contract. `AmbiguousPosition` is turned
/// into an idle pass with a diagnostic. `InvalidPrice`, `InvalidTick` and
/// `InvalidConfig` propagate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WheelError {
    /// Contract is expiring today or already expired.
    #[error("Years to expiry must be positive, got {years}")]
    InvalidExpiry { years: f64 },

    /// Not enough price history to estimate realized volatility.
    #[error("Need {need} closes for realized volatility, have {have}")]
    InsufficientData { have: usize, need: usize },

    /// Pricing input outside the model's domain.
    #[error("Invalid pricing input {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },

    /// Both a short put and a short call are open on the same symbol.
    #[error("Ambiguous position: {short_puts} short put leg(s) and {short_calls} short call leg(s) open")]
    AmbiguousPosition { short_puts: usize, short_calls: usize },

    /// An order would have been priced at or below zero.
    #[error("Theoretical price must be positive, got {price}")]
    InvalidPrice { price: f64 },

    /// Tick size too fine to put a limit price on the grid.
    #[error("Tick size {tick} cannot price orders")]
    InvalidTick { tick: Decimal },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl WheelError {
    /// Errors the selector absorbs by excluding the contract.
    #[must_use]
    pub const fn is_contract_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpiry { .. }
                | Self::InsufficientData { .. }
                | Self::InvalidInput { .. }
        )
    }
}
