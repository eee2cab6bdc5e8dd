//! Broker-facing types for options orders.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wheelbot_core::{OptionContract, OptionRight, OrderSide, LOT_SIZE};

/// A fully routed options contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsContract {
    pub symbol: String,
    pub expiry: NaiveDate,
    pub strike: Decimal,
    pub right: OptionRight,
    /// Exchange routing (e.g., "SMART", "CBOE").
    pub exchange: String,
    pub currency: String,
    /// Trading class; the underlying symbol for standard listings.
    pub trading_class: String,
    /// Contract multiplier (100 for standard US equity options).
    pub multiplier: Decimal,
}

impl OptionsContract {
    /// Standard US equity option: SMART routing, USD, trading class = symbol.
    #[must_use]
    pub fn new(symbol: &str, expiry: NaiveDate, strike: Decimal, right: OptionRight) -> Self {
        let symbol = symbol.to_uppercase();
        Self {
            trading_class: symbol.clone(),
            symbol,
            expiry,
            strike,
            right,
            exchange: "SMART".to_string(),
            currency: "USD".to_string(),
            multiplier: Decimal::from(LOT_SIZE),
        }
    }

    #[must_use]
    pub fn from_contract(symbol: &str, contract: &OptionContract) -> Self {
        Self::new(symbol, contract.expiry, contract.strike, contract.right)
    }

    /// Human-readable contract description (e.g., "SPY 445P 2026-11-20").
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}{} {}", self.symbol, self.strike, self.right, self.expiry)
    }
}

/// How long a working order stays live. Wheel orders rest until cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till cancelled.
    Gtc,
}

/// A limit order to place with the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsOrder {
    pub contract: OptionsContract,
    pub side: OrderSide,
    pub quantity: u32,
    pub limit_price: Decimal,
    pub tif: TimeInForce,
    /// Tag identifying orders placed by this bot.
    pub order_ref: String,
}

/// A confirmed fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsFill {
    pub order_id: String,
    pub contract: OptionsContract,
    pub side: OrderSide,
    pub quantity: u32,
    pub avg_fill_price: Decimal,
    pub commission: Decimal,
    pub filled_at: chrono::DateTime<chrono::Utc>,
}

impl OptionsFill {
    /// Cash moved by the fill after commission: credit for sells, debit for buys.
    #[must_use]
    pub fn net_cash(&self) -> Decimal {
        let gross = self.avg_fill_price * Decimal::from(self.quantity) * self.contract.multiplier;
        match self.side {
            OrderSide::Sell => gross - self.commission,
            OrderSide::Buy => -gross - self.commission,
        }
    }
}
