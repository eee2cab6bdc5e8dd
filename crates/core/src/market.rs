//! Market-side value types: contracts, quotes, and the per-pass chain snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Options contract right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionRight {
    Call,
    Put,
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "C"),
            Self::Put => write!(f, "P"),
        }
    }
}

/// Strike/expiry/right triple identifying a listed option on one underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionContract {
    pub expiry: NaiveDate,
    pub strike: Decimal,
    pub right: OptionRight,
}

impl OptionContract {
    #[must_use]
    pub const fn new(expiry: NaiveDate, strike: Decimal, right: OptionRight) -> Self {
        Self {
            expiry,
            strike,
            right,
        }
    }

    /// Calendar days from `as_of` until expiry. Zero on expiry day, negative after.
    #[must_use]
    pub fn days_to_expiry(&self, as_of: NaiveDate) -> i64 {
        (self.expiry - as_of).num_days()
    }
}

impl std::fmt::Display for OptionContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} {}", self.strike, self.right, self.expiry)
    }
}

/// One quotable contract from the chain snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    #[serde(flatten)]
    pub contract: OptionContract,
    #[serde(default)]
    pub bid: Option<Decimal>,
    #[serde(default)]
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Quoted implied volatility, annualized.
    #[serde(default)]
    pub implied_vol: Option<f64>,
    #[serde(default)]
    pub open_interest: Option<u64>,
    pub underlying_price: Decimal,
}

impl OptionQuote {
    /// Implied volatility if it is usable for pricing.
    #[must_use]
    pub fn usable_iv(&self) -> Option<f64> {
        self.implied_vol.filter(|iv| iv.is_finite() && *iv > 0.0)
    }
}

/// Chain snapshot handed to a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Evaluation date; all DTE figures are measured from here.
    pub as_of: NaiveDate,
    pub spot: Decimal,
    #[serde(default)]
    pub quotes: Vec<OptionQuote>,
    /// Minimum price increment for the options; one cent when absent.
    #[serde(default)]
    pub tick_size: Option<Decimal>,
}

impl ChainSnapshot {
    /// Quote for an exact contract, if the chain lists it.
    #[must_use]
    pub fn quote_for(&self, contract: &OptionContract) -> Option<&OptionQuote> {
        self.quotes.iter().find(|q| q.contract == *contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_quote(bid: Option<Decimal>, ask: Option<Decimal>, last: Option<Decimal>) -> OptionQuote {
        OptionQuote {
            contract: OptionContract::new(
                NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
                dec!(445),
                OptionRight::Put,
            ),
            bid,
            ask,
            last,
            implied_vol: None,
            open_interest: None,
            underlying_price: dec!(450),
        }
    }

    #[test]
    fn days_to_expiry_counts_calendar_days() {
        let contract = OptionContract::new(
            NaiveDate::from_ymd_opt(2026, 11, 16).unwrap(),
            dec!(100),
            OptionRight::Call,
        );
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(contract.days_to_expiry(as_of), 30);
        assert_eq!(contract.days_to_expiry(contract.expiry), 0);
    }

    #[test]
    fn zero_iv_is_not_usable() {
        let mut quote = make_quote(None, None, None);
        quote.implied_vol = Some(0.0);
        assert_eq!(quote.usable_iv(), None);
        quote.implied_vol = Some(0.22);
        assert_eq!(quote.usable_iv(), Some(0.22));
    }

    #[test]
    fn quote_deserializes_from_flat_json() {
        let json = r#"{
            "expiry": "2026-11-20",
            "strike": "445",
            "right": "put",
            "bid": "2.10",
            "ask": "2.30",
            "implied_vol": 0.18,
            "underlying_price": "450.00"
        }"#;
        let quote: OptionQuote = serde_json::from_str(json).expect("quote");
        assert_eq!(quote.contract.right, OptionRight::Put);
        assert_eq!(quote.contract.strike, dec!(445));
        assert_eq!(quote.last, None);
        assert_eq!(quote.open_interest, None);
    }
}
