//! Strategy, service and execution settings with their defaults and validation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub wheel: WheelConfig,
    pub service: ServiceConfig,
    pub execution: ExecutionConfig,
}

/// Longest expiry window accepted, in days.
pub const MAX_DTE: i64 = 3650;

/// Inclusive days-to-expiry window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DteRange {
    pub min: i64,
    pub max: i64,
}

impl DteRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, dte: i64) -> bool {
        dte >= self.min && dte <= self.max
    }

    /// Midpoint of the window, used to break ties between equally good contracts.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

/// Strategy parameters consumed by every pass. Immutable for the duration of a pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    /// Target absolute delta for cash-secured puts.
    pub target_put_delta: f64,
    /// Target delta for covered calls.
    pub target_call_delta: f64,
    pub put_dte_range: DteRange,
    pub call_dte_range: DteRange,
    /// Limit price markup over the theoretical price (0.10 = +10%).
    pub markup_over_theoretical: Decimal,
    /// Close once this fraction of the collected credit has decayed.
    pub take_profit_fraction: Decimal,
    /// Roll a leg that is still short of the profit target at or below this DTE.
    pub roll_dte_threshold: i64,
    /// Contracts per new leg.
    pub quantity: u32,
    /// Annualized risk-free rate used by the pricing model.
    pub risk_free_rate: f64,
    /// Only strikes within spot * (1 +/- pct) are considered.
    pub strike_window_pct: f64,
    /// Floor for opening limit prices.
    pub min_limit_price: Decimal,
    /// Number of log returns used for the realized volatility fallback.
    pub vol_lookback: usize,
    /// Annualization factor for realized volatility.
    pub periods_per_year: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            target_put_delta: 0.25,
            target_call_delta: 0.20,
            put_dte_range: DteRange::new(28, 45),
            call_dte_range: DteRange::new(28, 45),
            markup_over_theoretical: dec!(0.10),
            take_profit_fraction: dec!(0.50),
            roll_dte_threshold: 5,
            quantity: 1,
            risk_free_rate: 0.03,
            strike_window_pct: 0.30,
            min_limit_price: dec!(0.05),
            vol_lookback: 21,
            periods_per_year: 252.0,
        }
    }
}

/// Rejected configuration value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be in the open interval (0, 1), got {value}")]
    OutOfUnitInterval { field: &'static str, value: String },
    #[error("{field} has min {min} greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: String },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: String },
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: String },
    #[error("{field} max {value} exceeds {limit}")]
    TooLarge {
        field: &'static str,
        value: i64,
        limit: i64,
    },
}

impl WheelConfig {
    /// Checks every parameter against its documented domain.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("target_put_delta", self.target_put_delta)?;
        unit_interval("target_call_delta", self.target_call_delta)?;
        dte_range("put_dte_range", self.put_dte_range)?;
        dte_range("call_dte_range", self.call_dte_range)?;

        if self.markup_over_theoretical < Decimal::ZERO {
            return Err(ConfigError::Negative {
                field: "markup_over_theoretical",
                value: self.markup_over_theoretical.to_string(),
            });
        }
        if self.take_profit_fraction <= Decimal::ZERO || self.take_profit_fraction >= Decimal::ONE {
            return Err(ConfigError::OutOfUnitInterval {
                field: "take_profit_fraction",
                value: self.take_profit_fraction.to_string(),
            });
        }
        if self.roll_dte_threshold < 0 {
            return Err(ConfigError::Negative {
                field: "roll_dte_threshold",
                value: self.roll_dte_threshold.to_string(),
            });
        }
        if self.quantity == 0 {
            return Err(ConfigError::NotPositive {
                field: "quantity",
                value: "0".to_string(),
            });
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "risk_free_rate",
                value: self.risk_free_rate.to_string(),
            });
        }
        if !(self.strike_window_pct > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "strike_window_pct",
                value: self.strike_window_pct.to_string(),
            });
        }
        if self.min_limit_price < Decimal::ZERO {
            return Err(ConfigError::Negative {
                field: "min_limit_price",
                value: self.min_limit_price.to_string(),
            });
        }
        if self.vol_lookback < 2 {
            return Err(ConfigError::NotPositive {
                field: "vol_lookback",
                value: self.vol_lookback.to_string(),
            });
        }
        if !(self.periods_per_year > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "periods_per_year",
                value: self.periods_per_year.to_string(),
            });
        }
        Ok(())
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitInterval {
            field,
            value: value.to_string(),
        })
    }
}

fn dte_range(field: &'static str, range: DteRange) -> Result<(), ConfigError> {
    if range.min < 0 {
        return Err(ConfigError::Negative {
            field,
            value: range.min.to_string(),
        });
    }
    if range.min > range.max {
        return Err(ConfigError::InvertedRange {
            field,
            min: range.min,
            max: range.max,
        });
    }
    if range.max > MAX_DTE {
        return Err(ConfigError::TooLarge {
            field,
            value: range.max,
            limit: MAX_DTE,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Underlying traded by the wheel.
    pub symbol: String,
    /// Seconds between passes in loop mode.
    pub poll_interval_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            poll_interval_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Log orders without simulating fills.
    pub dry_run: bool,
    /// Order reference used to tag our orders.
    pub order_ref: String,
    pub commission_per_contract: Decimal,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            order_ref: "WHEELBOT".to_string(),
            commission_per_contract: dec!(0.65),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WheelConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_delta_outside_unit_interval() {
        let config = WheelConfig {
            target_call_delta: 1.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitInterval {
                field: "target_call_delta",
                ..
            })
        ));
    }

    #[test]
    fn rejects_inverted_dte_range() {
        let config = WheelConfig {
            put_dte_range: DteRange::new(45, 30),
            ..WheelConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                field: "put_dte_range",
                min: 45,
                max: 30
            })
        );
    }

    #[test]
    fn rejects_dte_window_beyond_ten_years() {
        let config = WheelConfig {
            call_dte_range: DteRange::new(30, i64::MAX),
            ..WheelConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooLarge {
                field: "call_dte_range",
                value: i64::MAX,
                limit: MAX_DTE
            })
        );
        assert!(DteRange::new(i64::MAX - 1, i64::MAX).midpoint() > 0.0);
    }

    #[test]
    fn rejects_take_profit_of_one() {
        let config = WheelConfig {
            take_profit_fraction: Decimal::ONE,
            ..WheelConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_quantity() {
        let config = WheelConfig {
            quantity: 0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "quantity", .. })
        ));
    }

    #[test]
    fn dte_range_contains_is_inclusive() {
        let range = DteRange::new(28, 45);
        assert!(range.contains(28));
        assert!(range.contains(45));
        assert!(!range.contains(27));
        assert!(!range.contains(46));
        assert!((range.midpoint() - 36.5).abs() < f64::EPSILON);
    }
}
