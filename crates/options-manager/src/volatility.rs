//! Realized volatility fallback for quotes without a usable implied volatility.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::WheelError;

/// Annualized sample standard deviation of the last `lookback` log returns.
///
/// `closes` are ordered oldest first. At least `lookback + 1` closes are required.
///
/// # Errors
///
/// `InsufficientData` when the history is too short, `InvalidInput` when a close
/// is not a positive number.
#[allow(clippy::cast_precision_loss)]
pub fn realized_volatility(
    closes: &[Decimal],
    lookback: usize,
    periods_per_year: f64,
) -> Result<f64, WheelError> {
    let need = lookback.max(2) + 1;
    if closes.len() < need {
        return Err(WheelError::InsufficientData {
            have: closes.len(),
            need,
        });
    }

    let window = &closes[closes.len() - need..];
    let mut prices = Vec::with_capacity(window.len());
    for close in window {
        let value = close.to_f64().unwrap_or(f64::NAN);
        if !(value.is_finite() && value > 0.0) {
            return Err(WheelError::InvalidInput {
                field: "close",
                value,
            });
        }
        prices.push(value);
    }

    let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Ok(variance.sqrt() * periods_per_year.sqrt())
}

/// Volatility to price a quote with: the quote's own IV when usable, else the
/// per-pass realized estimate (which may itself be an error).
pub fn resolve_volatility(
    implied: Option<f64>,
    realized: &Result<f64, WheelError>,
) -> Result<f64, WheelError> {
    match implied {
        Some(iv) => Ok(iv),
        None => realized.clone(),
    }
}
