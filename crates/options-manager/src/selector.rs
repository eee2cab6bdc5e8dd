//! Delta-targeted contract selection.
//!
//! Filters the chain to the requested right and DTE window, prices every survivor
//! with the pricing model, and picks the contract whose delta magnitude is closest
//! to the target. Ties are broken by open interest (higher wins), then DTE closest
//! to the window midpoint, then lowest strike, then earliest expiry, so the choice
//! never depends on chain ordering.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use wheelbot_core::{ChainSnapshot, OptionQuote, WheelConfig};

use crate::error::WheelError;
use crate::pricing::{PricingInputs, PricingModel};
use crate::types::{Selection, SelectionCriteria};
use crate::volatility::{realized_volatility, resolve_volatility};

/// Delta distances are compared on this grid so float noise cannot decide a tie.
const DISTANCE_RESOLUTION: f64 = 1e-9;

/// Chooses contracts from one chain snapshot.
pub struct ChainSelector<'a, M: PricingModel> {
    model: &'a M,
    chain: &'a ChainSnapshot,
    realized_vol: Result<f64, WheelError>,
    risk_free_rate: f64,
    strike_window_pct: f64,
}

impl<'a, M: PricingModel> ChainSelector<'a, M> {
    /// Builds a selector. Realized volatility is estimated once here and reused
    /// for every quote that lacks an implied volatility.
    pub fn new(
        model: &'a M,
        chain: &'a ChainSnapshot,
        price_history: &[Decimal],
        config: &WheelConfig,
    ) -> Self {
        let realized_vol =
            realized_volatility(price_history, config.vol_lookback, config.periods_per_year);
        if let Err(e) = &realized_vol {
            debug!(error = %e, "Realized volatility unavailable; quotes without IV will be skipped");
        }

        Self {
            model,
            chain,
            realized_vol,
            risk_free_rate: config.risk_free_rate,
            strike_window_pct: config.strike_window_pct,
        }
    }

    /// Contract whose delta magnitude is closest to the target, or `None`.
    ///
    /// `None` is a normal outcome: nothing in the window, or nothing priceable.
    #[must_use]
    pub fn select_by_delta(&self, criteria: &SelectionCriteria) -> Option<Selection> {
        let candidates = self.candidates(criteria);

        let mut best: Option<Selection> = None;
        for quote in candidates {
            let selection = match self.evaluate(quote, criteria) {
                Ok(selection) => selection,
                Err(e) if e.is_contract_local() => {
                    debug!(contract = %quote.contract, error = %e, "Skipping contract");
                    continue;
                }
                Err(e) => {
                    warn!(contract = %quote.contract, error = %e, "Pricing model rejected contract");
                    continue;
                }
            };

            best = match best {
                Some(current) if rank(&current, &selection, criteria) != Ordering::Greater => {
                    Some(current)
                }
                _ => Some(selection),
            };
        }

        if let Some(selection) = &best {
            debug!(
                contract = %selection.quote.contract,
                delta = selection.delta,
                dte = selection.dte,
                vol = selection.volatility,
                theo = selection.theoretical_price,
                "Selected contract"
            );
        }
        best
    }

    /// Quotes of the right, inside the DTE window, inside the strike window when
    /// that leaves anything.
    fn candidates(&self, criteria: &SelectionCriteria) -> Vec<&'a OptionQuote> {
        let as_of = self.chain.as_of;
        let in_window: Vec<&OptionQuote> = self
            .chain
            .quotes
            .iter()
            .filter(|q| q.contract.right == criteria.right)
            .filter(|q| criteria.dte.contains(q.contract.days_to_expiry(as_of)))
            .filter(|q| criteria.expiry_after.map_or(true, |after| q.contract.expiry > after))
            .collect();

        let spot = self.chain.spot.to_f64().unwrap_or(0.0);
        if spot <= 0.0 {
            return in_window;
        }
        let low = spot * (1.0 - self.strike_window_pct);
        let high = spot * (1.0 + self.strike_window_pct);
        let near_spot: Vec<&OptionQuote> = in_window
            .iter()
            .copied()
            .filter(|q| {
                let strike = q.contract.strike.to_f64().unwrap_or(0.0);
                strike >= low && strike <= high
            })
            .collect();

        if near_spot.is_empty() {
            in_window
        } else {
            near_spot
        }
    }

    fn evaluate(
        &self,
        quote: &OptionQuote,
        criteria: &SelectionCriteria,
    ) -> Result<Selection, WheelError> {
        let dte = quote.contract.days_to_expiry(self.chain.as_of);
        let volatility = resolve_volatility(quote.usable_iv(), &self.realized_vol)?;
        let spot = if quote.underlying_price > Decimal::ZERO {
            quote.underlying_price
        } else {
            self.chain.spot
        };

        let inputs = PricingInputs {
            right: criteria.right,
            spot: spot.to_f64().unwrap_or(f64::NAN),
            strike: quote.contract.strike.to_f64().unwrap_or(f64::NAN),
            years_to_expiry: PricingInputs::years_from_dte(dte),
            volatility,
            risk_free_rate: self.risk_free_rate,
        };

        let delta = self.model.delta(&inputs)?;
        let theoretical_price = self.model.theoretical_price(&inputs)?;

        Ok(Selection {
            quote: quote.clone(),
            delta,
            dte,
            volatility,
            theoretical_price,
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn quantized_distance(delta: f64, target: f64) -> i64 {
    ((delta.abs() - target).abs() / DISTANCE_RESOLUTION).round() as i64
}

/// Total order over selections; `Less` means `a` is the better pick.
fn rank(a: &Selection, b: &Selection, criteria: &SelectionCriteria) -> Ordering {
    let midpoint = criteria.dte.midpoint();
    #[allow(clippy::cast_precision_loss)]
    let dte_gap = |s: &Selection| (s.dte as f64 - midpoint).abs();

    quantized_distance(a.delta, criteria.target_delta)
        .cmp(&quantized_distance(b.delta, criteria.target_delta))
        .then_with(|| {
            b.quote
                .open_interest
                .unwrap_or(0)
                .cmp(&a.quote.open_interest.unwrap_or(0))
        })
        .then_with(|| dte_gap(a).total_cmp(&dte_gap(b)))
        .then_with(|| a.quote.contract.strike.cmp(&b.quote.contract.strike))
        .then_with(|| a.quote.contract.expiry.cmp(&b.quote.contract.expiry))
}
