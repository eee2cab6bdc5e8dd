//! Black–Scholes pricing for European options on a non-dividend-paying underlying.
//!
//! Dividends are ignored; the underlying is treated as zero-yield.

use wheelbot_core::OptionRight;

use crate::error::WheelError;

/// Calendar days per year used to turn DTE into a year fraction.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Inputs for a single model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInputs {
    pub right: OptionRight,
    pub spot: f64,
    pub strike: f64,
    pub years_to_expiry: f64,
    pub volatility: f64,
    pub risk_free_rate: f64,
}

impl PricingInputs {
    /// Year fraction for a whole number of days to expiry.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn years_from_dte(dte: i64) -> f64 {
        dte as f64 / DAYS_PER_YEAR
    }

    fn validate(&self) -> Result<(), WheelError> {
        if !(self.years_to_expiry > 0.0) {
            return Err(WheelError::InvalidExpiry {
                years: self.years_to_expiry,
            });
        }
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        positive("volatility", self.volatility)?;
        if !self.risk_free_rate.is_finite() {
            return Err(WheelError::InvalidInput {
                field: "risk_free_rate",
                value: self.risk_free_rate,
            });
        }
        Ok(())
    }

    /// Returns (d1, d2).
    fn d1_d2(&self) -> (f64, f64) {
        let vol_sqrt_t = self.volatility * self.years_to_expiry.sqrt();
        let d1 = ((self.spot / self.strike).ln()
            + (self.risk_free_rate + 0.5 * self.volatility * self.volatility)
                * self.years_to_expiry)
            / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), WheelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WheelError::InvalidInput { field, value })
    }
}

/// Theoretical value and sensitivities for a contract.
pub trait PricingModel {
    /// Theoretical option value, never negative.
    ///
    /// # Errors
    ///
    /// `InvalidExpiry` when `years_to_expiry <= 0`, `InvalidInput` for
    /// non-positive or non-finite spot, strike or volatility.
    fn theoretical_price(&self, inputs: &PricingInputs) -> Result<f64, WheelError>;

    /// Signed delta: calls in [0, 1], puts in [-1, 0].
    ///
    /// # Errors
    ///
    /// Same domain errors as [`PricingModel::theoretical_price`].
    fn delta(&self, inputs: &PricingInputs) -> Result<f64, WheelError>;
}

/// Closed-form Black–Scholes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl PricingModel for BlackScholes {
    fn theoretical_price(&self, inputs: &PricingInputs) -> Result<f64, WheelError> {
        inputs.validate()?;
        let (d1, d2) = inputs.d1_d2();
        let discounted_strike =
            inputs.strike * (-inputs.risk_free_rate * inputs.years_to_expiry).exp();

        let price = match inputs.right {
            OptionRight::Call => inputs.spot * normal_cdf(d1) - discounted_strike * normal_cdf(d2),
            OptionRight::Put => {
                discounted_strike * normal_cdf(-d2) - inputs.spot * normal_cdf(-d1)
            }
        };

        // Deep out-of-the-money contracts can round a hair below zero
        Ok(price.max(0.0))
    }

    fn delta(&self, inputs: &PricingInputs) -> Result<f64, WheelError> {
        inputs.validate()?;
        let (d1, _) = inputs.d1_d2();
        let call_delta = normal_cdf(d1);

        Ok(match inputs.right {
            OptionRight::Call => call_delta,
            OptionRight::Put => call_delta - 1.0,
        })
    }
}

/// Standard normal CDF.
///
/// Uses the relationship: Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_inputs(right: OptionRight, strike: f64, dte: i64, vol: f64) -> PricingInputs {
        PricingInputs {
            right,
            spot: 450.0,
            strike,
            years_to_expiry: PricingInputs::years_from_dte(dte),
            volatility: vol,
            risk_free_rate: 0.03,
        }
    }

    #[test]
    fn normal_cdf_at_zero_is_half() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn normal_cdf_at_196_is_about_975() {
        let cdf = normal_cdf(1.96);
        assert!((cdf - 0.975).abs() < 1e-4, "cdf(1.96) was {cdf}");
    }

    #[test]
    fn atm_call_matches_reference_value() {
        // S=K=100, T=1, r=5%, vol=20% → 10.4506
        let inputs = PricingInputs {
            right: OptionRight::Call,
            spot: 100.0,
            strike: 100.0,
            years_to_expiry: 1.0,
            volatility: 0.20,
            risk_free_rate: 0.05,
        };
        let price = BlackScholes.theoretical_price(&inputs).unwrap();
        assert!((price - 10.4506).abs() < 1e-3, "price was {price}");

        let put = BlackScholes
            .theoretical_price(&PricingInputs {
                right: OptionRight::Put,
                ..inputs
            })
            .unwrap();
        assert!((put - 5.5735).abs() < 1e-3, "put was {put}");
    }

    #[test]
    fn otm_put_delta_is_small_and_negative() {
        let delta = BlackScholes
            .delta(&make_inputs(OptionRight::Put, 430.0, 30, 0.18))
            .unwrap();
        assert!(delta < 0.0 && delta > -0.5, "delta was {delta}");
    }

    #[test]
    fn same_day_expiry_is_rejected() {
        let inputs = make_inputs(OptionRight::Put, 445.0, 0, 0.18);
        assert_eq!(
            BlackScholes.delta(&inputs),
            Err(WheelError::InvalidExpiry { years: 0.0 })
        );
        let past = make_inputs(OptionRight::Put, 445.0, -3, 0.18);
        assert!(matches!(
            BlackScholes.theoretical_price(&past),
            Err(WheelError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn zero_volatility_is_rejected() {
        let inputs = make_inputs(OptionRight::Call, 460.0, 30, 0.0);
        assert!(matches!(
            BlackScholes.theoretical_price(&inputs),
            Err(WheelError::InvalidInput {
                field: "volatility",
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn price_is_non_negative_and_non_decreasing_in_vol(
            put in any::<bool>(),
            spot in 1.0f64..1000.0,
            moneyness in 0.5f64..1.5,
            dte in 1i64..730,
            vol in 0.01f64..2.0,
            bump in 0.0f64..0.5,
            rate in 0.0f64..0.10,
        ) {
            let right = if put { OptionRight::Put } else { OptionRight::Call };
            let base = PricingInputs {
                right,
                spot,
                strike: spot * moneyness,
                years_to_expiry: PricingInputs::years_from_dte(dte),
                volatility: vol,
                risk_free_rate: rate,
            };
            let bumped = PricingInputs { volatility: vol + bump, ..base };

            let low = BlackScholes.theoretical_price(&base).unwrap();
            let high = BlackScholes.theoretical_price(&bumped).unwrap();
            prop_assert!(low >= 0.0);
            prop_assert!(high + 1e-9 * spot >= low, "low={low} high={high}");
        }

        #[test]
        fn call_minus_put_delta_is_one(
            spot in 1.0f64..1000.0,
            moneyness in 0.5f64..1.5,
            dte in 1i64..730,
            vol in 0.01f64..2.0,
        ) {
            let call = make_inputs(OptionRight::Call, spot * moneyness, dte, vol);
            let call = PricingInputs { spot, ..call };
            let put = PricingInputs { right: OptionRight::Put, ..call };

            let call_delta = BlackScholes.delta(&call).unwrap();
            let put_delta = BlackScholes.delta(&put).unwrap();
            prop_assert!((call_delta - put_delta - 1.0).abs() < 1e-12);
            prop_assert!((0.0..=1.0).contains(&call_delta));
            prop_assert!((-1.0..=0.0).contains(&put_delta));
        }
    }
}
