//! One strategy pass: classify holdings, apply the leg rules or open a new leg,
//! and emit exactly one intended action.
//!
//! The pass is pure. It reads the snapshots and config it is handed and never
//! touches the clock, the network or any shared state.

use rust_decimal::Decimal;
use tracing::{info, warn};
use wheelbot_core::{
    ChainSnapshot, IdleReason, IntendedAction, OpenLeg, OptionRight, OrderIntent,
    PositionSnapshot, WheelConfig,
};

use crate::classifier::{classify, managed_leg};
use crate::error::WheelError;
use crate::order_pricer::OrderPricer;
use crate::pricing::{BlackScholes, PricingModel};
use crate::rolls::check_roll;
use crate::selector::ChainSelector;
use crate::targets::check_take_profit;
use crate::types::{PassOutcome, PositionState, SelectionCriteria};

/// Decision core bound to a validated config and a pricing model.
#[derive(Debug, Clone)]
pub struct StrategyEngine<M: PricingModel = BlackScholes> {
    model: M,
    config: WheelConfig,
}

impl StrategyEngine<BlackScholes> {
    /// # Errors
    ///
    /// `InvalidConfig` if any parameter is out of range.
    pub fn new(config: WheelConfig) -> Result<Self, WheelError> {
        Self::with_model(BlackScholes, config)
    }
}

impl<M: PricingModel> StrategyEngine<M> {
    /// # Errors
    ///
    /// `InvalidConfig` if any parameter is out of range.
    pub fn with_model(model: M, config: WheelConfig) -> Result<Self, WheelError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    /// Decide what to do for `symbol` given its holdings and option chain.
    ///
    /// An ambiguous position is not an error: the pass idles and carries the
    /// problem in [`PassOutcome::diagnostic`].
    ///
    /// # Errors
    ///
    /// `InvalidPrice` when a selected contract cannot be priced into an order,
    /// `InvalidTick` when the chain's tick size is unusable.
    pub fn run_pass(
        &self,
        symbol: &str,
        position: &PositionSnapshot,
        chain: &ChainSnapshot,
        price_history: &[Decimal],
    ) -> Result<PassOutcome, WheelError> {
        let state = match classify(position.shares, &position.open_legs) {
            Ok(state) => state,
            Err(e @ WheelError::AmbiguousPosition { .. }) => {
                warn!(symbol, error = %e, "Position needs manual reconciliation, idling");
                return Ok(PassOutcome {
                    action: IntendedAction::idle(IdleReason::AmbiguousPosition),
                    state: None,
                    diagnostic: Some(e),
                });
            }
            Err(e) => return Err(e),
        };

        let selector = ChainSelector::new(&self.model, chain, price_history, &self.config);
        let pricer = OrderPricer::new(chain.tick_size, self.config.min_limit_price)?;

        let action = match state {
            PositionState::Flat => {
                self.open_leg(&selector, &pricer, OptionRight::Put, self.config.quantity)?
            }
            PositionState::AssignedShares => {
                let covered = u32::try_from(position.covered_lots()).unwrap_or(u32::MAX);
                let quantity = self.config.quantity.min(covered);
                self.open_leg(&selector, &pricer, OptionRight::Call, quantity)?
            }
            PositionState::ShortPut | PositionState::ShortCall => {
                let leg = state
                    .managed_right()
                    .and_then(|right| managed_leg(&position.open_legs, right));
                match leg {
                    Some(leg) => self.manage_leg(leg, chain, &selector, &pricer)?,
                    None => IntendedAction::idle(IdleReason::Holding),
                }
            }
        };

        info!(
            symbol,
            state = %state,
            action = action.kind(),
            orders = action.orders().len(),
            "Pass complete"
        );
        Ok(PassOutcome::new(state, action))
    }

    fn criteria_for(&self, right: OptionRight) -> SelectionCriteria {
        match right {
            OptionRight::Put => SelectionCriteria::new(
                right,
                self.config.target_put_delta,
                self.config.put_dte_range,
            ),
            OptionRight::Call => SelectionCriteria::new(
                right,
                self.config.target_call_delta,
                self.config.call_dte_range,
            ),
        }
    }

    fn open_leg(
        &self,
        selector: &ChainSelector<'_, M>,
        pricer: &OrderPricer,
        right: OptionRight,
        quantity: u32,
    ) -> Result<IntendedAction, WheelError> {
        let Some(selection) = selector.select_by_delta(&self.criteria_for(right)) else {
            info!(right = %right, "No contract matched the selection window");
            return Ok(IntendedAction::idle(IdleReason::NoCandidate));
        };

        let limit = pricer.limit_for_open(
            selection.theoretical_price,
            self.config.markup_over_theoretical,
        )?;
        let order = OrderIntent::sell_to_open(selection.quote.contract, quantity, limit);

        info!(
            contract = %order.contract,
            quantity,
            limit = %limit,
            delta = selection.delta,
            theo = selection.theoretical_price,
            "Opening short leg"
        );

        Ok(match right {
            OptionRight::Put => IntendedAction::OpenCsp(order),
            OptionRight::Call => IntendedAction::OpenCc(order),
        })
    }

    /// Take-profit first, then roll, otherwise hold.
    fn manage_leg(
        &self,
        leg: &OpenLeg,
        chain: &ChainSnapshot,
        selector: &ChainSelector<'_, M>,
        pricer: &OrderPricer,
    ) -> Result<IntendedAction, WheelError> {
        if check_take_profit(leg, &self.config).is_some() {
            let close = OrderIntent::buy_to_close(
                leg.contract,
                leg.lots(),
                pricer.limit_for_close(leg.mark)?,
            );
            return Ok(IntendedAction::TakeProfitClose(close));
        }

        if check_roll(leg, chain.as_of, &self.config).is_none() {
            return Ok(IntendedAction::idle(IdleReason::Holding));
        }

        let criteria = self
            .criteria_for(leg.contract.right)
            .after(leg.contract.expiry);
        let Some(replacement) = selector.select_by_delta(&criteria) else {
            warn!(contract = %leg.contract, "Roll due but no replacement found, holding leg");
            return Ok(IntendedAction::idle(IdleReason::NoRollCandidate));
        };

        // Marketable close at the ask when the chain quotes the leg
        let close_reference = chain
            .quote_for(&leg.contract)
            .and_then(|q| q.ask)
            .filter(|ask| *ask > Decimal::ZERO)
            .unwrap_or(leg.mark);
        let close = OrderIntent::buy_to_close(
            leg.contract,
            leg.lots(),
            pricer.limit_for_close(close_reference)?,
        );

        let open_limit = pricer.limit_for_open(
            replacement.theoretical_price,
            self.config.markup_over_theoretical,
        )?;
        let open = OrderIntent::sell_to_open(replacement.quote.contract, leg.lots(), open_limit);

        info!(
            from = %close.contract,
            to = %open.contract,
            close_limit = %close.limit_price,
            open_limit = %open_limit,
            "Rolling leg"
        );
        Ok(IntendedAction::Roll { close, open })
    }
}

/// Run one pass with the default Black-Scholes model.
///
/// # Errors
///
/// `InvalidConfig` for an out-of-range config, `InvalidPrice` or `InvalidTick`
/// when an order cannot be priced.
pub fn run_pass(
    symbol: &str,
    position: &PositionSnapshot,
    chain: &ChainSnapshot,
    price_history: &[Decimal],
    config: &WheelConfig,
) -> Result<PassOutcome, WheelError> {
    StrategyEngine::new(config.clone())?.run_pass(symbol, position, chain, price_history)
}
