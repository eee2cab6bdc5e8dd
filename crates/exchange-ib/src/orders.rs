//! Translation of an intended action into broker orders.

use wheelbot_core::{IntendedAction, OrderIntent};

use crate::types::{OptionsContract, OptionsOrder, TimeInForce};

/// Order reference stamped on every order this bot places.
pub const ORDER_REF: &str = "WHEELBOT";

/// Broker orders for `action`, in submission order, tagged with [`ORDER_REF`].
///
/// Rolls yield the buy-to-close before the sell-to-open. Idle yields nothing.
#[must_use]
pub fn orders_for_action(symbol: &str, action: &IntendedAction) -> Vec<OptionsOrder> {
    orders_with_ref(symbol, action, ORDER_REF)
}

/// Same as [`orders_for_action`] with a caller-chosen order reference.
#[must_use]
pub fn orders_with_ref(symbol: &str, action: &IntendedAction, order_ref: &str) -> Vec<OptionsOrder> {
    action
        .orders()
        .into_iter()
        .map(|intent| to_order(symbol, intent, order_ref))
        .collect()
}

fn to_order(symbol: &str, intent: &OrderIntent, order_ref: &str) -> OptionsOrder {
    OptionsOrder {
        contract: OptionsContract::from_contract(symbol, &intent.contract),
        side: intent.side,
        quantity: intent.quantity,
        limit_price: intent.limit_price,
        tif: TimeInForce::Gtc,
        order_ref: order_ref.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use wheelbot_core::{IdleReason, OptionContract, OptionRight, OrderSide};

    fn make_contract(right: OptionRight, day: u32) -> OptionContract {
        OptionContract::new(NaiveDate::from_ymd_opt(2026, 11, day).unwrap(), dec!(460), right)
    }

    #[test]
    fn open_csp_is_one_gtc_sell() {
        let action = IntendedAction::OpenCsp(OrderIntent::sell_to_open(
            make_contract(OptionRight::Put, 20),
            2,
            dec!(2.35),
        ));
        let orders = orders_for_action("spy", &action);

        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.side, OrderSide::Sell);
        assert_eq!(order.quantity, 2);
        assert_eq!(order.limit_price, dec!(2.35));
        assert_eq!(order.tif, TimeInForce::Gtc);
        assert_eq!(order.order_ref, "WHEELBOT");
        assert_eq!(order.contract.symbol, "SPY");
        assert_eq!(order.contract.right, OptionRight::Put);
    }

    #[test]
    fn roll_closes_before_opening() {
        let action = IntendedAction::Roll {
            close: OrderIntent::buy_to_close(make_contract(OptionRight::Call, 2), 1, dec!(0.45)),
            open: OrderIntent::sell_to_open(make_contract(OptionRight::Call, 27), 1, dec!(3.10)),
        };
        let orders = orders_with_ref("SPY", &action, "TEST");

        let sides: Vec<_> = orders.iter().map(|o| o.side).collect();
        assert_eq!(sides, vec![OrderSide::Buy, OrderSide::Sell]);
        assert!(orders.iter().all(|o| o.order_ref == "TEST"));
        assert!(orders.iter().all(|o| o.contract.right == OptionRight::Call));
    }

    #[test]
    fn idle_places_nothing() {
        let action = IntendedAction::idle(IdleReason::Holding);
        assert!(orders_for_action("SPY", &action).is_empty());
    }
}
