//! Paper trading execution shim.
//!
//! Simulates fills at the limit price without touching a broker. Useful for
//! running the full pass pipeline before connecting to IB Gateway.

use std::collections::VecDeque;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use wheelbot_core::{ExecutionConfig, ExecutionHandler, ExecutionReport, IntendedAction};

use crate::orders::orders_with_ref;
use crate::types::{OptionsFill, OptionsOrder};

/// Simulate a fill at the order's limit price.
#[must_use]
pub fn simulate_fill(order: &OptionsOrder, order_id: String, commission_per_contract: Decimal) -> OptionsFill {
    let commission = commission_per_contract * Decimal::from(order.quantity);

    let fill = OptionsFill {
        order_id,
        contract: order.contract.clone(),
        side: order.side,
        quantity: order.quantity,
        avg_fill_price: order.limit_price,
        commission,
        filled_at: Utc::now(),
    };

    info!(
        order_id = fill.order_id,
        contract = fill.contract.display_name(),
        side = %fill.side,
        price = %fill.avg_fill_price,
        quantity = fill.quantity,
        commission = %fill.commission,
        "Paper fill simulated"
    );

    fill
}

/// Fills kept for inspection. Older fills only survive in the running totals.
pub const FILL_HISTORY: usize = 256;

/// In-memory execution handler that fills every order at its limit.
#[derive(Debug, Clone)]
pub struct PaperExecution {
    config: ExecutionConfig,
    recent_fills: VecDeque<OptionsFill>,
    fill_count: u64,
    net_cash: Decimal,
    next_order_id: u64,
}

impl PaperExecution {
    #[must_use]
    pub const fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            recent_fills: VecDeque::new(),
            fill_count: 0,
            net_cash: Decimal::ZERO,
            next_order_id: 1,
        }
    }

    /// The last [`FILL_HISTORY`] fills, oldest first.
    #[must_use]
    pub const fn fills(&self) -> &VecDeque<OptionsFill> {
        &self.recent_fills
    }

    /// Fills since the session started, including ones dropped from history.
    #[must_use]
    pub const fn fill_count(&self) -> u64 {
        self.fill_count
    }

    /// Net cash from all fills after commission.
    #[must_use]
    pub const fn net_cash(&self) -> Decimal {
        self.net_cash
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.config.dry_run = dry_run;
    }

    fn record(&mut self, fill: OptionsFill) {
        self.net_cash += fill.net_cash();
        self.fill_count += 1;
        if self.recent_fills.len() == FILL_HISTORY {
            self.recent_fills.pop_front();
        }
        self.recent_fills.push_back(fill);
    }
}

impl Default for PaperExecution {
    fn default() -> Self {
        Self::new(ExecutionConfig::default())
    }
}

#[async_trait]
impl ExecutionHandler for PaperExecution {
    async fn execute(&mut self, symbol: &str, action: &IntendedAction) -> Result<ExecutionReport> {
        let orders = orders_with_ref(symbol, action, &self.config.order_ref);

        if self.config.dry_run {
            for order in &orders {
                info!(
                    contract = order.contract.display_name(),
                    side = %order.side,
                    quantity = order.quantity,
                    limit = %order.limit_price,
                    tif = ?order.tif,
                    order_ref = order.order_ref,
                    "[DRY] Order not sent"
                );
            }
            return Ok(ExecutionReport {
                order_ids: Vec::new(),
                submitted: orders.len(),
                dry_run: true,
            });
        }

        let mut order_ids = Vec::with_capacity(orders.len());
        for order in &orders {
            let order_id = format!("PAPER-{}", self.next_order_id);
            self.next_order_id += 1;
            let fill = simulate_fill(order, order_id.clone(), self.config.commission_per_contract);
            self.record(fill);
            order_ids.push(order_id);
        }

        Ok(ExecutionReport {
            submitted: order_ids.len(),
            order_ids,
            dry_run: false,
        })
    }
}
