//! Collaborator seams: where snapshots come from and where actions go.

use crate::action::IntendedAction;
use crate::market::ChainSnapshot;
use crate::position::PositionSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything a pass needs for one symbol, fetched up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub symbol: String,
    #[serde(default)]
    pub position: PositionSnapshot,
    pub chain: ChainSnapshot,
    /// Daily closes, oldest first, for the realized volatility fallback.
    #[serde(default)]
    pub price_history: Vec<Decimal>,
}

/// Outcome reported back by the execution collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub order_ids: Vec<String>,
    pub submitted: usize,
    pub dry_run: bool,
}

#[async_trait]
pub trait MarketProvider: Send + Sync {
    async fn snapshot(&mut self, symbol: &str) -> Result<Snapshot>;
}

#[async_trait]
pub trait ExecutionHandler: Send + Sync {
    async fn execute(&mut self, symbol: &str, action: &IntendedAction) -> Result<ExecutionReport>;
}
