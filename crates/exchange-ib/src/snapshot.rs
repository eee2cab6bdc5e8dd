//! File-backed market data: a JSON snapshot of holdings, chain and closes.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;
use wheelbot_core::{MarketProvider, Snapshot};

/// Reads a [`Snapshot`] from a JSON file on every request, so edits between
/// passes are picked up.
#[derive(Debug, Clone)]
pub struct JsonSnapshotProvider {
    path: PathBuf,
}

impl JsonSnapshotProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and parse the file without checking the symbol.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid snapshot.
    pub async fn load(&self) -> Result<Snapshot> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))
    }
}

#[async_trait]
impl MarketProvider for JsonSnapshotProvider {
    async fn snapshot(&mut self, symbol: &str) -> Result<Snapshot> {
        let snapshot = self.load().await?;
        if !snapshot.symbol.eq_ignore_ascii_case(symbol) {
            bail!(
                "Snapshot {} is for {}, not {symbol}",
                self.path.display(),
                snapshot.symbol
            );
        }

        debug!(
            symbol,
            as_of = %snapshot.chain.as_of,
            quotes = snapshot.chain.quotes.len(),
            legs = snapshot.position.open_legs.len(),
            shares = snapshot.position.shares,
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}
