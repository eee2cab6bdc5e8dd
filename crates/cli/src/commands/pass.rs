//! Run one strategy pass against a snapshot file and print the decision.

use anyhow::{Context, Result};
use clap::Args;
use wheelbot_ib::{orders_with_ref, JsonSnapshotProvider, PaperExecution};
use wheelbot_options_manager::service;

use super::ConfigArgs;

/// Arguments for the pass command.
#[derive(Args, Debug)]
pub struct PassArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// JSON snapshot with holdings, option chain and closes.
    #[arg(short, long)]
    pub snapshot: String,

    /// Log the orders instead of paper-filling them.
    #[arg(long)]
    pub dry: bool,
}

/// Runs a single pass and prints the intended action as JSON on stdout.
pub async fn run_pass(args: PassArgs) -> Result<()> {
    let mut config = args.config.load()?;
    if args.dry {
        config.execution.dry_run = true;
    }

    let mut provider = JsonSnapshotProvider::new(&args.snapshot);
    let mut executor = PaperExecution::new(config.execution.clone());

    let outcome = service::run_once(&mut provider, &mut executor, &config).await?;

    let json = serde_json::to_string_pretty(&outcome.action)
        .context("Failed to serialize intended action")?;
    println!("{json}");

    if let Some(state) = outcome.state {
        eprintln!("state: {state}");
    }
    if let Some(diagnostic) = &outcome.diagnostic {
        eprintln!("diagnostic: {diagnostic}");
    }
    for order in orders_with_ref(&config.service.symbol, &outcome.action, &config.execution.order_ref) {
        eprintln!(
            "order: {} {} {} @ {} {:?} ref={}",
            order.side,
            order.quantity,
            order.contract.display_name(),
            order.limit_price,
            order.tif,
            order.order_ref
        );
    }
    for fill in executor.fills() {
        eprintln!(
            "fill: {} {} @ {} commission={}",
            fill.order_id,
            fill.contract.display_name(),
            fill.avg_fill_price,
            fill.commission
        );
    }

    Ok(())
}
