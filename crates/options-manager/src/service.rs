//! Pass driver: fetch a snapshot, decide, hand the action to execution.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{error, info, warn};
use wheelbot_core::{AppConfig, ExecutionHandler, MarketProvider};

use crate::engine::run_pass;
use crate::types::PassOutcome;

/// Run a single pass for the configured symbol.
///
/// Idle passes are not forwarded to the executor.
///
/// # Errors
///
/// Fails if the snapshot cannot be fetched, the pass rejects the config or an
/// order price, or the executor fails.
pub async fn run_once<P, E>(
    provider: &mut P,
    executor: &mut E,
    config: &AppConfig,
) -> Result<PassOutcome>
where
    P: MarketProvider + ?Sized,
    E: ExecutionHandler + ?Sized,
{
    let symbol = config.service.symbol.as_str();
    let snapshot = provider
        .snapshot(symbol)
        .await
        .with_context(|| format!("Failed to fetch snapshot for {symbol}"))?;

    let outcome = run_pass(
        &snapshot.symbol,
        &snapshot.position,
        &snapshot.chain,
        &snapshot.price_history,
        &config.wheel,
    )
    .with_context(|| format!("Strategy pass failed for {symbol}"))?;

    if let Some(diagnostic) = &outcome.diagnostic {
        warn!(symbol, diagnostic = %diagnostic, "Pass produced a diagnostic");
    }

    if outcome.action.is_idle() {
        return Ok(outcome);
    }

    let report = executor
        .execute(symbol, &outcome.action)
        .await
        .with_context(|| format!("Failed to execute {} for {symbol}", outcome.action.kind()))?;

    info!(
        symbol,
        action = outcome.action.kind(),
        submitted = report.submitted,
        dry_run = report.dry_run,
        order_ids = ?report.order_ids,
        "Action handed to execution"
    );
    Ok(outcome)
}

fn pass_interval(secs: u64, start: Instant) -> Interval {
    let period = Duration::from_secs(secs.max(1));
    let mut interval = interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Run passes until `shutdown` resolves.
///
/// The latest config is read from `config_rx` before every pass. A changed poll
/// interval takes effect from the next tick. Pass failures are logged and the loop
/// keeps going.
///
/// # Errors
///
/// Pass failures are logged, not returned, so this only returns `Ok`.
pub async fn run_loop<P, E, S>(
    provider: &mut P,
    executor: &mut E,
    mut config_rx: watch::Receiver<AppConfig>,
    shutdown: S,
) -> Result<()>
where
    P: MarketProvider + ?Sized,
    E: ExecutionHandler + ?Sized,
    S: Future<Output = ()>,
{
    let initial = config_rx.borrow_and_update().clone();
    let mut period = initial.service.poll_interval_secs;
    let mut interval = pass_interval(period, Instant::now());

    info!(
        symbol = %initial.service.symbol,
        poll_secs = period,
        put_delta = initial.wheel.target_put_delta,
        call_delta = initial.wheel.target_call_delta,
        take_profit = %initial.wheel.take_profit_fraction,
        roll_dte = initial.wheel.roll_dte_threshold,
        "Wheel service started"
    );

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!("Shutdown requested, stopping pass loop");
                break;
            }
            _ = interval.tick() => {}
        }

        let config = config_rx.borrow_and_update().clone();
        if config.service.poll_interval_secs != period {
            period = config.service.poll_interval_secs;
            let secs = period.max(1);
            interval = pass_interval(period, Instant::now() + Duration::from_secs(secs));
            info!(poll_secs = period, "Poll interval changed");
        }

        match run_once(&mut *provider, &mut *executor, &config).await {
            Ok(outcome) => info!(
                symbol = %config.service.symbol,
                action = outcome.action.kind(),
                "Pass finished"
            ),
            Err(e) => {
                let chain = format!("{e:#}");
                error!(error = %chain, "Pass failed");
            }
        }
    }

    Ok(())
}
