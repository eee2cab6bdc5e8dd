//! Run passes on an interval until Ctrl-C.

use anyhow::Result;
use clap::Args;
use tracing::{error, info};
use wheelbot_core::{AppConfig, ConfigWatcher};
use wheelbot_ib::{JsonSnapshotProvider, PaperExecution};
use wheelbot_options_manager::service;

use super::ConfigArgs;

/// Arguments for the loop command.
#[derive(Args, Debug)]
pub struct LoopArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// JSON snapshot, re-read before every pass.
    #[arg(short, long)]
    pub snapshot: String,

    /// Seconds between passes, overriding `service.poll_interval_secs`.
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Reload the config file when it changes.
    #[arg(long)]
    pub watch_config: bool,

    /// Log the orders instead of paper-filling them.
    #[arg(long)]
    pub dry: bool,
}

impl LoopArgs {
    /// Builds the loop's config: file layers, profile, then the loop's own flags.
    ///
    /// Called at startup and again on every watched reload, so an edit to the
    /// file never drops a command-line override.
    fn reloader(&self) -> impl Fn() -> Result<AppConfig> + Send + Sync + 'static {
        let args = self.config.clone();
        let (interval, dry) = (self.interval, self.dry);
        move || {
            let mut config = args.load()?;
            if let Some(secs) = interval {
                config.service.poll_interval_secs = secs;
            }
            if dry {
                config.execution.dry_run = true;
            }
            Ok(config)
        }
    }
}

/// Runs the pass loop with paper execution.
pub async fn run_pass_loop(args: LoopArgs) -> Result<()> {
    let reload = args.reloader();
    let config = reload()?;

    let mut provider = JsonSnapshotProvider::new(&args.snapshot);
    let mut executor = PaperExecution::new(config.execution.clone());
    let (watcher, config_rx) = ConfigWatcher::new(config, reload);

    if args.watch_config {
        let path = args.config.config.clone();
        info!(path = %path, "Watching config for changes");
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(path).await {
                error!(error = %e, "Config watcher stopped");
            }
        });
    }

    service::run_loop(&mut provider, &mut executor, config_rx, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
    })
    .await?;

    info!(
        fills = executor.fill_count(),
        net_cash = %executor.net_cash(),
        "Paper session finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reload_keeps_profile_and_flags() {
        let dir = tempfile::tempdir().expect("temp dir");
        let base = dir.path().join("Wheel.toml");
        fs::write(&base, "[wheel]\nroll_dte_threshold = 5\n").expect("write base");
        fs::write(
            dir.path().join("Wheel.aggressive.toml"),
            "[wheel]\nroll_dte_threshold = 10\n",
        )
        .expect("write profile");

        let args = LoopArgs {
            config: ConfigArgs {
                config: base.to_string_lossy().into_owned(),
                profile: Some("aggressive".to_string()),
                symbol: Some("qqq".to_string()),
            },
            snapshot: "unused.json".to_string(),
            interval: Some(30),
            watch_config: true,
            dry: true,
        };
        let reload = args.reloader();
        let initial = reload().expect("startup config");
        let (watcher, rx) = ConfigWatcher::new(initial, reload);

        fs::write(&base, "[wheel]\nroll_dte_threshold = 5\nquantity = 2\n").expect("edit base");
        assert!(watcher.reload());

        let config = rx.borrow();
        assert_eq!(config.wheel.quantity, 2);
        assert_eq!(config.wheel.roll_dte_threshold, 10);
        assert_eq!(config.service.symbol, "QQQ");
        assert_eq!(config.service.poll_interval_secs, 30);
        assert!(config.execution.dry_run);
    }
}
