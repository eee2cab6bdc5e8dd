use crate::config::AppConfig;
use anyhow::Result;
use notify::{Event, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

type ConfigReloader = Arc<dyn Fn() -> Result<AppConfig> + Send + Sync>;

/// Broadcasts configuration reloads to the pass loop.
///
/// Passes read the latest value from the receiver before they start, so a reload
/// never changes the parameters of a pass already in flight.
pub struct ConfigWatcher {
    tx: watch::Sender<AppConfig>,
    reloader: ConfigReloader,
}

impl ConfigWatcher {
    /// Creates a watcher whose reloads go through `reloader`.
    ///
    /// The reloader must apply the same layers and overrides as startup, or a
    /// file change silently drops them. Returns the watcher and a receiver for
    /// configuration updates.
    #[must_use]
    pub fn new<F>(
        initial_config: AppConfig,
        reloader: F,
    ) -> (Self, watch::Receiver<AppConfig>)
    where
        F: Fn() -> Result<AppConfig> + Send + Sync + 'static,
    {
        let (tx, rx) = watch::channel(initial_config);
        (
            Self {
                tx,
                reloader: Arc::new(reloader),
            },
            rx,
        )
    }

    /// Reloads and publishes the result.
    ///
    /// Invalid files are logged and the previous configuration stays active.
    pub fn reload(&self) -> bool {
        reload_into(&self.tx, &self.reloader)
    }

    /// Watches the configuration file for changes and broadcasts updates.
    ///
    /// # Errors
    ///
    /// Returns an error if file watching cannot be initiated or if the watcher task fails.
    pub async fn watch(&self, config_path: impl Into<PathBuf>) -> Result<()> {
        let tx = self.tx.clone();
        let reloader = Arc::clone(&self.reloader);
        let config_path: PathBuf = config_path.into();

        tokio::task::spawn_blocking(move || {
            let (notify_tx, notify_rx) = std::sync::mpsc::channel();

            let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            })?;

            watcher.watch(&config_path, RecursiveMode::NonRecursive)?;

            for event in notify_rx {
                if event.kind.is_modify() {
                    tracing::info!(path = %config_path.display(), "Config file changed, reloading...");
                    reload_into(&tx, &reloader);
                }
            }

            Ok::<_, anyhow::Error>(())
        })
        .await??;

        Ok(())
    }
}

fn reload_into(tx: &watch::Sender<AppConfig>, reloader: &ConfigReloader) -> bool {
    match reloader() {
        Ok(new_config) => {
            let _ = tx.send(new_config);
            tracing::info!("Config reloaded successfully");
            true
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Failed to reload config, keeping previous");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::ConfigLoader;

    #[test]
    fn reload_publishes_new_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("Wheel.toml", "[wheel]\nquantity = 4\n")?;

            let (watcher, rx) =
                ConfigWatcher::new(AppConfig::default(), || ConfigLoader::load_from("Wheel.toml"));
            assert!(watcher.reload());
            assert_eq!(rx.borrow().wheel.quantity, 4);
            Ok(())
        });
    }

    #[test]
    fn invalid_reload_keeps_previous_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("Wheel.toml", "[wheel]\nquantity = 0\n")?;

            let (watcher, rx) =
                ConfigWatcher::new(AppConfig::default(), || ConfigLoader::load_from("Wheel.toml"));
            assert!(!watcher.reload());
            assert_eq!(rx.borrow().wheel.quantity, 1);
            Ok(())
        });
    }

    #[test]
    fn reload_keeps_profile_and_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("Wheel.toml", "[wheel]\nroll_dte_threshold = 5\n")?;
            jail.create_file("Wheel.aggressive.toml", "[wheel]\nroll_dte_threshold = 10\n")?;

            let load = || -> Result<AppConfig> {
                let mut config = ConfigLoader::load_with_profile("Wheel.toml", "aggressive")?;
                config.service.symbol = "QQQ".to_string();
                config.service.poll_interval_secs = 30;
                Ok(config)
            };
            let initial = load().expect("initial config");
            let (watcher, rx) = ConfigWatcher::new(initial, load);

            jail.create_file("Wheel.toml", "[wheel]\nroll_dte_threshold = 5\nquantity = 2\n")?;
            assert!(watcher.reload());

            let config = rx.borrow();
            assert_eq!(config.wheel.quantity, 2);
            assert_eq!(config.wheel.roll_dte_threshold, 10);
            assert_eq!(config.service.symbol, "QQQ");
            assert_eq!(config.service.poll_interval_secs, 30);
            Ok(())
        });
    }
}
