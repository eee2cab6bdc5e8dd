//! CLI commands for the wheel bot.

pub mod pass;
pub mod pass_loop;
pub mod show_config;

pub use pass::{run_pass, PassArgs};
pub use pass_loop::{run_pass_loop, LoopArgs};
pub use show_config::{run_show_config, ShowConfigArgs};

use anyhow::Result;
use clap::Args;
use wheelbot_core::{AppConfig, ConfigLoader, DEFAULT_CONFIG_PATH};

/// Config source shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Profile overlay, read from `Wheel.{profile}.toml` next to the config file
    #[arg(long)]
    pub profile: Option<String>,

    /// Underlying symbol, overriding `service.symbol`
    #[arg(long)]
    pub symbol: Option<String>,
}

impl ConfigArgs {
    /// Layered configuration with command-line overrides applied.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = match &self.profile {
            Some(profile) => ConfigLoader::load_with_profile(&self.config, profile)?,
            None => ConfigLoader::load_from(&self.config)?,
        };
        if let Some(symbol) = &self.symbol {
            config.service.symbol = symbol.to_uppercase();
        }
        Ok(config)
    }
}
