//! Print the effective configuration after all layers are applied.

use anyhow::{Context, Result};
use clap::Args;

use super::ConfigArgs;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ShowConfigArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run_show_config(args: ShowConfigArgs) -> Result<()> {
    let config = args.config.load()?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}
