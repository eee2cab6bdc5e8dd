use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/Wheel.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering built-in defaults, the TOML file at `path`,
    /// `WHEEL_` environment variables, and the sibling `.json` file. Missing files
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or the wheel parameters are invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let figment = Self::base()
            .merge(Toml::file(path))
            .merge(Env::prefixed("WHEEL_").split("__"))
            .join(Json::file(path.with_extension("json")));

        Self::extract(&figment)
    }

    /// Loads configuration with a profile overlay (`Wheel.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or the wheel parameters are invalid.
    pub fn load_with_profile(path: impl AsRef<Path>, profile: &str) -> Result<AppConfig> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Wheel");
        let profile_path = path.with_file_name(format!("{stem}.{profile}.toml"));

        let figment = Self::base()
            .merge(Toml::file(path))
            .merge(Toml::file(profile_path))
            .merge(Env::prefixed("WHEEL_").split("__"))
            .join(Json::file(path.with_extension("json")));

        Self::extract(&figment)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }

    fn extract(figment: &Figment) -> Result<AppConfig> {
        let config: AppConfig = figment
            .extract()
            .context("Failed to extract wheel configuration")?;
        config
            .wheel
            .validate()
            .context("Invalid wheel configuration")?;
        Ok(config)
    }
}
