//! Shared types, configuration, and collaborator traits for the wheel bot.

pub mod action;
pub mod config;
pub mod config_loader;
pub mod config_watcher;
pub mod market;
pub mod position;
pub mod traits;

pub use action::{IdleReason, IntendedAction, OrderIntent, OrderSide};
pub use config::{AppConfig, ConfigError, DteRange, ExecutionConfig, ServiceConfig, WheelConfig};
pub use config_loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use config_watcher::ConfigWatcher;
pub use market::{ChainSnapshot, OptionContract, OptionQuote, OptionRight};
pub use position::{OpenLeg, PositionSnapshot, LOT_SIZE};
pub use traits::{ExecutionHandler, ExecutionReport, MarketProvider, Snapshot};
