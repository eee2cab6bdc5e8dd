//! Wheel strategy decision core.
//!
//! Each pass:
//! - Classifies holdings into FLAT / SHORT_PUT / ASSIGNED_SHARES / SHORT_CALL
//! - Manages an open short leg (take-profit first, then roll near expiry)
//! - Otherwise sells a new put or covered call picked by model delta
//! - Prices every opening order off the model value plus a markup
//!
//! The pass itself is pure; [`service`] wires it to data and execution.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod order_pricer;
pub mod pricing;
pub mod rolls;
pub mod selector;
pub mod service;
pub mod targets;
pub mod types;
pub mod volatility;

pub use engine::{run_pass, StrategyEngine};
pub use error::WheelError;
pub use order_pricer::{price_order, OrderPricer, DEFAULT_TICK};
pub use pricing::{BlackScholes, PricingInputs, PricingModel};
pub use selector::ChainSelector;
pub use types::{PassOutcome, PositionState, Selection, SelectionCriteria};
