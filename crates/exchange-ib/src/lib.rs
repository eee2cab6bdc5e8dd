//! Interactive Brokers-shaped execution side of the wheel bot.
//!
//! Turns intended actions into routed, GTC, tagged limit orders, and provides
//! the paper execution shim and file-backed snapshot provider used to run the
//! strategy without a live gateway.

pub mod orders;
pub mod paper;
pub mod snapshot;
pub mod types;

pub use orders::{orders_for_action, orders_with_ref, ORDER_REF};
pub use paper::{simulate_fill, PaperExecution};
pub use snapshot::JsonSnapshotProvider;
pub use types::{OptionsContract, OptionsFill, OptionsOrder, TimeInForce};
