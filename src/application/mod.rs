//! Application Layer
//!
//! Use cases run once per gateway configuration build.

mod config_builder;
mod policy_aggregator;

pub use config_builder::{BuildContext, ConfigBuilder};
pub use policy_aggregator::PolicyAggregator;
