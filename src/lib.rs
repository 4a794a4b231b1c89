//! ldp-builder Library
//!
//! Turns `LoadDistributionPolicy` resources referenced by ingress backends
//! into the load distribution fragment of a gateway configuration.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::inbound::BuildSnapshot;
pub use adapters::outbound::{DashMapPolicyStore, StaticBackendPortResolver};
pub use application::{BuildContext, ConfigBuilder, PolicyAggregator};
pub use config::load_config;
pub use domain::entities::{
    BackendIdentifier, GatewayConfig, GatewayLoadDistributionPolicy, GatewayLoadDistributionTarget,
    LoadDistributionPolicy, PolicyTarget,
};
pub use domain::ports::{BackendPortResolver, PolicyStore, StoreError};
pub use domain::services::TargetResolver;
pub use domain::value_objects::{GatewayIdentifier, ServiceBackendPort};
