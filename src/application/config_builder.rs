//! Config Builder - Gateway configuration build
//!
//! One `ConfigBuilder` per build: it owns the build context, a fresh
//! `PolicyAggregator` (and so a fresh memo cache) and the gateway
//! document the build steps write into.

use crate::application::PolicyAggregator;
use crate::domain::entities::{BackendIdentifier, GatewayConfig, GatewayLoadDistributionPolicy};
use crate::domain::ports::{BackendPortResolver, PolicyStore};
use crate::domain::value_objects::GatewayIdentifier;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Inputs shared by the steps of one build.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Every backend found while scanning ingresses
    pub backend_ids: BTreeSet<BackendIdentifier>,
    /// Namespaces this build is limited to; empty means all
    pub watch_namespaces: Vec<String>,
}

impl BuildContext {
    pub fn new(backend_ids: BTreeSet<BackendIdentifier>) -> Self {
        Self {
            backend_ids,
            watch_namespaces: Vec::new(),
        }
    }

    /// Restrict the build to the given namespaces.
    pub fn with_watch_namespaces(mut self, namespaces: Vec<String>) -> Self {
        self.watch_namespaces = namespaces;
        self
    }

    /// Backends relevant to this build, in identifier order.
    pub fn backend_ids_filtered(&self) -> impl Iterator<Item = &BackendIdentifier> {
        self.backend_ids.iter().filter(move |backend| {
            self.watch_namespaces.is_empty() || self.watch_namespaces.contains(&backend.namespace)
        })
    }
}

/// Assembles the gateway configuration for one build.
pub struct ConfigBuilder {
    context: BuildContext,
    aggregator: PolicyAggregator,
    gateway: GatewayConfig,
}

impl ConfigBuilder {
    /// Start a new build.
    pub fn new(
        context: BuildContext,
        identifier: GatewayIdentifier,
        policy_store: Arc<dyn PolicyStore>,
        port_resolver: Arc<dyn BackendPortResolver>,
    ) -> Self {
        Self {
            context,
            aggregator: PolicyAggregator::new(policy_store, port_resolver, identifier),
            gateway: GatewayConfig::default(),
        }
    }

    /// Load distribution policies of this build (memoized).
    pub fn load_distribution_policies(&mut self) -> &[GatewayLoadDistributionPolicy] {
        self.aggregator.build_policies(self.context.backend_ids_filtered())
    }

    /// Build step writing the load distribution policies into the document.
    pub fn load_distribution_policy(&mut self) -> &mut Self {
        let policies = self.load_distribution_policies().to_vec();

        tracing::info!(count = policies.len(), "load distribution policies ready");
        self.gateway.load_distribution_policies = policies;
        self
    }

    /// The gateway document built so far.
    pub fn gateway(&self) -> &GatewayConfig {
        &self.gateway
    }

    /// Finish the build.
    pub fn build(self) -> GatewayConfig {
        self.gateway
    }
}
