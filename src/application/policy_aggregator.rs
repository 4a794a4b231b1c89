//! Policy Aggregator - Load distribution use case
//!
//! Collects the `LoadDistributionPolicy` resources referenced by the
//! backends of one configuration build and turns them into gateway
//! policies. The result is memoized for the lifetime of the aggregator,
//! which is owned by exactly one build.

use crate::domain::entities::{
    BackendIdentifier, GatewayLoadDistributionPolicy, LoadDistributionPolicyProperties,
};
use crate::domain::ports::{BackendPortResolver, PolicyStore};
use crate::domain::services::{naming, TargetResolver};
use crate::domain::value_objects::{GatewayIdentifier, LoadDistributionAlgorithm};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds and caches the load distribution policies of one build.
///
/// Create one per configuration build. Sharing an aggregator between
/// builds would hand the second build the first build's policies.
pub struct PolicyAggregator {
    policy_store: Arc<dyn PolicyStore>,
    port_resolver: Arc<dyn BackendPortResolver>,
    identifier: GatewayIdentifier,
    cache: Option<Vec<GatewayLoadDistributionPolicy>>,
}

impl PolicyAggregator {
    /// Create an aggregator with an empty cache.
    pub fn new(
        policy_store: Arc<dyn PolicyStore>,
        port_resolver: Arc<dyn BackendPortResolver>,
        identifier: GatewayIdentifier,
    ) -> Self {
        Self {
            policy_store,
            port_resolver,
            identifier,
            cache: None,
        }
    }

    /// Gateway policies for the given backends, sorted by name.
    ///
    /// The first call computes and caches the list; every later call
    /// returns the cached list untouched, whatever backends are passed.
    /// Never fails: a policy that cannot be fetched is logged and left out.
    pub fn build_policies<'a, I>(&mut self, backends: I) -> &[GatewayLoadDistributionPolicy]
    where
        I: IntoIterator<Item = &'a BackendIdentifier>,
    {
        if self.cache.is_none() {
            let policies = self.collect_policies(backends);
            self.cache = Some(policies);
        }

        self.cache.as_deref().unwrap_or_default()
    }

    /// The cached list, if `build_policies` already ran.
    pub fn cached(&self) -> Option<&[GatewayLoadDistributionPolicy]> {
        self.cache.as_deref()
    }

    fn collect_policies<'a, I>(&self, backends: I) -> Vec<GatewayLoadDistributionPolicy>
    where
        I: IntoIterator<Item = &'a BackendIdentifier>,
    {
        let mut by_name: HashMap<String, GatewayLoadDistributionPolicy> = HashMap::new();

        for backend in backends {
            let Some(policy_name) = backend.policy_name() else {
                continue;
            };

            // Keyed on the bare policy name: the first backend to reference
            // a name wins, even across namespaces.
            if by_name.contains_key(policy_name) {
                continue;
            }

            let policy = match self.policy_store.get(&backend.namespace, policy_name) {
                Ok(policy) => policy,
                Err(e) => {
                    tracing::error!(
                        namespace = %backend.namespace,
                        name = policy_name,
                        error = %e,
                        "unable to fetch load distribution policy"
                    );
                    continue;
                }
            };

            let resource_name = naming::load_distribution_name(&backend.namespace, policy_name);
            let targets = TargetResolver::resolve_targets(
                &self.identifier,
                backend,
                &policy,
                |b| self.port_resolver.backend_port(b),
            );

            tracing::debug!(
                policy = %resource_name,
                targets = targets.len(),
                declared = policy.spec.targets.len(),
                "resolved load distribution policy"
            );

            by_name.insert(
                policy_name.to_string(),
                GatewayLoadDistributionPolicy {
                    id: self.identifier.load_distribution_policy_id(&resource_name),
                    name: resource_name,
                    properties: LoadDistributionPolicyProperties {
                        load_distribution_algorithm: LoadDistributionAlgorithm::RoundRobin,
                        load_distribution_targets: targets,
                    },
                },
            );
        }

        let mut policies: Vec<_> = by_name.into_values().collect();
        policies.sort_by(|a, b| a.name.cmp(&b.name));
        policies
    }
}
