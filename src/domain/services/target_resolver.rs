//! Target Resolver Service
//!
//! Turns the targets declared by one `LoadDistributionPolicy` into
//! gateway targets pointing at backend address pools.
//! Pure domain logic: collaborators are passed in by the caller.

use crate::domain::entities::{
    BackendIdentifier, GatewayLoadDistributionTarget, LoadDistributionPolicy,
    LoadDistributionTargetProperties, WILDCARD_ETAG,
};
use crate::domain::services::naming;
use crate::domain::value_objects::{GatewayIdentifier, SubResource};
use std::collections::BTreeMap;

/// Smallest weight the gateway accepts for a target.
pub const MIN_TARGET_WEIGHT: i32 = 1;

/// Resolves policy targets for the backend a policy is attached to.
pub struct TargetResolver;

impl TargetResolver {
    /// Build the gateway targets of `policy`.
    ///
    /// # Arguments
    /// * `identifier` - Gateway the emitted identifiers belong to
    /// * `backend` - Backend bound to the policy
    /// * `policy` - The policy resource
    /// * `resolve_port` - Closure returning the resolved backend port of a backend
    ///
    /// # Returns
    /// One target per declared target with weight >= 1, in declaration order.
    /// An empty or all-invalid target list gives an empty vector.
    pub fn resolve_targets<F>(
        identifier: &GatewayIdentifier,
        backend: &BackendIdentifier,
        policy: &LoadDistributionPolicy,
        resolve_port: F,
    ) -> Vec<GatewayLoadDistributionTarget>
    where
        F: Fn(&BackendIdentifier) -> Option<u16>,
    {
        let backend_port = resolve_port(backend).unwrap_or_else(|| {
            tracing::debug!(backend = %backend, "no resolved backend port, naming pools with port 0");
            0
        });

        // Target names derive from the declaration index, so keying by index
        // dedups by name and keeps declaration order.
        let mut targets: BTreeMap<usize, GatewayLoadDistributionTarget> = BTreeMap::new();

        for (index, target) in policy.spec.targets.iter().enumerate() {
            if target.weight < MIN_TARGET_WEIGHT {
                tracing::debug!(
                    policy = policy.name(),
                    index,
                    weight = target.weight,
                    "skipping target with non-positive weight"
                );
                continue;
            }

            let service = &target.backend.service;
            let pool_name = naming::address_pool_name(
                &format!("{}-{}", backend.namespace, service.name),
                &service.port.as_port_str(),
                backend_port,
            );
            let target_name = naming::load_distribution_target_name(policy.name(), index);

            targets.insert(
                index,
                GatewayLoadDistributionTarget {
                    id: identifier.load_distribution_target_id(policy.name(), &target_name),
                    name: target_name,
                    etag: WILDCARD_ETAG.to_string(),
                    properties: LoadDistributionTargetProperties {
                        weight_per_server: target.weight,
                        backend_address_pool: SubResource::new(identifier.address_pool_id(&pool_name)),
                    },
                },
            );
        }

        targets.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PolicyTarget;
    use crate::domain::value_objects::ServiceBackendPort;

    // ===== Test Helpers =====

    fn gateway() -> GatewayIdentifier {
        GatewayIdentifier::new("sub", "rg", "gw")
    }

    fn backend() -> BackendIdentifier {
        BackendIdentifier::load_distribution_policy("ns1", "ing", "ldp1")
    }

    fn policy(targets: Vec<PolicyTarget>) -> LoadDistributionPolicy {
        LoadDistributionPolicy::new("ns1", "ldp1", targets)
    }

    fn resolve(policy: &LoadDistributionPolicy, port: Option<u16>) -> Vec<GatewayLoadDistributionTarget> {
        TargetResolver::resolve_targets(&gateway(), &backend(), policy, |_| port)
    }

    // ===== Weight Filtering Tests =====

    #[test]
    fn test_zero_weight_target_dropped() {
        let policy = policy(vec![
            PolicyTarget::new("svcA", ServiceBackendPort::number(80), 3),
            PolicyTarget::new("svcB", ServiceBackendPort::number(80), 0),
        ]);

        let targets = resolve(&policy, Some(8080));

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "ldp1-target-0");
        assert_eq!(targets[0].weight(), 3);
    }

    #[test]
    fn test_negative_weight_target_dropped() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::number(80), -5)]);

        assert!(resolve(&policy, Some(8080)).is_empty());
    }

    #[test]
    fn test_weight_one_is_kept() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::number(80), 1)]);

        assert_eq!(resolve(&policy, Some(8080)).len(), 1);
    }

    #[test]
    fn test_empty_target_list() {
        assert!(resolve(&policy(vec![]), Some(8080)).is_empty());
    }

    #[test]
    fn test_all_invalid_weights() {
        let policy = policy(vec![
            PolicyTarget::new("svcA", ServiceBackendPort::number(80), 0),
            PolicyTarget::new("svcB", ServiceBackendPort::number(80), -1),
        ]);

        assert!(resolve(&policy, Some(8080)).is_empty());
    }

    // ===== Naming Tests =====

    #[test]
    fn test_names_keep_declaration_index_after_rejection() {
        let policy = policy(vec![
            PolicyTarget::new("svcA", ServiceBackendPort::number(80), 0),
            PolicyTarget::new("svcB", ServiceBackendPort::number(80), 2),
            PolicyTarget::new("svcC", ServiceBackendPort::number(80), 0),
            PolicyTarget::new("svcD", ServiceBackendPort::number(80), 5),
        ]);

        let names: Vec<_> = resolve(&policy, Some(8080)).into_iter().map(|t| t.name).collect();

        assert_eq!(names, vec!["ldp1-target-1", "ldp1-target-3"]);
    }

    #[test]
    fn test_pool_reference_matches_pool_naming() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::number(80), 3)]);

        let targets = resolve(&policy, Some(8080));
        let expected = gateway().address_pool_id(&naming::address_pool_name("ns1-svcA", "80", 8080));

        assert_eq!(targets[0].backend_address_pool_id(), expected);
    }

    #[test]
    fn test_named_service_port_in_pool_name() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::named("http"), 3)]);

        let targets = resolve(&policy, Some(8080));

        assert!(targets[0].backend_address_pool_id().ends_with("/pool-ns1-svcA-http-bp-8080"));
    }

    #[test]
    fn test_missing_backend_port_names_pool_with_zero() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::number(80), 3)]);

        let targets = resolve(&policy, None);

        assert!(targets[0].backend_address_pool_id().ends_with("/pool-ns1-svcA-80-bp-0"));
    }

    #[test]
    fn test_target_id_and_etag() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::number(80), 3)]);

        let target = &resolve(&policy, Some(8080))[0];

        assert_eq!(
            target.id,
            gateway().load_distribution_target_id("ldp1", "ldp1-target-0")
        );
        assert!(target
            .id
            .ends_with("/loadDistributionPolicies/ldp1/loadDistributionTargets/ldp1-target-0"));
        assert_eq!(target.etag, "*");
    }

    #[test]
    fn test_output_in_declaration_order() {
        let targets: Vec<_> = (0..12)
            .map(|i| PolicyTarget::new(format!("svc{}", i), ServiceBackendPort::number(80), 1))
            .collect();

        let names: Vec<_> = resolve(&policy(targets), Some(80))
            .into_iter()
            .map(|t| t.name)
            .collect();

        let expected: Vec<_> = (0..12).map(|i| format!("ldp1-target-{}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_port_resolved_for_given_backend() {
        let policy = policy(vec![PolicyTarget::new("svcA", ServiceBackendPort::number(80), 3)]);
        let bound = backend();

        let targets = TargetResolver::resolve_targets(&gateway(), &bound, &policy, |b| {
            if *b == bound {
                Some(9000)
            } else {
                None
            }
        });

        assert!(targets[0].backend_address_pool_id().ends_with("-bp-9000"));
    }
}
