//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Port of a referenced Kubernetes service.
///
/// Mirrors `ServiceBackendPort`: exactly one of `name` or `number`
/// is expected to be set. When both are present the name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceBackendPort {
    /// Named port on the service (e.g. "http")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Numeric port on the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
}

impl ServiceBackendPort {
    /// Port referenced by number.
    pub fn number(number: i32) -> Self {
        Self {
            name: None,
            number: Some(number),
        }
    }

    /// Port referenced by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: None,
        }
    }

    /// String form used when naming backend address pools.
    ///
    /// A non-empty name is used verbatim, otherwise the number
    /// (or `0` when neither is set).
    pub fn as_port_str(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.number.unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Display for ServiceBackendPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_port_str())
    }
}

/// Algorithm the gateway uses to spread requests across targets.
///
/// Only weighted round robin is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadDistributionAlgorithm {
    #[default]
    RoundRobin,
}

/// Reference to another gateway sub-resource by identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResource {
    pub id: String,
}

impl SubResource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Coordinates of the gateway whose sub-resource identifiers we emit.
///
/// Every component that emits provider identifiers in one build must
/// use the same `GatewayIdentifier`, otherwise cross references dangle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayIdentifier {
    pub subscription_id: String,
    pub resource_group: String,
    pub gateway_name: String,
}

impl GatewayIdentifier {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        gateway_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            gateway_name: gateway_name.into(),
        }
    }

    /// Identifier of a sub-resource of the gateway.
    pub fn gateway_resource_id(&self, sub_resource_kind: &str, resource_name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/applicationGateways/{}/{}/{}",
            self.subscription_id,
            self.resource_group,
            self.gateway_name,
            sub_resource_kind,
            resource_name
        )
    }

    /// Identifier of a backend address pool.
    pub fn address_pool_id(&self, pool_name: &str) -> String {
        self.gateway_resource_id("backendAddressPools", pool_name)
    }

    /// Identifier of a load distribution policy.
    pub fn load_distribution_policy_id(&self, policy_name: &str) -> String {
        self.gateway_resource_id("loadDistributionPolicies", policy_name)
    }

    /// Identifier of a target nested under a load distribution policy.
    pub fn load_distribution_target_id(&self, policy_name: &str, target_name: &str) -> String {
        self.gateway_resource_id(
            "loadDistributionPolicies",
            &format!("{}/loadDistributionTargets/{}", policy_name, target_name),
        )
    }
}
