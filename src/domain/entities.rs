//! Domain Entities - Core business objects
//!
//! Source side: backends of the ingress configuration and the
//! `LoadDistributionPolicy` resources they may point at.
//! Gateway side: the policy and target objects handed to the provider.

use crate::domain::value_objects::{LoadDistributionAlgorithm, ServiceBackendPort, SubResource};
use serde::{Deserialize, Serialize};

/// API group of the `LoadDistributionPolicy` custom resource.
pub const LOAD_DISTRIBUTION_POLICY_API_GROUP: &str = "appgw.ingress.azure.io";

/// Kind of the `LoadDistributionPolicy` custom resource.
pub const LOAD_DISTRIBUTION_POLICY_KIND: &str = "LoadDistributionPolicy";

/// Etag sent on every emitted target.
pub const WILDCARD_ETAG: &str = "*";

/// A Kubernetes service referenced by name and port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceReference {
    pub name: String,
    #[serde(default)]
    pub port: ServiceBackendPort,
}

/// Reference to a typed object in the same namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedLocalObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
    pub kind: String,
    pub name: String,
}

/// What an ingress path routes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngressBackend {
    /// A plain service backend
    Service(ServiceReference),
    /// A custom resource backend (e.g. a load distribution policy)
    Resource(TypedLocalObjectReference),
}

/// One backend of the current configuration build.
///
/// Several ingresses (or rules of one ingress) may route to the same
/// policy, so the same policy name can appear on many identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BackendIdentifier {
    /// Namespace of the ingress that declared the backend
    pub namespace: String,
    /// Name of the ingress that declared the backend
    #[serde(default)]
    pub ingress: String,
    /// The backend reference itself
    pub backend: IngressBackend,
}

impl BackendIdentifier {
    pub fn new(namespace: impl Into<String>, ingress: impl Into<String>, backend: IngressBackend) -> Self {
        Self {
            namespace: namespace.into(),
            ingress: ingress.into(),
            backend,
        }
    }

    /// Backend routing to a service.
    pub fn service(
        namespace: impl Into<String>,
        ingress: impl Into<String>,
        service: impl Into<String>,
        port: ServiceBackendPort,
    ) -> Self {
        Self::new(
            namespace,
            ingress,
            IngressBackend::Service(ServiceReference {
                name: service.into(),
                port,
            }),
        )
    }

    /// Backend routing to a load distribution policy.
    pub fn load_distribution_policy(
        namespace: impl Into<String>,
        ingress: impl Into<String>,
        policy: impl Into<String>,
    ) -> Self {
        Self::new(
            namespace,
            ingress,
            IngressBackend::Resource(TypedLocalObjectReference {
                api_group: Some(LOAD_DISTRIBUTION_POLICY_API_GROUP.to_string()),
                kind: LOAD_DISTRIBUTION_POLICY_KIND.to_string(),
                name: policy.into(),
            }),
        )
    }

    /// Whether this backend is bound to a `LoadDistributionPolicy`.
    pub fn is_policy_bound(&self) -> bool {
        match &self.backend {
            IngressBackend::Resource(resource) => {
                resource.kind == LOAD_DISTRIBUTION_POLICY_KIND
                    && resource
                        .api_group
                        .as_deref()
                        .map_or(true, |group| group == LOAD_DISTRIBUTION_POLICY_API_GROUP)
            }
            IngressBackend::Service(_) => false,
        }
    }

    /// Name of the referenced policy, if policy-bound.
    pub fn policy_name(&self) -> Option<&str> {
        match &self.backend {
            IngressBackend::Resource(resource) if self.is_policy_bound() => Some(&resource.name),
            _ => None,
        }
    }
}

impl std::fmt::Display for BackendIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            IngressBackend::Service(svc) => {
                write!(f, "{}/{}:{}", self.namespace, svc.name, svc.port)
            }
            IngressBackend::Resource(res) => write!(f, "{}/{}/{}", self.namespace, res.kind, res.name),
        }
    }
}

/// Object metadata subset we care about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Backend of a policy target. Only services are supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTargetBackend {
    pub service: ServiceReference,
}

/// One weighted destination declared by a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTarget {
    /// Informational role label ("active", "canary", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Relative weight. The gateway rejects values below 1.
    #[serde(default)]
    pub weight: i32,
    pub backend: PolicyTargetBackend,
}

impl PolicyTarget {
    pub fn new(service: impl Into<String>, port: ServiceBackendPort, weight: i32) -> Self {
        Self {
            role: None,
            weight,
            backend: PolicyTargetBackend {
                service: ServiceReference {
                    name: service.into(),
                    port,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDistributionPolicySpec {
    #[serde(default)]
    pub targets: Vec<PolicyTarget>,
}

/// The `LoadDistributionPolicy` custom resource as read from the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDistributionPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: LoadDistributionPolicySpec,
}

impl LoadDistributionPolicy {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, targets: Vec<PolicyTarget>) -> Self {
        Self {
            api_version: Some(format!("{}/v1beta1", LOAD_DISTRIBUTION_POLICY_API_GROUP)),
            kind: Some(LOAD_DISTRIBUTION_POLICY_KIND.to_string()),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: namespace.into(),
            },
            spec: LoadDistributionPolicySpec { targets },
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDistributionTargetProperties {
    pub weight_per_server: i32,
    pub backend_address_pool: SubResource,
}

/// A weighted target as the gateway expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayLoadDistributionTarget {
    pub name: String,
    pub id: String,
    pub etag: String,
    pub properties: LoadDistributionTargetProperties,
}

impl GatewayLoadDistributionTarget {
    pub fn weight(&self) -> i32 {
        self.properties.weight_per_server
    }

    pub fn backend_address_pool_id(&self) -> &str {
        &self.properties.backend_address_pool.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadDistributionPolicyProperties {
    pub load_distribution_algorithm: LoadDistributionAlgorithm,
    pub load_distribution_targets: Vec<GatewayLoadDistributionTarget>,
}

/// A load distribution policy as the gateway expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayLoadDistributionPolicy {
    pub name: String,
    pub id: String,
    pub properties: LoadDistributionPolicyProperties,
}

impl GatewayLoadDistributionPolicy {
    pub fn targets(&self) -> &[GatewayLoadDistributionTarget] {
        &self.properties.load_distribution_targets
    }
}

/// The gateway configuration document assembled during one build.
///
/// Only the load distribution fragment is produced here; the rest of
/// the document belongs to other build steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub load_distribution_policies: Vec<GatewayLoadDistributionPolicy>,
}
