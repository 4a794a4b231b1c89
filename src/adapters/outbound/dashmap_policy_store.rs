//! DashMap Policy Store
//!
//! Implements PolicyStore using DashMap for lock-free concurrent access.
//! Policies can be inserted directly or loaded from a JSON file holding a
//! Kubernetes `List`, a bare array, or a single resource.

use crate::domain::entities::LoadDistributionPolicy;
use crate::domain::ports::{PolicyStore, StoreError};
use dashmap::DashMap;
use serde::Deserialize;
use std::path::Path;

/// Accepted on-disk shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyDocument {
    List { items: Vec<LoadDistributionPolicy> },
    Array(Vec<LoadDistributionPolicy>),
    Single(LoadDistributionPolicy),
}

impl PolicyDocument {
    fn into_policies(self) -> Vec<LoadDistributionPolicy> {
        match self {
            Self::List { items } => items,
            Self::Array(items) => items,
            Self::Single(policy) => vec![policy],
        }
    }
}

/// DashMap-backed policy store keyed by (namespace, name).
pub struct DashMapPolicyStore {
    policies: DashMap<(String, String), LoadDistributionPolicy>,
}

impl DashMapPolicyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            policies: DashMap::new(),
        }
    }

    /// Create a store holding `policies`.
    pub fn from_policies(policies: Vec<LoadDistributionPolicy>) -> Self {
        let store = Self::new();
        for policy in policies {
            store.insert(policy);
        }
        store
    }

    /// Insert or replace a policy. Returns the previous version, if any.
    pub fn insert(&self, policy: LoadDistributionPolicy) -> Option<LoadDistributionPolicy> {
        let key = (policy.namespace().to_string(), policy.name().to_string());
        self.policies.insert(key, policy)
    }

    /// Remove a policy.
    pub fn remove(&self, namespace: &str, name: &str) -> Option<LoadDistributionPolicy> {
        self.policies
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|(_, policy)| policy)
    }

    /// Number of stored policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Load policies from a JSON file, adding them to the store.
    ///
    /// Returns how many policies were read.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let policies = serde_json::from_str::<PolicyDocument>(&raw)?.into_policies();
        let count = policies.len();
        for policy in policies {
            self.insert(policy);
        }

        tracing::info!(path = %path.display(), count, "loaded load distribution policies");
        Ok(count)
    }
}

impl Default for DashMapPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyStore for DashMapPolicyStore {
    fn get(&self, namespace: &str, name: &str) -> Result<LoadDistributionPolicy, StoreError> {
        self.policies
            .get(&(namespace.to_string(), name.to_string()))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::PolicyTarget;
    use crate::domain::value_objects::ServiceBackendPort;
    use std::io::Write;

    fn policy(namespace: &str, name: &str) -> LoadDistributionPolicy {
        LoadDistributionPolicy::new(
            namespace,
            name,
            vec![PolicyTarget::new("svc", ServiceBackendPort::number(80), 1)],
        )
    }

    fn write_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    // ===== Lookup Tests =====

    #[test]
    fn test_get_existing() {
        let store = DashMapPolicyStore::from_policies(vec![policy("ns1", "ldp1")]);

        let found = store.get("ns1", "ldp1").unwrap();

        assert_eq!(found.name(), "ldp1");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = DashMapPolicyStore::new();

        let result = store.get("ns1", "ldp1");

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_lookup_is_namespace_scoped() {
        let store = DashMapPolicyStore::from_policies(vec![policy("ns1", "ldp1")]);

        assert!(store.get("ns2", "ldp1").is_err());
    }

    #[test]
    fn test_not_found_message_names_policy() {
        let store = DashMapPolicyStore::new();

        let err = store.get("ns1", "ldp1").unwrap_err();

        assert_eq!(err.to_string(), "load distribution policy ns1/ldp1 not found");
    }

    // ===== Mutation Tests =====

    #[test]
    fn test_insert_replaces() {
        let store = DashMapPolicyStore::new();
        assert!(store.insert(policy("ns1", "ldp1")).is_none());

        let replaced = store.insert(LoadDistributionPolicy::new("ns1", "ldp1", vec![]));

        assert!(replaced.is_some());
        assert_eq!(store.len(), 1);
        assert!(store.get("ns1", "ldp1").unwrap().spec.targets.is_empty());
    }

    #[test]
    fn test_remove() {
        let store = DashMapPolicyStore::from_policies(vec![policy("ns1", "ldp1")]);

        assert!(store.remove("ns1", "ldp1").is_some());
        assert!(store.is_empty());
        assert!(store.remove("ns1", "ldp1").is_none());
    }

    // ===== File Loading Tests =====

    #[test]
    fn test_load_kubernetes_list() {
        let file = write_json(
            r#"{
                "apiVersion": "v1",
                "kind": "List",
                "items": [
                    {"metadata": {"name": "a", "namespace": "ns1"}, "spec": {"targets": []}},
                    {"metadata": {"name": "b", "namespace": "ns1"}}
                ]
            }"#,
        );
        let store = DashMapPolicyStore::new();

        assert_eq!(store.load_from_file(file.path()).unwrap(), 2);
        assert!(store.get("ns1", "a").is_ok());
        assert!(store.get("ns1", "b").is_ok());
    }

    #[test]
    fn test_load_bare_array() {
        let file = write_json(r#"[{"metadata": {"name": "a", "namespace": "ns1"}}]"#);
        let store = DashMapPolicyStore::new();

        assert_eq!(store.load_from_file(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_load_single_resource() {
        let file = write_json(
            r#"{"kind": "LoadDistributionPolicy", "metadata": {"name": "a", "namespace": "ns1"}}"#,
        );
        let store = DashMapPolicyStore::new();

        assert_eq!(store.load_from_file(file.path()).unwrap(), 1);
        assert!(store.get("ns1", "a").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DashMapPolicyStore::new();

        let result = store.load_from_file(dir.path().join("nope.json"));

        assert!(matches!(result, Err(StoreError::Read { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_json("{not json");
        let store = DashMapPolicyStore::new();

        let result = store.load_from_file(file.path());

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }
}
