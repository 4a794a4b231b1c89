//! Static Backend Port Resolver
//!
//! Implements BackendPortResolver over a map filled once per build,
//! typically from the service/backend port pairs resolved by the pool builder.

use crate::domain::entities::BackendIdentifier;
use crate::domain::ports::BackendPortResolver;
use std::collections::HashMap;

/// Map-backed backend port resolver.
#[derive(Debug, Clone, Default)]
pub struct StaticBackendPortResolver {
    ports: HashMap<BackendIdentifier, u16>,
}

impl StaticBackendPortResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the resolved port of `backend`.
    pub fn insert(&mut self, backend: BackendIdentifier, port: u16) -> Option<u16> {
        self.ports.insert(backend, port)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl FromIterator<(BackendIdentifier, u16)> for StaticBackendPortResolver {
    fn from_iter<T: IntoIterator<Item = (BackendIdentifier, u16)>>(iter: T) -> Self {
        Self {
            ports: iter.into_iter().collect(),
        }
    }
}

impl BackendPortResolver for StaticBackendPortResolver {
    fn backend_port(&self, backend: &BackendIdentifier) -> Option<u16> {
        self.ports.get(backend).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_backend() {
        let backend = BackendIdentifier::load_distribution_policy("ns1", "ing", "ldp1");
        let resolver: StaticBackendPortResolver = [(backend.clone(), 8080)].into_iter().collect();

        assert_eq!(resolver.backend_port(&backend), Some(8080));
    }

    #[test]
    fn test_unknown_backend_is_none() {
        let resolver = StaticBackendPortResolver::new();
        let backend = BackendIdentifier::load_distribution_policy("ns1", "ing", "ldp1");

        assert_eq!(resolver.backend_port(&backend), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let backend = BackendIdentifier::load_distribution_policy("ns1", "ing", "ldp1");
        let mut resolver = StaticBackendPortResolver::new();

        assert_eq!(resolver.insert(backend.clone(), 80), None);
        assert_eq!(resolver.insert(backend.clone(), 443), Some(80));
        assert_eq!(resolver.backend_port(&backend), Some(443));
        assert_eq!(resolver.len(), 1);
    }
}
