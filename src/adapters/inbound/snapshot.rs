//! Build Snapshot
//!
//! Inbound adapter reading everything one configuration build needs from a
//! JSON document: the backends found by the ingress scan (with their
//! resolved backend ports) and the load distribution policies in the cluster.

use crate::adapters::outbound::{DashMapPolicyStore, StaticBackendPortResolver};
use crate::domain::entities::{BackendIdentifier, LoadDistributionPolicy};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Errors raised while reading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A backend entry of the snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBackend {
    #[serde(flatten)]
    pub id: BackendIdentifier,
    /// Backend port resolved by the pool builder, if any
    #[serde(default)]
    pub backend_port: Option<u16>,
}

/// Inputs of one configuration build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSnapshot {
    #[serde(default)]
    pub backends: Vec<SnapshotBackend>,
    #[serde(default)]
    pub policies: Vec<LoadDistributionPolicy>,
}

/// Snapshot split into the collaborators of a build.
pub struct SnapshotParts {
    pub backend_ids: BTreeSet<BackendIdentifier>,
    pub policy_store: DashMapPolicyStore,
    pub port_resolver: StaticBackendPortResolver,
}

impl BuildSnapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse a snapshot file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Split into backend set, policy store and port resolver.
    ///
    /// Duplicate backends collapse into one entry; the last port wins.
    pub fn into_parts(self) -> SnapshotParts {
        let mut backend_ids = BTreeSet::new();
        let mut port_resolver = StaticBackendPortResolver::new();

        for backend in self.backends {
            if let Some(port) = backend.backend_port {
                port_resolver.insert(backend.id.clone(), port);
            }
            backend_ids.insert(backend.id);
        }

        SnapshotParts {
            backend_ids,
            policy_store: DashMapPolicyStore::from_policies(self.policies),
            port_resolver,
        }
    }
}
