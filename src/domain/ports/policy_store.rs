//! Policy Store Port
//!
//! Defines the interface for reading `LoadDistributionPolicy` resources.
//! Implementations may be backed by an informer cache, a file, or memory.

use crate::domain::entities::LoadDistributionPolicy;
use std::path::PathBuf;

/// Errors returned when a policy cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("load distribution policy {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse policies: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read access to the cluster's load distribution policies.
///
/// This is an outbound port. Lookups are synchronous; callers treat
/// every error as "this policy is unavailable for the current build".
pub trait PolicyStore: Send + Sync {
    /// Get the policy `name` in `namespace`.
    fn get(&self, namespace: &str, name: &str) -> Result<LoadDistributionPolicy, StoreError>;
}
