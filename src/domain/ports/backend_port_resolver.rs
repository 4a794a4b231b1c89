//! Backend Port Resolver Port
//!
//! Supplies the backend port resolved for an ingress backend earlier in
//! the build, so pools referenced by targets carry the same name as the
//! pools emitted by the pool builder.

use crate::domain::entities::BackendIdentifier;

/// Lookup of the resolved backend port for a backend identifier.
pub trait BackendPortResolver: Send + Sync {
    /// Resolved port, or `None` when the backend was never paired.
    fn backend_port(&self, backend: &BackendIdentifier) -> Option<u16>;
}
