mod snapshot;

pub use snapshot::{BuildSnapshot, SnapshotBackend, SnapshotError, SnapshotParts};
