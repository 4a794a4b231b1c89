mod dashmap_policy_store;
mod static_port_resolver;

pub use dashmap_policy_store::DashMapPolicyStore;
pub use static_port_resolver::StaticBackendPortResolver;
