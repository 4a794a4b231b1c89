mod backend_port_resolver;
mod policy_store;

pub use backend_port_resolver::BackendPortResolver;
pub use policy_store::{PolicyStore, StoreError};
