pub mod naming;
mod target_resolver;

pub use target_resolver::{TargetResolver, MIN_TARGET_WEIGHT};
