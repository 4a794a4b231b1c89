//! Adapters Layer
//!
//! Inbound adapters feed a build; outbound adapters implement the domain ports.

pub mod inbound;
pub mod outbound;
