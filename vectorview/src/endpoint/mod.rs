//! Endpoint classes and runtime selection between the self-hosted stack and
//! the static fallback host.

mod resolver;
mod types;

pub use resolver::{EndpointResolver, DEFAULT_PROBE_TIMEOUT};
pub use types::{DeployContext, EndpointClass, EndpointSet, Endpoints};
