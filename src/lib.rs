//! healthz - endpoint health checks for deployment gating.
//!
//! Probes a TCP, HTTP, or HTTPS endpoint either once or in a retrying loop
//! with capped exponential backoff. Intended for readiness gating in
//! deployment scripts: block until a dependency is reachable, or fail a
//! pipeline step when it is not.

pub mod backoff;
pub mod cli;
pub mod error;
pub mod probe;
pub mod runner;

pub use backoff::Backoff;
pub use error::ProbeError;
pub use probe::probe;
pub use runner::wait_until_healthy;
