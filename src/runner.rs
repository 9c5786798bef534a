//! Retry loop around the probe primitive.

use std::time::Duration;

use tracing::{debug, info};

use crate::backoff::Backoff;
use crate::error::ProbeError;
use crate::probe::probe;

/// Probe `endpoint` until it is healthy, sleeping between failures
/// according to `backoff`.
///
/// Every failure is treated as "not yet healthy" and printed as it is
/// encountered, including structurally permanent ones such as an
/// unsupported scheme. With `max_attempts` unset the loop retries forever;
/// otherwise it gives up after that many failed probes and returns the
/// last error (which the caller prints, so each failure appears exactly
/// once).
pub async fn wait_until_healthy(
    endpoint: &str,
    timeout: Duration,
    mut backoff: Backoff,
    max_attempts: Option<u32>,
) -> Result<(), ProbeError> {
    let mut failures: u32 = 0;
    loop {
        match probe(endpoint, timeout).await {
            Ok(()) => {
                info!(%endpoint, attempts = failures + 1, "endpoint healthy");
                return Ok(());
            }
            Err(err) => {
                failures += 1;
                if let Some(limit) = max_attempts {
                    if failures >= limit {
                        info!(%endpoint, attempts = failures, "giving up");
                        return Err(err);
                    }
                }
                println!("{err}");
                let delay = backoff.next_delay();
                debug!(%endpoint, attempt = failures, ?delay, "probe failed, backing off");
                tokio::time::sleep(delay).await;
            }
        }
    }
}
