//! Scheme-dispatched reachability probes.
//!
//! One probe is one network connection: `tcp://` endpoints get a dial and
//! an immediate close, `http://` and `https://` endpoints get a GET with
//! 2xx treated as healthy. Each call builds its own HTTP client so nothing
//! is pooled or reused across attempts.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;
use url::Url;

use crate::error::ProbeError;

/// Probe `endpoint` once with a per-attempt `timeout`.
///
/// The endpoint is parsed on every call; a malformed URL or a scheme other
/// than `tcp`, `http`, or `https` fails before any network I/O happens.
pub async fn probe(endpoint: &str, timeout: Duration) -> Result<(), ProbeError> {
    let url = Url::parse(endpoint).map_err(|e| ProbeError::invalid(endpoint, e))?;

    match url.scheme() {
        "tcp" => tcp_probe(&url, timeout).await,
        "http" | "https" => http_probe(url, timeout).await,
        other => Err(ProbeError::UnsupportedScheme(other.to_string())),
    }
}

/// Dial `host:port` and close the connection as soon as it is established.
async fn tcp_probe(url: &Url, timeout: Duration) -> Result<(), ProbeError> {
    let host = url
        .host_str()
        .ok_or_else(|| ProbeError::invalid(url.as_str(), "missing host"))?;
    let port = url
        .port()
        .ok_or_else(|| ProbeError::invalid(url.as_str(), "missing port"))?;

    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            debug!(%url, "tcp connect ok");
            drop(stream);
            Ok(())
        }
        Ok(Err(e)) => {
            debug!(%url, error = %e, "tcp connect failed");
            Err(ProbeError::Connection(e.to_string()))
        }
        Err(_) => {
            debug!(%url, ?timeout, "tcp connect timed out");
            Err(ProbeError::timed_out(timeout))
        }
    }
}

/// GET the full URL and treat any 2xx status as healthy.
async fn http_probe(url: Url, timeout: Duration) -> Result<(), ProbeError> {
    // Fresh client per probe: exactly one connection, dropped with the client.
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProbeError::Connection(e.to_string()))?;

    let response = client.get(url.clone()).send().await.map_err(|e| {
        debug!(%url, error = %e, "http request failed");
        if e.is_timeout() {
            ProbeError::timed_out(timeout)
        } else {
            ProbeError::Connection(e.to_string())
        }
    })?;

    let status = response.status();
    if status.is_success() {
        debug!(%url, %status, "http probe ok");
        Ok(())
    } else {
        debug!(%url, %status, "http probe non-2xx");
        Err(ProbeError::HttpStatus(status.as_u16()))
    }
}
