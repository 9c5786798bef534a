use std::time::Duration;

/// Failure of a single probe attempt.
///
/// Every variant renders to a single human-readable line; the CLI prints
/// these directly. The probe primitive never retries — retry policy lives
/// in the loop runner.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid endpoint `{url}`: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),
}

impl ProbeError {
    pub(crate) fn invalid(url: &str, reason: impl ToString) -> Self {
        ProbeError::InvalidEndpoint {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn timed_out(timeout: Duration) -> Self {
        ProbeError::Connection(format!("timed out after {timeout:?}"))
    }
}
