//! Outbound HTTP client construction

use std::time::Duration;

/// Default connect timeout for outbound calls
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

const USER_AGENT: &str = concat!("confession-board/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with an overall request timeout
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    tracing::debug!(timeout_ms = timeout.as_millis() as u64, "Building outbound HTTP client");
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
        .user_agent(USER_AGENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_short_timeout() {
        assert!(build_client(Duration::from_millis(500)).is_ok());
    }
}
