//! Client configuration

use std::env;
use std::time::Duration;

/// Read timeout for requests, in whole seconds
pub const ENV_READ_TIMEOUT: &str = "SERVER_READ_TIMEOUT";

/// Settings applied to every request sent through an [`HttpClient`](crate::HttpClient)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Total time allowed for a request, `None` waits indefinitely
    pub read_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config with a fixed read timeout
    pub fn with_read_timeout(read_timeout: Duration) -> Self {
        Self {
            read_timeout: Some(read_timeout),
        }
    }

    /// Config read from the process environment
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Overlay values found in the process environment
    pub fn apply_env(mut self) -> Self {
        if let Ok(timeout_str) = env::var(ENV_READ_TIMEOUT) {
            self.read_timeout = parse_read_timeout(&timeout_str);
        }

        self
    }
}

/// Parse a timeout in seconds.
///
/// Zero or anything that is not an unsigned integer means no timeout.
pub fn parse_read_timeout(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(seconds) => Some(Duration::from_secs(seconds)),
        Err(_) => {
            tracing::warn!(
                "Ignoring invalid {} value {:?}, requests will not time out",
                ENV_READ_TIMEOUT,
                value
            );
            None
        }
    }
}
