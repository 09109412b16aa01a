//! Endpoint configuration.
//!
//! All remote calls are parameterized by a single immutable [`EndpointConfig`]
//! constructed once at startup and passed by reference into every component.

use std::fmt;
use std::time::Duration;

/// Default per-request timeout for remote calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection parameters for the remote scanner API.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Scanner API host.
    pub host: String,
    /// Scanner API port.
    pub port: u16,
    /// Opaque API key, sent as a URL path segment. Empty means no key.
    pub api_key: String,
    /// Per-request timeout applied to every remote call.
    pub timeout: Duration,
}

impl EndpointConfig {
    /// Create a new endpoint configuration with the default timeout.
    pub fn new(host: impl Into<String>, port: u16, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The `host:port` pair, used in operator-facing messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL for API calls: `http://host:port/{key}/v0.1`.
    ///
    /// The API key is a path segment in this API family; an empty key is
    /// simply omitted from the path.
    pub fn base_url(&self) -> String {
        if self.api_key.is_empty() {
            format!("http://{}:{}/v0.1", self.host, self.port)
        } else {
            format!("http://{}:{}/{}/v0.1", self.host, self.port, self.api_key)
        }
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())
    }
}

/// Optional credentials for an authenticated scan.
///
/// Applied uniformly to every target in a batch; there are no per-target
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_with_key() {
        let config = EndpointConfig::new("127.0.0.1", 1337, "s3cret");
        assert_eq!(config.base_url(), "http://127.0.0.1:1337/s3cret/v0.1");
    }

    #[test]
    fn test_base_url_without_key() {
        let config = EndpointConfig::new("burp.local", 8090, "");
        assert_eq!(config.base_url(), "http://burp.local:8090/v0.1");
    }

    #[test]
    fn test_address() {
        let config = EndpointConfig::new("127.0.0.1", 1337, "k");
        assert_eq!(config.address(), "127.0.0.1:1337");
    }
}
