// Configuration for the HTTP access layer

/// Environment variable overriding the backend origin
pub const BASE_URL_ENV: &str = "ROSTER_BASE_URL";
/// Environment variable enabling request/response body logging
pub const HTTP_DEBUG_ENV: &str = "ROSTER_HTTP_DEBUG";

const DEFAULT_BASE_URL: &str = "http://localhost:5001/api/admin";

/// Configuration for the HTTP gateway
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend origin including the API prefix
    /// (e.g. "http://localhost:5001/api/admin")
    pub base_url: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// Log request and response bodies at debug level. Diagnostic only,
    /// must never change what a request does.
    pub verbose_http: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            verbose_http: false,
        }
    }
}

impl ClientConfig {
    /// Create a new config pointing at the given backend origin
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Read the config from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let verbose_http = std::env::var(HTTP_DEBUG_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            verbose_http,
            ..Self::new(&base_url)
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Set verbose HTTP logging
    pub fn with_verbose_http(mut self, verbose: bool) -> Self {
        self.verbose_http = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5001/api/admin");
        assert_eq!(config.connect_timeout_ms, 5000);
        assert!(!config.verbose_http);
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("http://roster.internal/api/admin/")
            .with_timeouts(3000, 15000)
            .with_verbose_http(true);

        assert_eq!(config.base_url, "http://roster.internal/api/admin");
        assert_eq!(config.connect_timeout_ms, 3000);
        assert_eq!(config.read_timeout_ms, 15000);
        assert!(config.verbose_http);
    }
}
