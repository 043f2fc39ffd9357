use std::time::Duration;

/// Harness configuration, passed explicitly into the session manager and the
/// scenarios. The base URL is never hardcoded in scenario logic.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root of the system under test, without trailing slash.
    pub base_url: String,
    /// Hard wait budget for element presence and URL settling.
    pub wait_timeout: Duration,
    /// Poll interval, short relative to the timeout.
    pub poll_interval: Duration,
    /// Bounded fallback delay for actions with no observable signal.
    pub grace_delay: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let base_url = std::env::var("BLOG_E2E_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            base_url: normalize_base_url(&base_url),
            wait_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(200),
            grace_delay: Duration::from_secs(1),
        }
    }
}

impl HarnessConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Absolute URL for a SUT route, e.g. `url("/signup")`.
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() || path == "/" {
            return self.base_url.clone();
        }
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
