use std::time::Duration;

pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_USER_AGENT: &str = "VirtualBookshelf/1.0 (+link-import)";
const MAX_URL_LENGTH: usize = 2048;
const CONNECT_TIMEOUT: u64 = 10; // seconds
const POOL_IDLE_TIMEOUT: u64 = 90; // seconds

/// Configuration for redirect resolution
///
/// Controls hop limits, URL validation and HTTP client settings. Per-URL
/// deadlines and concurrency are chosen per batch, not here.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    // URL and redirect configuration
    pub max_redirects: usize,
    pub max_url_length: usize,
    pub allowed_schemes: Vec<String>,

    // HTTP client configuration
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl ResolverConfig {
    /// Creates a new resolver configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of redirect hops to follow
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Sets the maximum allowed URL length
    pub fn with_max_url_length(mut self, max_url_length: usize) -> Self {
        self.max_url_length = max_url_length;
        self
    }

    /// Sets the allowed URL schemes
    pub fn with_allowed_schemes(mut self, schemes: Vec<String>) -> Self {
        self.allowed_schemes = schemes;
        self
    }

    /// Sets the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the timeout for establishing new connections
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the idle timeout for the connection pool
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Sets the maximum number of idle connections per host
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    pub(crate) fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes.iter().any(|allowed| allowed == scheme)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_url_length: MAX_URL_LENGTH,
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: 10,
        }
    }
}
