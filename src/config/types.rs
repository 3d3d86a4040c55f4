use serde::Deserialize;

/// Main configuration structure for Sumi-Glean
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults documented on each field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub pool: PoolConfig,
    pub headers: HeaderConfig,
    pub output: OutputConfig,
}

/// HTTP fetching and retry behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Additional attempts after the first transport failure (default 3)
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds (default 1000)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Total request timeout in seconds (default 30)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds (default 10)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 1000,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Worker pool sizing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of URLs processed concurrently (default 10)
    pub workers: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { workers: 10 }
    }
}

/// Values the header rotator picks from on every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,

    #[serde(rename = "accept-languages")]
    pub accept_languages: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            accept_languages: DEFAULT_ACCEPT_LANGUAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit a `"status": "failed"` record for URLs that could not be fetched
    #[serde(rename = "report-failures")]
    pub report_failures: bool,
}

const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

const DEFAULT_ACCEPT_LANGUAGES: &[&str] = &["en-US,en;q=0.9", "en-GB,en;q=0.8", "en;q=0.7"];
