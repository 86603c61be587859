//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the typed settings
//! for each component.

use std::time::Duration;

/// Default probe timeout
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 5;

/// Default identifying User-Agent sent with every probe
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Default upper bound of concurrent probes within one batch
pub const DEFAULT_CHECK_CONCURRENCY: usize = 8;

/// Default number of status flips that marks a URL as flapping
pub const DEFAULT_FLAP_THRESHOLD: usize = 3;

/// Default number of recent observations the flap detector inspects
pub const DEFAULT_FLAP_WINDOW: u32 = 10;

/// Default zero-shot classification endpoint
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Default scheduler interval
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use urlwatch::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("URLWATCH_DATABASE_URL", "DATABASE_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// データベースURLを取得
///
/// 環境変数 `URLWATCH_DATABASE_URL`（旧: `DATABASE_URL`）から取得し、
/// 未設定の場合はカレントディレクトリの `url_checks.db` を使用する。
pub fn get_database_url() -> String {
    get_env_with_fallback_or(
        "URLWATCH_DATABASE_URL",
        "DATABASE_URL",
        "sqlite:url_checks.db",
    )
}

/// Probe settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Timeout for a single probe.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Maximum number of probes in flight for one batch.
    pub max_concurrency: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_CHECK_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: DEFAULT_CHECK_CONCURRENCY,
        }
    }
}

impl CheckerConfig {
    /// Load probe configuration from environment variables.
    pub fn from_env() -> Self {
        let timeout_secs = get_env_with_fallback_parse(
            "URLWATCH_CHECK_TIMEOUT_SECS",
            "URLWATCH_CHECK_TIMEOUT_SECS",
            DEFAULT_CHECK_TIMEOUT_SECS,
        );
        let user_agent = get_env_with_fallback_or(
            "URLWATCH_USER_AGENT",
            "URLWATCH_USER_AGENT",
            DEFAULT_USER_AGENT,
        );
        let max_concurrency = get_env_with_fallback_parse(
            "URLWATCH_CHECK_CONCURRENCY",
            "URLWATCH_CHECK_CONCURRENCY",
            DEFAULT_CHECK_CONCURRENCY,
        )
        .max(1);

        Self {
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
            max_concurrency,
        }
    }
}

/// Flap detection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlapConfig {
    /// Flips needed to report a flap.
    pub threshold: usize,
    /// Number of most recent observations inspected.
    pub window: u32,
}

impl Default for FlapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FLAP_THRESHOLD,
            window: DEFAULT_FLAP_WINDOW,
        }
    }
}

impl FlapConfig {
    /// Load flap detection configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            threshold: get_env_with_fallback_parse(
                "URLWATCH_FLAP_THRESHOLD",
                "URLWATCH_FLAP_THRESHOLD",
                DEFAULT_FLAP_THRESHOLD,
            ),
            window: get_env_with_fallback_parse(
                "URLWATCH_FLAP_WINDOW",
                "URLWATCH_FLAP_WINDOW",
                DEFAULT_FLAP_WINDOW,
            ),
        }
    }
}

/// Classification collaborator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Inference endpoint URL.
    pub api_url: String,
    /// Bearer token; classification is skipped when unset.
    pub api_token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CLASSIFIER_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(15),
        }
    }
}

impl ClassifierConfig {
    /// Load classifier configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: get_env_with_fallback_or(
                "URLWATCH_CLASSIFIER_URL",
                "URLWATCH_CLASSIFIER_URL",
                DEFAULT_CLASSIFIER_URL,
            ),
            api_token: get_env_with_fallback("URLWATCH_CLASSIFIER_API_TOKEN", "API_TOKEN")
                .filter(|token| !token.trim().is_empty()),
            ..Self::default()
        }
    }
}

/// Periodic check settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// URLs checked on every tick. Empty disables the scheduler.
    pub urls: Vec<String>,
    /// Time between batches.
    pub interval: Duration,
}

impl WatchConfig {
    /// Load scheduler configuration from environment variables.
    pub fn from_env() -> Self {
        let urls = get_env_with_fallback("URLWATCH_WATCH_URLS", "URLWATCH_WATCH_URLS")
            .map(|raw| parse_url_list(&raw))
            .unwrap_or_default();
        let interval_secs = get_env_with_fallback_parse(
            "URLWATCH_WATCH_INTERVAL_SECS",
            "URLWATCH_WATCH_INTERVAL_SECS",
            DEFAULT_WATCH_INTERVAL_SECS,
        )
        .max(1);

        Self {
            urls,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Whether the scheduler has anything to do.
    pub fn is_enabled(&self) -> bool {
        !self.urls.is_empty()
    }
}

fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// All component settings
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Probe settings
    pub checker: CheckerConfig,
    /// Flap detection settings
    pub flap: FlapConfig,
    /// Classification settings
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Load every component's configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            checker: CheckerConfig::from_env(),
            flap: FlapConfig::from_env(),
            classifier: ClassifierConfig::from_env(),
        }
    }
}
