//! Provider configuration
//!
//! Settings are plain structs handed to the clients at construction.
//! [`Config::from_env`] fills them from process environment variables.

use std::time::Duration;

/// Default catalog search/detail endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";
/// Default ranked-list endpoint
pub const DEFAULT_LISTS_URL: &str = "https://api.nytimes.com/svc/books/v3";
/// Default OpenAI-compatible endpoint
pub const DEFAULT_GENERATOR_URL: &str = "https://api.openai.com/v1";
/// Default completion model
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-3.5-turbo";

/// All provider settings
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub summary: SummaryConfig,
}

impl Config {
    /// Read settings from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            catalog: CatalogConfig::from_env(),
            summary: SummaryConfig::from_env(),
        }
    }
}

/// Settings for the catalog and ranked-list providers
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the search/detail provider
    pub catalog_url: String,

    pub catalog_api_key: Option<String>,

    /// Base URL of the ranked-list provider
    pub lists_url: String,

    pub lists_api_key: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_api_key: None,
            lists_url: DEFAULT_LISTS_URL.to_string(),
            lists_api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            catalog_url: env_or("BOOKCLUB_CATALOG_URL", defaults.catalog_url),
            catalog_api_key: env_opt("GOOGLE_BOOKS_API_KEY"),
            lists_url: env_or("BOOKCLUB_LISTS_URL", defaults.lists_url),
            lists_api_key: env_opt("NYT_API_KEY"),
            timeout: defaults.timeout,
        }
    }
}

/// Settings for the summary generator and its cache
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Base URL of the OpenAI-compatible API
    pub api_url: String,

    pub api_key: Option<String>,

    pub model: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    pub timeout: Duration,

    /// How long a generated summary stays cached
    pub cache_ttl: Duration,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GENERATOR_URL.to_string(),
            api_key: None,
            model: DEFAULT_SUMMARY_MODEL.to_string(),
            max_tokens: 200,
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(60 * 60 * 24),
        }
    }
}

impl SummaryConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env_or("BOOKCLUB_OPENAI_URL", defaults.api_url),
            api_key: env_opt("OPENAI_API_KEY"),
            model: env_or("BOOKCLUB_SUMMARY_MODEL", defaults.model),
            ..defaults
        }
    }
}

/// Read a variable, treating unset and blank the same
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable or use the given default
pub fn env_or(key: &str, default: String) -> String {
    env_opt(key).unwrap_or(default)
}
