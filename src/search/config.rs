// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality
//!
//! Configuration is read once, when a provider is constructed. Nothing is
//! re-read per call.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::types::SearchError;

/// Engine identifiers requested from SearXNG when images are wanted
pub const IMAGE_ENGINES: [&str; 3] = ["qwant images", "duckduckgo images", "bing images"];

/// Backends the tool can be wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Tavily,
    DuckDuckGo,
    Brave,
    Arxiv,
    Searxng,
}

impl SearchEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEngine::Tavily => "tavily",
            SearchEngine::DuckDuckGo => "duckduckgo",
            SearchEngine::Brave => "brave",
            SearchEngine::Arxiv => "arxiv",
            SearchEngine::Searxng => "searxng",
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchEngine {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tavily" => Ok(SearchEngine::Tavily),
            "duckduckgo" | "ddg" => Ok(SearchEngine::DuckDuckGo),
            "brave" | "brave_search" => Ok(SearchEngine::Brave),
            "arxiv" => Ok(SearchEngine::Arxiv),
            "searxng" | "searx" => Ok(SearchEngine::Searxng),
            other => Err(SearchError::NotConfigured {
                provider: other.to_string(),
                setting: "SEARCH_API (unknown search engine)".to_string(),
            }),
        }
    }
}

/// When SearXNG image engines are merged into the outbound engine list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageEnginePolicy {
    /// Only when the caller gave no engine list
    #[default]
    WhenNoEngines,
    /// Always, after any explicit engines; duplicates are kept
    Always,
}

impl FromStr for ImageEnginePolicy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "when-no-engines" | "when_no_engines" | "default" => {
                Ok(ImageEnginePolicy::WhenNoEngines)
            }
            "always" => Ok(ImageEnginePolicy::Always),
            _ => Err(SearchError::NotConfigured {
                provider: "searxng".to_string(),
                setting: format!("SEARXNG_IMAGE_ENGINES (unrecognized value '{}')", s),
            }),
        }
    }
}

/// SearXNG client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearxngConfig {
    /// Search endpoint of the instance, e.g. `http://localhost:8080/search`
    pub base_url: Option<String>,
    /// Per-call timeout in seconds
    ///
    /// Not read from config files; [`SearchConfig::searxng_config`] fills it
    /// from the top-level `timeout_secs`.
    #[serde(skip)]
    pub timeout_secs: u64,
    pub default_language: String,
    pub default_categories: Option<Vec<String>>,
    pub default_engines: Option<Vec<String>>,
    pub image_engine_policy: ImageEnginePolicy,
}

impl SearxngConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearxngConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 10,
            default_language: "all".to_string(),
            default_categories: None,
            default_engines: None,
            image_engine_policy: ImageEnginePolicy::WhenNoEngines,
        }
    }
}

/// Provider credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProviderConfig {
    /// Tavily API key
    pub tavily_api_key: Option<String>,
    /// Brave Search API key
    pub brave_api_key: Option<String>,
}

/// Configuration for the web search tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Backend the tool is wired to
    pub engine: SearchEngine,
    /// Default number of results per search
    pub max_results: usize,
    /// Ask image-capable backends for image hits
    pub include_images: bool,
    /// Request timeout in seconds for every backend
    pub timeout_secs: u64,
    /// Provider-specific credentials
    pub providers: SearchProviderConfig,
    /// SearXNG-specific settings
    pub searxng: SearxngConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Tavily,
            max_results: 3,
            include_images: true,
            timeout_secs: 10,
            providers: SearchProviderConfig::default(),
            searxng: SearxngConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, SearchError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    ///
    /// Unset or empty values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(engine) = get("SEARCH_API") {
            config.engine = engine.parse()?;
        }
        if let Some(n) = get("SEARCH_MAX_RESULTS").and_then(|v| v.parse().ok()) {
            config.max_results = n;
        }
        if let Some(flag) = get("SEARCH_INCLUDE_IMAGES") {
            config.include_images = parse_flag("SEARCH_INCLUDE_IMAGES", &flag)?;
        }
        if let Some(secs) = get("SEARCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.timeout_secs = secs;
        }

        config.providers.tavily_api_key = get("TAVILY_API_KEY");
        config.providers.brave_api_key = get("BRAVE_SEARCH_API_KEY");

        config.searxng.base_url = get("SEARXNG_URL");
        if let Some(language) = get("SEARXNG_LANGUAGE") {
            config.searxng.default_language = language;
        }
        config.searxng.default_categories = get("SEARXNG_CATEGORIES").map(|v| split_list(&v));
        config.searxng.default_engines = get("SEARXNG_ENGINES").map(|v| split_list(&v));
        if let Some(policy) = get("SEARXNG_IMAGE_ENGINES") {
            config.searxng.image_engine_policy = policy.parse()?;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SearchError::NotConfigured {
            provider: "config".to_string(),
            setting: format!("{} ({})", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SearchError> {
        toml::from_str(content).map_err(|e| SearchError::Parse {
            message: format!("invalid search config: {}", e),
        })
    }

    /// Validate the configuration
    ///
    /// Only checks what can be wrong regardless of which call is made.
    /// A missing SearXNG URL or API key is reported at call time instead.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::InvalidQuery {
                reason: "max_results must be greater than 0".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(SearchError::NotConfigured {
                provider: self.engine.to_string(),
                setting: "timeout must be greater than 0".to_string(),
            });
        }
        if let Some(base_url) = &self.searxng.base_url {
            url::Url::parse(base_url).map_err(|e| SearchError::NotConfigured {
                provider: "searxng".to_string(),
                setting: format!("SEARXNG_URL is not a valid URL ({})", e),
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// SearXNG settings with the shared timeout applied
    pub fn searxng_config(&self) -> SearxngConfig {
        SearxngConfig {
            timeout_secs: self.timeout_secs,
            ..self.searxng.clone()
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SearchError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SearchError::NotConfigured {
            provider: "config".to_string(),
            setting: format!("{} (unrecognized value '{}')", key, value),
        }),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_string()).collect()
}
