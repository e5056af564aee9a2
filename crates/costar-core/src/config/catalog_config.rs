//! Web catalog client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the web catalog. Default: `https://www.imdb.com`.
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    /// Per-request timeout. Default: 30s.
    pub request_timeout_secs: Option<u64>,
    /// Retries after the first attempt for transient failures. Default: 2.
    pub max_retries: Option<u32>,
    /// First retry delay, doubled on each retry. Default: 500ms.
    pub initial_backoff_ms: Option<u64>,
    /// Filmography cap. Default: 50.
    pub max_movies: Option<usize>,
    /// Cast list cap. Default: 30.
    pub max_cast: Option<usize>,
}

impl CatalogConfig {
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_USER_AGENT.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(30))
    }

    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(2)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms.unwrap_or(500))
    }

    pub fn effective_max_movies(&self) -> usize {
        self.max_movies.unwrap_or(constants::DEFAULT_MAX_MOVIES)
    }

    pub fn effective_max_cast(&self) -> usize {
        self.max_cast.unwrap_or(constants::DEFAULT_MAX_CAST)
    }
}
