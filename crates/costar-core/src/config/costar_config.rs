//! Top-level costar configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CacheConfig, CatalogConfig, ObservabilityConfig, SearchConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "costar.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`COSTAR_*`)
/// 3. Project config (`costar.toml` in the working directory)
/// 4. User config (`~/.costar/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CostarConfig {
    pub search: SearchConfig,
    pub catalog: CatalogConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub parallelism: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
}

impl CostarConfig {
    /// Load configuration with 4-layer resolution, reading the user layer from
    /// `~/.costar/config.toml`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let user_dir = user_config_dir();
        Self::load_with_user_dir(root, user_dir.as_deref(), cli_overrides)
    }

    /// Same as [`load`](Self::load) with an explicit user config directory.
    pub fn load_with_user_dir(
        root: &Path,
        user_dir: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(dir) = user_dir {
            let user_config_path = dir.join("config.toml");
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CostarConfig) -> Result<(), ConfigError> {
        if let Some(depth) = config.search.max_depth {
            if !(1..=constants::MAX_SEARCH_DEPTH).contains(&depth) {
                return Err(invalid(
                    "search.max_depth",
                    format!("must be between 1 and {}", constants::MAX_SEARCH_DEPTH),
                ));
            }
        }
        if config.search.parallelism == Some(0) {
            return Err(invalid("search.parallelism", "must be at least 1"));
        }
        if config.search.timeout_secs == Some(0) {
            return Err(invalid("search.timeout_secs", "must be greater than 0"));
        }
        if let Some(ref url) = config.catalog.base_url {
            if url.trim().is_empty() {
                return Err(invalid("catalog.base_url", "must not be empty"));
            }
        }
        if config.catalog.max_movies == Some(0) {
            return Err(invalid("catalog.max_movies", "must be at least 1"));
        }
        if config.catalog.max_cast == Some(0) {
            return Err(invalid("catalog.max_cast", "must be at least 1"));
        }
        for (field, value) in [
            ("cache.max_actors", config.cache.max_actors),
            ("cache.max_filmographies", config.cache.max_filmographies),
            ("cache.max_casts", config.cache.max_casts),
        ] {
            if value == Some(0) {
                return Err(invalid(field, "must be at least 1"));
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut CostarConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CostarConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut CostarConfig, other: CostarConfig) {
        // Search
        base.search.max_depth = other.search.max_depth.or(base.search.max_depth);
        base.search.parallelism = other.search.parallelism.or(base.search.parallelism);
        base.search.timeout_secs = other.search.timeout_secs.or(base.search.timeout_secs);

        // Catalog
        let (b, o) = (&mut base.catalog, other.catalog);
        b.base_url = o.base_url.or(b.base_url.take());
        b.user_agent = o.user_agent.or(b.user_agent.take());
        b.request_timeout_secs = o.request_timeout_secs.or(b.request_timeout_secs);
        b.max_retries = o.max_retries.or(b.max_retries);
        b.initial_backoff_ms = o.initial_backoff_ms.or(b.initial_backoff_ms);
        b.max_movies = o.max_movies.or(b.max_movies);
        b.max_cast = o.max_cast.or(b.max_cast);

        // Cache
        base.cache.max_actors = other.cache.max_actors.or(base.cache.max_actors);
        base.cache.max_filmographies = other
            .cache
            .max_filmographies
            .or(base.cache.max_filmographies);
        base.cache.max_casts = other.cache.max_casts.or(base.cache.max_casts);
        base.cache.ttl_secs = other.cache.ttl_secs.or(base.cache.ttl_secs);

        // Observability
        base.observability.log_filter = other
            .observability
            .log_filter
            .or(base.observability.log_filter.take());
        base.observability.json = other.observability.json.or(base.observability.json);
    }

    /// Apply environment variable overrides.
    /// Pattern: `COSTAR_SEARCH_MAX_DEPTH`, `COSTAR_CATALOG_BASE_URL`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut CostarConfig) {
        if let Some(v) = env_parse::<usize>("COSTAR_SEARCH_MAX_DEPTH") {
            config.search.max_depth = Some(v);
        }
        if let Some(v) = env_parse::<usize>("COSTAR_SEARCH_PARALLELISM") {
            config.search.parallelism = Some(v);
        }
        if let Some(v) = env_parse::<u64>("COSTAR_SEARCH_TIMEOUT_SECS") {
            config.search.timeout_secs = Some(v);
        }
        if let Ok(val) = std::env::var("COSTAR_CATALOG_BASE_URL") {
            config.catalog.base_url = Some(val);
        }
        if let Ok(val) = std::env::var("COSTAR_CATALOG_USER_AGENT") {
            config.catalog.user_agent = Some(val);
        }
        if let Some(v) = env_parse::<u32>("COSTAR_CATALOG_MAX_RETRIES") {
            config.catalog.max_retries = Some(v);
        }
        if let Some(v) = env_parse::<u64>("COSTAR_CACHE_TTL_SECS") {
            config.cache.ttl_secs = Some(v);
        }
        if let Some(v) = env_parse::<bool>("COSTAR_LOG_JSON") {
            config.observability.json = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut CostarConfig, cli: &CliOverrides) {
        if let Some(v) = cli.max_depth {
            config.search.max_depth = Some(v);
        }
        if let Some(v) = cli.parallelism {
            config.search.parallelism = Some(v);
        }
        if let Some(v) = cli.timeout_secs {
            config.search.timeout_secs = Some(v);
        }
        if let Some(ref v) = cli.base_url {
            config.catalog.base_url = Some(v.clone());
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.into(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Returns the user-level config directory: `~/.costar/`.
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|h| PathBuf::from(h).join(".costar"))
}
