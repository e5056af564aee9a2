//! Configuration system for costar.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod cache_config;
pub mod catalog_config;
pub mod costar_config;
pub mod observability_config;
pub mod search_config;

pub use cache_config::CacheConfig;
pub use catalog_config::CatalogConfig;
pub use costar_config::{CliOverrides, CostarConfig};
pub use observability_config::ObservabilityConfig;
pub use search_config::SearchConfig;
