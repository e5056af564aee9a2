//! Lookup cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Name → actor entries. Default: 10 000.
    pub max_actors: Option<u64>,
    /// Actor → filmography entries. Default: 10 000.
    pub max_filmographies: Option<u64>,
    /// Movie → cast entries. Default: 50 000.
    pub max_casts: Option<u64>,
    /// Entry time-to-live. Default: 24h.
    pub ttl_secs: Option<u64>,
}

impl CacheConfig {
    pub fn effective_max_actors(&self) -> u64 {
        self.max_actors.unwrap_or(10_000)
    }

    pub fn effective_max_filmographies(&self) -> u64 {
        self.max_filmographies.unwrap_or(10_000)
    }

    pub fn effective_max_casts(&self) -> u64 {
        self.max_casts.unwrap_or(50_000)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.unwrap_or(86_400))
    }
}
