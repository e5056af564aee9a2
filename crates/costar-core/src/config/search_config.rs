//! Search engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum BFS levels. Default: 6.
    pub max_depth: Option<usize>,
    /// Worker threads per level. 1 runs the deterministic sequential loop. Default: 1.
    pub parallelism: Option<usize>,
    /// Wall-clock budget for one search. Default: unbounded.
    pub timeout_secs: Option<u64>,
}

impl SearchConfig {
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(constants::DEFAULT_MAX_DEPTH)
    }

    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or(1).max(1)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
