//! Search results: the outcome itself plus the statistics gathered on the way.

use serde::{Deserialize, Serialize};

use costar_core::errors::SearchError;
use costar_core::ConnectionPath;

/// Why a search ended without a path. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The frontier emptied: every reachable actor was expanded after
    /// `depth` levels.
    Exhausted { depth: usize },
    /// `max_depth` levels were processed without reaching the target.
    DepthLimitReached { max_depth: usize },
}

/// Result of one connection search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A shortest path; empty when start and target are the same actor.
    Found { path: ConnectionPath },
    NotFound { reason: NotFoundReason },
    Failed { error: SearchError },
}

impl SearchOutcome {
    pub fn found(path: ConnectionPath) -> Self {
        Self::Found { path }
    }

    pub fn path(&self) -> Option<&ConnectionPath> {
        match self {
            Self::Found { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Work counters for one search. Kept for diagnostics even when the search
/// is cancelled part-way through a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// BFS levels whose processing started.
    pub levels_processed: usize,
    /// Frontier entries whose filmography was requested.
    pub actors_expanded: usize,
    /// Movies whose cast was requested.
    pub movies_scanned: usize,
    /// Cast lists successfully fetched.
    pub casts_fetched: usize,
    /// Actors newly added to the frontier (the start actor excluded).
    pub actors_discovered: usize,
    /// Filmography or cast fetches that failed and were skipped.
    pub fetch_failures: usize,
    pub elapsed_ms: u64,
}

impl SearchStats {
    pub(crate) fn absorb(&mut self, other: &SearchStats) {
        self.actors_expanded += other.actors_expanded;
        self.movies_scanned += other.movies_scanned;
        self.casts_fetched += other.casts_fetched;
        self.actors_discovered += other.actors_discovered;
        self.fetch_failures += other.fetch_failures;
    }
}

/// Outcome plus the context needed to report on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub search_id: String,
    pub start: String,
    pub target: String,
    pub max_depth: usize,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}
