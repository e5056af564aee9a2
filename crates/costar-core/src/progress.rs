//! Progress event payloads emitted by a running search.

use serde::{Deserialize, Serialize};

/// Phase tag carried by every progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Resolving the two actor names to catalog ids.
    Resolving,
    /// Expanding the BFS frontier.
    Searching,
    /// Terminal: a path was found, or none exists within the bound.
    Completed,
    /// Terminal: resolution failed, or the search was cancelled.
    Failed,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A snapshot of search progress. Events are transient; the engine does not
/// retain them after delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub phase: SearchPhase,
    /// Current BFS level (1-based); 0 before the search phase.
    pub depth: usize,
    pub actor_name: Option<String>,
    pub movie_title: Option<String>,
    /// Completion estimate in `0.0..=100.0`.
    pub percent: f64,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(phase: SearchPhase, depth: usize, percent: f64, message: impl Into<String>) -> Self {
        Self {
            phase,
            depth,
            actor_name: None,
            movie_title: None,
            percent,
            message: message.into(),
        }
    }

    pub fn with_actor(mut self, name: impl Into<String>) -> Self {
        self.actor_name = Some(name.into());
        self
    }

    pub fn with_movie(mut self, title: impl Into<String>) -> Self {
        self.movie_title = Some(title.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}
