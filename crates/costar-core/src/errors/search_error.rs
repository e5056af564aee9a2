use serde::{Deserialize, Serialize};

use super::error_code::{self, CostarErrorCode};
use crate::models::ActorSide;

/// Terminal search failures, carried inside the search outcome rather than
/// raised past the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchError {
    #[error("{side} actor '{name}' could not be found in the catalog")]
    UnresolvedActor { side: ActorSide, name: String },

    #[error("search cancelled at depth {depth}")]
    Cancelled { depth: usize },

    #[error("search timed out at depth {depth} after {elapsed_ms} ms")]
    TimedOut { depth: usize, elapsed_ms: u64 },
}

impl CostarErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedActor { .. } => error_code::UNRESOLVED_ACTOR,
            Self::Cancelled { .. } => error_code::CANCELLED,
            Self::TimedOut { .. } => error_code::TIMED_OUT,
        }
    }
}
