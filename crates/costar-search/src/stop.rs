//! Early-exit signalling shared by every worker of one search.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use costar_core::errors::SearchError;
use costar_core::CancellationToken;

/// Why expansion stopped before the level was done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    /// A worker holding an earlier entry of the level already reached the
    /// target.
    TargetFound,
    Cancelled,
    TimedOut,
}

impl Interrupt {
    /// The terminal error for this interrupt, if it is one.
    pub(crate) fn into_error(self, depth: usize, elapsed: Duration) -> Option<SearchError> {
        match self {
            Self::TargetFound => None,
            Self::Cancelled => Some(SearchError::Cancelled { depth }),
            Self::TimedOut => Some(SearchError::TimedOut {
                depth,
                elapsed_ms: elapsed.as_millis() as u64,
            }),
        }
    }
}

pub(crate) struct StopSignal {
    token: Option<CancellationToken>,
    started: Instant,
    deadline: Option<Instant>,
    /// Lowest level index whose entry reached the target, `usize::MAX` if
    /// none. A match ends the search, so it is never reset.
    found_index: AtomicUsize,
}

impl StopSignal {
    pub(crate) fn new(token: Option<CancellationToken>, timeout: Option<Duration>) -> Self {
        let started = Instant::now();
        Self {
            token,
            started,
            deadline: timeout.map(|t| started + t),
            found_index: AtomicUsize::new(usize::MAX),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Record that the entry at `index` of the current level reached the
    /// target. Only entries after the earliest such index stop early.
    pub(crate) fn mark_target_found(&self, index: usize) {
        self.found_index.fetch_min(index, Ordering::AcqRel);
    }

    /// Checked before each level.
    pub(crate) fn check(&self) -> Option<Interrupt> {
        if self.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Some(Interrupt::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(Interrupt::TimedOut);
        }
        None
    }

    /// Checked before each entry and movie. An entry stops once an earlier
    /// entry of the same level has reached the target; later matches never
    /// stop earlier entries.
    pub(crate) fn check_entry(&self, index: usize) -> Option<Interrupt> {
        if self.found_index.load(Ordering::Acquire) < index {
            return Some(Interrupt::TargetFound);
        }
        self.check()
    }
}
