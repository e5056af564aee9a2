//! Progress reporting: the percentage model, the reporter that serializes
//! delivery, and sink adapters.
//!
//! Percentages: resolution occupies [0, 20), the search [20, 90) split evenly
//! across depth levels and, within a level, across entries and their movies.
//! Terminal events report 100. The branching factor is unknown in advance, so
//! these are estimates of position, not of remaining work.

use std::sync::Mutex;

use crossbeam_channel::{Receiver, Sender};

use costar_core::constants::{
    COMPLETE_PERCENT, SEARCH_PHASE_SPAN_PERCENT, SEARCH_PHASE_START_PERCENT,
};
use costar_core::{IProgressSink, ProgressEvent, SearchPhase};

/// Percentage at the start of `depth` (1-based).
pub fn level_percent(depth: usize, max_depth: usize) -> f64 {
    if max_depth == 0 {
        return SEARCH_PHASE_START_PERCENT;
    }
    let done = depth.saturating_sub(1) as f64 / max_depth as f64;
    SEARCH_PHASE_START_PERCENT + done * SEARCH_PHASE_SPAN_PERCENT
}

/// Percentage before expanding entry `index` of a level holding `level_len`.
pub fn entry_percent(depth: usize, max_depth: usize, index: usize, level_len: usize) -> f64 {
    movie_percent(depth, max_depth, index, level_len, 0, 1)
}

/// Percentage before fetching the cast of movie `movie_index` of
/// `movie_count` for entry `index`.
pub fn movie_percent(
    depth: usize,
    max_depth: usize,
    index: usize,
    level_len: usize,
    movie_index: usize,
    movie_count: usize,
) -> f64 {
    if max_depth == 0 || level_len == 0 {
        return level_percent(depth, max_depth);
    }
    let per_level = SEARCH_PHASE_SPAN_PERCENT / max_depth as f64;
    let within_entry = movie_index as f64 / movie_count.max(1) as f64;
    let within_level = (index as f64 + within_entry) / level_len as f64;
    level_percent(depth, max_depth) + within_level * per_level
}

/// Delivers events to an optional sink.
///
/// Every event passes through one lock, so events from parallel workers
/// arrive whole and in a single order, and percentages never go backwards.
/// Without a sink nothing is built: the closure passed to
/// [`emit`](Self::emit) is never called.
pub struct ProgressReporter<'a> {
    sink: Option<&'a dyn IProgressSink>,
    high_water: Mutex<f64>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(sink: Option<&'a dyn IProgressSink>) -> Self {
        Self {
            sink,
            high_water: Mutex::new(0.0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.sink.is_some()
    }

    /// Build and deliver one event.
    pub fn emit(&self, build: impl FnOnce() -> ProgressEvent) {
        let Some(sink) = self.sink else {
            return;
        };
        let mut high_water = self.high_water.lock().unwrap_or_else(|e| e.into_inner());
        let mut event = build();
        event.percent = event.percent.clamp(*high_water, COMPLETE_PERCENT);
        *high_water = event.percent;
        sink.on_progress(&event);
    }

    /// Deliver the single terminal event of a search.
    pub fn finish(&self, phase: SearchPhase, depth: usize, message: impl FnOnce() -> String) {
        self.emit(|| ProgressEvent::new(phase, depth, COMPLETE_PERCENT, message()));
    }
}

/// Forwards events into a crossbeam channel.
///
/// Uses `try_send`: with a bounded channel that is full, the event is dropped
/// rather than stalling the search.
#[derive(Debug, Clone)]
pub struct ChannelProgressSink {
    tx: Sender<ProgressEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: Sender<ProgressEvent>) -> Self {
        Self { tx }
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<ProgressEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self::new(tx), rx)
    }

    pub fn unbounded() -> (Self, Receiver<ProgressEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl IProgressSink for ChannelProgressSink {
    fn on_progress(&self, event: &ProgressEvent) {
        let _ = self.tx.try_send(event.clone());
    }
}

/// Writes every event to the `tracing` stream at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressSink;

impl IProgressSink for TracingProgressSink {
    fn on_progress(&self, event: &ProgressEvent) {
        tracing::debug!(
            phase = ?event.phase,
            depth = event.depth,
            actor = event.actor_name.as_deref().unwrap_or(""),
            movie = event.movie_title.as_deref().unwrap_or(""),
            percent = event.percent,
            "{}",
            event.message
        );
    }
}
