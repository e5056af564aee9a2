//! # costar-search
//!
//! Shortest co-star chains between two actors. The actor/movie graph is
//! never materialized: each BFS level asks the data source for filmographies
//! and cast lists of the actors it expands, discovering the next level as it
//! goes.
//!
//! ```text
//! resolve(start, target) ─► level 1 ─► level 2 ─► … ─► level max_depth
//!                               │          │
//!                          Found(path)  Exhausted / DepthLimitReached
//! ```

pub mod engine;
pub mod frontier;
pub mod outcome;
pub mod progress;

mod expansion;
mod stop;

pub use engine::SearchEngine;
pub use frontier::{Frontier, FrontierEntry};
pub use outcome::{NotFoundReason, SearchOutcome, SearchReport, SearchStats};
pub use progress::{ChannelProgressSink, ProgressReporter, TracingProgressSink};
