//! # costar-core
//!
//! Foundation crate for the costar connection search.
//! Defines the catalog models, the data-source and progress traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod progress;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::CancellationToken;
pub use config::CostarConfig;
pub use errors::{CostarError, CostarResult};
pub use models::{ActorRef, ActorSide, ConnectionPath, Hop, MovieRef};
pub use progress::{ProgressEvent, SearchPhase};
pub use traits::{IDataSource, IProgressSink};
