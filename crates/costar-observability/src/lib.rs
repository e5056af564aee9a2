//! # costar-observability
//!
//! Tracing subscriber setup and the span vocabulary shared by the search
//! engine and the catalog clients.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_json, init_tracing_with_filter};
