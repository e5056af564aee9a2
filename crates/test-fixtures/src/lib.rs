//! Test fixtures for costar: catalog files, graph builders, instrumented
//! data sources, and a reference shortest-path oracle.
//!
//! Shared by the integration tests and benches of every crate in the
//! workspace.

pub mod builder;
pub mod reference;
pub mod sources;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use costar_catalog::{CatalogSnapshot, InMemoryCatalog};

pub use builder::CatalogBuilder;
pub use reference::reference_distance;
pub use sources::{CountingSource, FlakySource, SlowSource};

/// Directory holding the JSON fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a catalog snapshot fixture into an in-memory catalog.
pub fn load_catalog(relative_path: &str) -> InMemoryCatalog {
    InMemoryCatalog::from_snapshot(load_fixture::<CatalogSnapshot>(relative_path))
}

/// `A -movie1-> {B, C}`, `B -movie2-> {D}`.
pub fn two_hop_catalog() -> InMemoryCatalog {
    load_catalog("two_hop.json")
}

/// Two components with no shared movie: `{A, B}` and `{X, Y}`.
pub fn islands_catalog() -> InMemoryCatalog {
    load_catalog("islands.json")
}
