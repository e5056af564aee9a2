//! # costar-catalog
//!
//! Implementations of [`costar_core::IDataSource`]:
//!
//! - [`InMemoryCatalog`]: a fixed graph, built in code or loaded from a JSON
//!   snapshot. Used by tests and offline runs.
//! - [`ImdbCatalog`]: scrapes actor and title pages of a web catalog.
//! - [`CachedDataSource`]: memoizes any source for the life of the process.
//!
//! All of them return sequences shaped by [`normalize`].

pub mod cache;
pub mod http;
pub mod memory;
pub mod normalize;

pub use cache::{CacheStats, CachedDataSource};
pub use http::ImdbCatalog;
pub use memory::{CatalogSnapshot, Credit, InMemoryCatalog};
