//! Web catalog data source: page fetching plus markup extraction.

pub mod client;
pub mod extract;
pub mod source;

pub use client::{HttpClient, HttpClientConfig};
pub use source::ImdbCatalog;
