//! Error handling for costar.
//! One error enum per subsystem, `thiserror` only, aggregated by `CostarError`.

pub mod catalog_error;
pub mod config_error;
pub mod costar_error;
pub mod error_code;
pub mod search_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use costar_error::{CostarError, CostarResult};
pub use error_code::CostarErrorCode;
pub use search_error::SearchError;
