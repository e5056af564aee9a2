use super::error_code::{self, CostarErrorCode};
use super::{CatalogError, ConfigError, SearchError};

/// Top-level error aggregating every subsystem.
#[derive(Debug, thiserror::Error)]
pub enum CostarError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CostarErrorCode for CostarError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Search(e) => e.error_code(),
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::Serialization(_) => error_code::SERIALIZATION,
        }
    }
}

pub type CostarResult<T> = Result<T, CostarError>;
