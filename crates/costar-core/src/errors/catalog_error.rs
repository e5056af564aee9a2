use super::error_code::{self, CostarErrorCode};

/// Data-source failures. Inside a search these are localized: the engine
/// logs them and treats the node as contributing nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("catalog returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("could not extract {what} from {url}")]
    Parse { url: String, what: String },

    #[error("catalog file {path}: {reason}")]
    Io { path: String, reason: String },
}

impl CostarErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } => error_code::CATALOG_NETWORK,
            Self::HttpStatus { .. } => error_code::CATALOG_HTTP_STATUS,
            Self::Parse { .. } => error_code::CATALOG_PARSE,
            Self::Io { .. } => error_code::CATALOG_IO,
        }
    }
}

impl CatalogError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Parse { .. } | Self::Io { .. } => false,
        }
    }
}
