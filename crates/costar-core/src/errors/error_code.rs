//! Stable error codes for machine-readable output.

/// Every error enum provides a stable code string, used by the CLI's JSON
/// output and by log fields.
pub trait CostarErrorCode {
    /// Returns the error code (e.g. `"CATALOG_NETWORK"`).
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CATALOG_NETWORK: &str = "CATALOG_NETWORK";
pub const CATALOG_HTTP_STATUS: &str = "CATALOG_HTTP_STATUS";
pub const CATALOG_PARSE: &str = "CATALOG_PARSE";
pub const CATALOG_IO: &str = "CATALOG_IO";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNRESOLVED_ACTOR: &str = "UNRESOLVED_ACTOR";
pub const CANCELLED: &str = "CANCELLED";
pub const TIMED_OUT: &str = "TIMED_OUT";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const SERIALIZATION: &str = "SERIALIZATION";
