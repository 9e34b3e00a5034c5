//! Error types for kit-core
//!
//! Errors fall into two tiers: parameter errors caused by what the user typed,
//! and fatal errors raised by the network, the filesystem or a remote SDK.
//! Either tier aborts the running command; the tier only decides how the
//! failure is reported and which exit code is used.

use thiserror::Error;

/// Result type alias for kit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for kit-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed command parameter (transfer address, flag value)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// URL could not be used as a bucket address
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network or remote protocol error
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether this error was caused by invalid user input rather than a runtime failure
    pub const fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidParameter(_))
    }

    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidParameter(_) => 2, // UsageError
            Error::Network(_) => 3,          // NetworkError
            Error::Auth(_) => 4,             // AuthError
            Error::NotFound(_) => 5,         // NotFound
            _ => 1,                          // GeneralError
        }
    }
}
