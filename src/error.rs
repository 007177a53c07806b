//! Error types for the store facade
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for store, conversion and fetch failures.
///
/// Absent keys are not errors: lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store could not be reached (refused, dropped, IO, timeout)
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected a command
    #[error("Store error: {0}")]
    Store(String),

    /// Operation against a key holding the wrong kind of value
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// Invalid argument passed to a store command
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Stored bytes could not be converted to the requested type
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Network fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

// == Conversions ==
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            CacheError::StoreUnavailable(err.to_string())
        } else if err.code() == Some("WRONGTYPE") {
            CacheError::WrongType(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::Conversion("invalid digit".to_string());
        assert_eq!(err.to_string(), "Conversion failed: invalid digit");

        let err = CacheError::WrongType("list".to_string());
        assert_eq!(err.to_string(), "Wrong type: list");
    }

    #[test]
    fn test_redis_command_error_maps_to_store() {
        let err: CacheError =
            redis::RedisError::from((redis::ErrorKind::TypeError, "bad reply")).into();
        assert!(matches!(err, CacheError::Store(_)));
    }

    #[test]
    fn test_redis_io_error_maps_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: CacheError = redis::RedisError::from(io).into();
        assert!(matches!(err, CacheError::StoreUnavailable(_)));
    }
}
