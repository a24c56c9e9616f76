//! Error types for cxi-core.

use thiserror::Error;

/// Result type alias for core validation.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Timestamp does not follow the fixed-width ISO 8601 pattern.
    #[error("timestamp {0:?} does not follow YYYY-MM-DDThh:mm:ss±hhmm")]
    InvalidTimestamp(String),
}
