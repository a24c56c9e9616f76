//! I/O error types.

use thiserror::Error;

/// Result type for schema-tree I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Container engine error.
    #[error("container error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Core validation error.
    #[error("core error: {0}")]
    Core(#[from] cxi_core::Error),

    /// In-memory buffer shape error.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Dataset description has no dimensions.
    #[error("dataset description has no dimensions")]
    EmptyShape,

    /// Slice index beyond the leading extent.
    #[error("slice index {index} out of range for leading extent {extent}")]
    SliceOutOfRange { index: usize, extent: usize },

    /// Buffer length does not match the transfer size.
    #[error("buffer holds {actual} elements, transfer needs {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// String value not representable in the container.
    #[error("invalid string value: {0}")]
    InvalidString(String),
}
