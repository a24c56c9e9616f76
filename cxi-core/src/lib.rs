//! cxi-core: Core vocabulary for CXI scientific-imaging records.
//!
//! This crate holds the container-independent pieces of the CXI schema:
//! the dataset-kind registry, the timestamp validator, and the stored
//! format-version constant. The HDF5-backed tree lives in `cxi-io`.

pub mod error;
pub mod kind;
pub mod timestamp;

pub use error::{Error, Result};
pub use kind::DatasetKind;
pub use timestamp::{is_iso8601, validate_timestamp};

/// Format version stamped into newly created files, as `major * 100 + minor`.
///
/// Files reporting a higher version than this may contain schema elements
/// this library does not know about; reads remain best-effort either way.
pub const CXI_VERSION: i32 = 130;
