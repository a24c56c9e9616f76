//! HDF5-backed access to CXI scientific-imaging records.
//!
//! The schema is a tree of repeatable, suffix-numbered groups (`entry_1`,
//! `instrument_2`, …) holding optional scalar fields and n-dimensional
//! datasets. Access is typed and lazy: opening a node yields its own
//! fields plus unopened references to its children, and nothing below is
//! touched until a reference is opened.
//!
//! ```no_run
//! use cxi_io::File;
//!
//! # fn main() -> cxi_io::Result<()> {
//! let file = File::open("run_0042.cxi")?;
//! for entry_ref in file.entries() {
//!     let entry = entry_ref.open()?;
//!     println!("{:?}", entry.fields().start_time);
//! }
//! # Ok(())
//! # }
//! ```

mod data;
mod dataset;
mod detector;
mod entry;
mod error;
mod field;
mod file;
mod image;
mod instrument;
mod node;
mod probe;
mod sample;

pub use crate::data::Data;
pub use crate::dataset::{Dataset, DatasetRef};
pub use crate::detector::{Detector, DetectorFields, Geometry, GeometryFields};
pub use crate::entry::{Entry, EntryFields};
pub use crate::error::{Error, Result};
pub use crate::file::File;
pub use crate::image::{Image, ImageFields, Process};
pub use crate::instrument::{
    Attenuator, AttenuatorFields, Instrument, InstrumentFields, Monochromator,
    MonochromatorFields, Source, SourceFields,
};
pub use crate::node::{NodeKind, NodeRef};
pub use crate::probe::{count_suffixed, next_suffixed_name, suffixed_name};
pub use crate::sample::{Sample, SampleFields};

pub use cxi_core::{DatasetKind, CXI_VERSION};
