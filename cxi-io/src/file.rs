//! The file surface: open, create, entry enumeration, version stamp.

use std::path::{Path, PathBuf};

use hdf5::File as H5File;
use log::debug;

use cxi_core::CXI_VERSION;

use crate::entry::{Entry, EntryFields};
use crate::error::Result;
use crate::field;
use crate::node::{self, NodeRef};

/// An open container file and its top-level entry references.
///
/// Dropping the value releases the root handle; subtrees opened from it
/// stay valid through the engine's own handle refcounts.
#[derive(Debug)]
pub struct File {
    file: H5File,
    path: PathBuf,
    entries: Vec<NodeRef<Entry>>,
    version: Option<i32>,
}

impl File {
    /// Opens an existing file read-only and enumerates its entries.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened as a container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("opening file {}", path.display());
        let file = H5File::open(&path)?;
        let entries = node::child_refs(&file);
        let version = field::read_i32(&file, "cxi_version")?;
        Ok(Self {
            file,
            path,
            entries,
            version,
        })
    }

    /// Creates a new file, truncating any existing one, and stamps the
    /// format version.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("creating file {}", path.display());
        let file = H5File::create(&path)?;
        field::write_i32(&file, "cxi_version", CXI_VERSION)?;
        Ok(Self {
            file,
            path,
            entries: Vec::new(),
            version: Some(CXI_VERSION),
        })
    }

    /// Path the file was opened or created with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored format version, if the file carries a readable one.
    #[must_use]
    pub fn version(&self) -> Option<i32> {
        self.version
    }

    /// Unopened references to the file's entries, ordered by suffix.
    #[must_use]
    pub fn entries(&self) -> &[NodeRef<Entry>] {
        &self.entries
    }

    /// Creates a new entry at the next free suffix.
    ///
    /// Timestamp fields are validated before anything is written; on
    /// validation failure the file is left untouched.
    ///
    /// # Errors
    /// Returns an error on invalid timestamps or a failed creation.
    pub fn create_entry(&mut self, fields: &EntryFields) -> Result<NodeRef<Entry>> {
        let nref = Entry::create(&self.file, fields)?;
        self.entries.push(nref.clone());
        Ok(nref)
    }

    /// Closes the file, releasing the root handle.
    pub fn close(self) {
        debug!("closing file {}", self.path.display());
        drop(self);
    }
}
