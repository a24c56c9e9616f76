//! Data nodes: bare value/error dataset pairs under an entry.

use hdf5::types::H5Type;
use hdf5::Group;

use cxi_core::DatasetKind;

use crate::dataset::{self, Dataset, DatasetRef};
use crate::error::Result;
use crate::node::NodeKind;

/// An opened data node.
#[derive(Debug)]
pub struct Data {
    group: Group,
    data: Option<DatasetRef>,
    errors: Option<DatasetRef>,
}

impl NodeKind for Data {
    const BASE: &'static str = "data";

    fn from_group(group: Group) -> Result<Self> {
        Ok(Self {
            data: dataset::optional_dataset_ref(&group, "data"),
            errors: dataset::optional_dataset_ref(&group, "errors"),
            group,
        })
    }
}

impl Data {
    #[must_use]
    pub fn data(&self) -> Option<&DatasetRef> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn errors(&self) -> Option<&DatasetRef> {
        self.errors.as_ref()
    }

    /// Creates a dataset of the given kind under this node and records the
    /// reference if the kind has a slot here.
    ///
    /// # Errors
    /// Returns an error if creation fails or `dims` is empty.
    pub fn create_dataset<T: H5Type>(
        &mut self,
        kind: DatasetKind,
        dims: &[usize],
    ) -> Result<DatasetRef> {
        let dref = Dataset::create::<T>(&self.group, kind, dims)?;
        match kind {
            DatasetKind::Data => self.data = Some(dref.clone()),
            DatasetKind::Errors => self.errors = Some(dref.clone()),
            _ => {}
        }
        Ok(dref)
    }
}
