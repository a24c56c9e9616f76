//! N-dimensional dataset access: open, create, full and per-slice I/O.
//!
//! A slice always addresses one index along dimension 0, the schema's
//! per-shot/per-frame axis; slicing any other dimension is out of scope.
//! Element-type conversion between the on-disk type and the in-memory
//! type is delegated to the container engine.

use std::fmt;

use hdf5::types::{H5Type, TypeDescriptor};
use hdf5::Group;
use log::debug;
use ndarray::{ArrayViewD, IxDyn, SliceInfo, SliceInfoElem};

use cxi_core::DatasetKind;

use crate::error::{Error, Result};

/// Unopened handle to a named dataset under a group.
#[derive(Clone)]
pub struct DatasetRef {
    parent: Group,
    name: String,
}

impl fmt::Debug for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetRef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl DatasetRef {
    pub(crate) fn new(parent: Group, name: &str) -> Self {
        Self {
            parent,
            name: name.to_string(),
        }
    }

    /// On-disk dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens the dataset and reads back its element type and dimensions.
    ///
    /// # Errors
    /// Returns an error if the underlying open fails.
    pub fn open(&self) -> Result<Dataset> {
        debug!("opening dataset {}", self.name);
        let ds = self.parent.dataset(&self.name)?;
        let dims = ds.shape();
        let element_type = ds.dtype()?.to_descriptor()?;
        Ok(Dataset {
            ds,
            dims,
            element_type,
        })
    }
}

/// Discovers an optional named dataset under `parent` without opening it.
pub(crate) fn optional_dataset_ref(parent: &Group, name: &str) -> Option<DatasetRef> {
    parent
        .link_exists(name)
        .then(|| DatasetRef::new(parent.clone(), name))
}

/// An opened n-dimensional dataset with consistent shape metadata.
#[derive(Debug)]
pub struct Dataset {
    ds: hdf5::Dataset,
    dims: Vec<usize>,
    element_type: TypeDescriptor,
}

impl Dataset {
    /// Creates a new dataset named per the kind registry and returns an
    /// unopened reference to it.
    ///
    /// # Errors
    /// Returns [`Error::EmptyShape`] for an empty dimension list, or the
    /// engine error if creation at this location fails.
    pub fn create<T: H5Type>(
        parent: &Group,
        kind: DatasetKind,
        dims: &[usize],
    ) -> Result<DatasetRef> {
        if dims.is_empty() {
            return Err(Error::EmptyShape);
        }
        let name = kind.dataset_name();
        debug!("creating dataset {name} with dims {dims:?}");
        parent.new_dataset::<T>().shape(dims.to_vec()).create(name)?;
        Ok(DatasetRef::new(parent.clone(), name))
    }

    /// Ordered dimension extents, leading dimension first.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Element type stored on disk.
    #[must_use]
    pub fn element_type(&self) -> &TypeDescriptor {
        &self.element_type
    }

    /// Total number of elements. A dimensionless dataset reports 0 rather
    /// than an error.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dims.is_empty() {
            0
        } else {
            self.dims.iter().product()
        }
    }

    /// True if the dataset holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements in one leading-dimension slice.
    #[must_use]
    pub fn slice_len(&self) -> usize {
        if self.dims.is_empty() {
            0
        } else {
            self.dims[1..].iter().product()
        }
    }

    /// Reads the entire dataset in row-major order, converting to `T`.
    ///
    /// # Errors
    /// Returns an error if the engine-level read or conversion fails.
    pub fn read<T: H5Type>(&self) -> Result<Vec<T>> {
        Ok(self.ds.read_raw()?)
    }

    /// Writes the entire dataset from a row-major buffer of `len()`
    /// elements, converting from `T`.
    ///
    /// # Errors
    /// Returns [`Error::BufferSize`] on a length mismatch, or the engine
    /// error if the write fails.
    pub fn write<T: H5Type>(&self, data: &[T]) -> Result<()> {
        if data.len() != self.len() {
            return Err(Error::BufferSize {
                expected: self.len(),
                actual: data.len(),
            });
        }
        self.ds
            .write(ArrayViewD::from_shape(IxDyn(&self.dims), data)?)?;
        Ok(())
    }

    /// Reads the slice at `index` along dimension 0 (`slice_len()`
    /// elements), converting to `T`.
    ///
    /// # Errors
    /// Returns [`Error::SliceOutOfRange`] for an out-of-range index rather
    /// than clamping.
    pub fn read_slice<T: H5Type>(&self, index: usize) -> Result<Vec<T>> {
        self.check_slice(index)?;
        let out = self
            .ds
            .read_slice::<T, _, IxDyn>(self.slice_selection(index)?)?;
        Ok(out.into_iter().collect())
    }

    /// Writes the slice at `index` along dimension 0 from a buffer of
    /// `slice_len()` elements, converting from `T`.
    ///
    /// # Errors
    /// Returns [`Error::SliceOutOfRange`] for an out-of-range index and
    /// [`Error::BufferSize`] on a length mismatch.
    pub fn write_slice<T: H5Type>(&self, index: usize, data: &[T]) -> Result<()> {
        self.check_slice(index)?;
        if data.len() != self.slice_len() {
            return Err(Error::BufferSize {
                expected: self.slice_len(),
                actual: data.len(),
            });
        }
        let mut shape = Vec::with_capacity(self.dims.len());
        shape.push(1);
        shape.extend_from_slice(&self.dims[1..]);
        let view = ArrayViewD::from_shape(IxDyn(&shape), data)?;
        self.ds.write_slice(view, self.slice_selection(index)?)?;
        Ok(())
    }

    /// Hyperslab covering the `index`-th step of dimension 0 and the full
    /// extent of every other dimension, built for the dataset's own rank.
    fn slice_selection(
        &self,
        index: usize,
    ) -> Result<SliceInfo<Vec<SliceInfoElem>, IxDyn, IxDyn>> {
        let mut elems = Vec::with_capacity(self.dims.len());
        elems.push(SliceInfoElem::Slice {
            start: index as isize,
            end: Some(index as isize + 1),
            step: 1,
        });
        elems.extend(self.dims[1..].iter().map(|&extent| SliceInfoElem::Slice {
            start: 0,
            end: Some(extent as isize),
            step: 1,
        }));
        Ok(SliceInfo::try_from(elems)?)
    }

    fn check_slice(&self, index: usize) -> Result<()> {
        if self.dims.is_empty() {
            return Err(Error::EmptyShape);
        }
        if index >= self.dims[0] {
            return Err(Error::SliceOutOfRange {
                index,
                extent: self.dims[0],
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn scratch() -> (NamedTempFile, hdf5::File) {
        let tmp = NamedTempFile::new().unwrap();
        let file = hdf5::File::create(tmp.path()).unwrap();
        (tmp, file)
    }

    #[test]
    fn create_rejects_empty_shape() {
        let (_tmp, file) = scratch();
        let err = Dataset::create::<i32>(&file, DatasetKind::Data, &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyShape));
    }

    #[test]
    fn open_reports_consistent_shape_metadata() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<f64>(&file, DatasetKind::DataDark, &[4, 3, 2]).unwrap();
        assert_eq!(dref.name(), "data_dark");
        let ds = dref.open().unwrap();
        assert_eq!(ds.dims(), &[4, 3, 2]);
        assert_eq!(ds.ndim(), 3);
        assert_eq!(ds.len(), 24);
        assert_eq!(ds.slice_len(), 6);
        assert!(matches!(
            ds.element_type(),
            TypeDescriptor::Float(hdf5::types::FloatSize::U8)
        ));
    }

    #[test]
    fn full_round_trip() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Data, &[10]).unwrap();
        let ds = dref.open().unwrap();
        let values: Vec<i32> = (1..=10).collect();
        ds.write(&values).unwrap();
        assert_eq!(ds.read::<i32>().unwrap(), values);
    }

    #[test]
    fn slices_concatenate_to_full_contents() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Data, &[3, 2, 2]).unwrap();
        let ds = dref.open().unwrap();
        let values: Vec<i32> = (0..12).collect();
        ds.write(&values).unwrap();

        let mut concatenated = Vec::new();
        for index in 0..3 {
            let slice = ds.read_slice::<i32>(index).unwrap();
            assert_eq!(slice.len(), ds.slice_len());
            concatenated.extend(slice);
        }
        assert_eq!(concatenated, ds.read::<i32>().unwrap());
    }

    #[test]
    fn slice_writes_land_at_the_right_offset() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<f64>(&file, DatasetKind::Data, &[2, 3]).unwrap();
        let ds = dref.open().unwrap();
        ds.write(&[0.0; 6]).unwrap();
        ds.write_slice(1, &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(ds.read::<f64>().unwrap(), vec![0.0, 0.0, 0.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn out_of_range_slice_is_an_error_not_a_clamp() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Data, &[3, 2]).unwrap();
        let ds = dref.open().unwrap();
        let err = ds.read_slice::<i32>(3).unwrap_err();
        assert!(matches!(err, Error::SliceOutOfRange { index: 3, extent: 3 }));
        let err = ds.write_slice(7, &[0, 0]).unwrap_err();
        assert!(matches!(err, Error::SliceOutOfRange { index: 7, extent: 3 }));
    }

    #[test]
    fn write_rejects_wrong_buffer_length() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Data, &[2, 2]).unwrap();
        let ds = dref.open().unwrap();
        let err = ds.write(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 4, actual: 3 }));
        let err = ds.write_slice(0, &[1]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 2, actual: 1 }));
    }

    #[test]
    fn element_type_conversion_on_read() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Mask, &[4]).unwrap();
        let ds = dref.open().unwrap();
        ds.write(&[1_i32, 0, 1, 1]).unwrap();
        let as_f64 = ds.read::<f64>().unwrap();
        assert_eq!(as_f64, vec![1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn slices_are_not_rank_limited() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Data, &[2, 2, 2, 2, 2]).unwrap();
        let ds = dref.open().unwrap();
        let values: Vec<i32> = (0..32).collect();
        ds.write(&values).unwrap();
        assert_eq!(ds.slice_len(), 16);
        assert_eq!(
            ds.read_slice::<i32>(1).unwrap(),
            (16..32).collect::<Vec<_>>()
        );

        let replacement: Vec<i32> = (100..116).collect();
        ds.write_slice(0, &replacement).unwrap();
        let full = ds.read::<i32>().unwrap();
        assert_eq!(full[..16], replacement[..]);
        assert_eq!(full[16..], values[16..]);
    }

    #[test]
    fn slice_of_one_dimensional_dataset_is_one_element() {
        let (_tmp, file) = scratch();
        let dref = Dataset::create::<i32>(&file, DatasetKind::Data, &[10]).unwrap();
        let ds = dref.open().unwrap();
        let values: Vec<i32> = (1..=10).collect();
        ds.write(&values).unwrap();
        assert_eq!(ds.slice_len(), 1);
        assert_eq!(ds.read_slice::<i32>(2).unwrap(), vec![3]);
    }
}
