//! Image nodes: processed views of detector data.

use hdf5::types::H5Type;
use hdf5::Group;

use cxi_core::DatasetKind;

use crate::dataset::{self, Dataset, DatasetRef};
use crate::detector::{Detector, DetectorFields};
use crate::error::Result;
use crate::field;
use crate::node::{self, NodeKind, NodeRef};

/// Optional scalar and array fields of an image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFields {
    pub data_space: Option<String>,
    pub data_type: Option<String>,
    pub dimensionality: Option<i32>,
    pub is_fft_shifted: Option<i32>,
    pub image_center: Option<[f64; 3]>,
    pub image_size: Option<[f64; 3]>,
}

impl ImageFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.data_space {
            field::write_string(group, "data_space", v)?;
        }
        if let Some(v) = &self.data_type {
            field::write_string(group, "data_type", v)?;
        }
        if let Some(v) = self.dimensionality {
            field::write_i32(group, "dimensionality", v)?;
        }
        if let Some(v) = self.is_fft_shifted {
            field::write_i32(group, "is_fft_shifted", v)?;
        }
        if let Some(v) = &self.image_center {
            field::write_f64_vec3(group, "image_center", v)?;
        }
        if let Some(v) = &self.image_size {
            field::write_f64_vec3(group, "image_size", v)?;
        }
        Ok(())
    }
}

/// An opened image node.
#[derive(Debug)]
pub struct Image {
    group: Group,
    detectors: Vec<NodeRef<Detector>>,
    processes: Vec<NodeRef<Process>>,
    data: Option<DatasetRef>,
    data_error: Option<DatasetRef>,
    mask: Option<DatasetRef>,
    reciprocal_coordinates: Option<DatasetRef>,
    fields: ImageFields,
}

impl NodeKind for Image {
    const BASE: &'static str = "image";

    fn from_group(group: Group) -> Result<Self> {
        let fields = ImageFields {
            data_space: field::read_string(&group, "data_space")?,
            data_type: field::read_string(&group, "data_type")?,
            dimensionality: field::read_i32(&group, "dimensionality")?,
            is_fft_shifted: field::read_i32(&group, "is_fft_shifted")?,
            image_center: field::read_f64_vec3(&group, "image_center")?,
            image_size: field::read_f64_vec3(&group, "image_size")?,
        };
        Ok(Self {
            detectors: node::child_refs(&group),
            processes: node::child_refs(&group),
            data: dataset::optional_dataset_ref(&group, "data"),
            data_error: dataset::optional_dataset_ref(&group, "data_error"),
            mask: dataset::optional_dataset_ref(&group, "mask"),
            reciprocal_coordinates: dataset::optional_dataset_ref(&group, "reciprocal_coordinates"),
            group,
            fields,
        })
    }
}

impl Image {
    #[must_use]
    pub fn fields(&self) -> &ImageFields {
        &self.fields
    }

    #[must_use]
    pub fn detectors(&self) -> &[NodeRef<Detector>] {
        &self.detectors
    }

    #[must_use]
    pub fn processes(&self) -> &[NodeRef<Process>] {
        &self.processes
    }

    #[must_use]
    pub fn data(&self) -> Option<&DatasetRef> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn data_error(&self) -> Option<&DatasetRef> {
        self.data_error.as_ref()
    }

    #[must_use]
    pub fn mask(&self) -> Option<&DatasetRef> {
        self.mask.as_ref()
    }

    #[must_use]
    pub fn reciprocal_coordinates(&self) -> Option<&DatasetRef> {
        self.reciprocal_coordinates.as_ref()
    }

    /// Creates a new detector under this image.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_detector(&mut self, fields: &DetectorFields) -> Result<NodeRef<Detector>> {
        let (group, nref) = node::create_child_group::<Detector>(&self.group)?;
        fields.write_to(&group)?;
        self.detectors.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new process under this image.
    ///
    /// # Errors
    /// Returns an error if group creation fails.
    pub fn create_process(&mut self) -> Result<NodeRef<Process>> {
        let (_, nref) = node::create_child_group::<Process>(&self.group)?;
        self.processes.push(nref.clone());
        Ok(nref)
    }

    /// Creates a dataset of the given kind under this image and records the
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
            DatasetKind::DataError => self.data_error = Some(dref.clone()),
            DatasetKind::Mask => self.mask = Some(dref.clone()),
            DatasetKind::ReciprocalCoordinates => {
                self.reciprocal_coordinates = Some(dref.clone());
            }
            DatasetKind::DataDark | DatasetKind::DataWhite | DatasetKind::Errors => {}
        }
        Ok(dref)
    }
}

/// A processing-step marker group. Carries no fields of its own.
#[derive(Debug)]
pub struct Process {
    _group: Group,
}

impl NodeKind for Process {
    const BASE: &'static str = "process";

    fn from_group(group: Group) -> Result<Self> {
        Ok(Self { _group: group })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn scratch_image(fields: &ImageFields) -> (NamedTempFile, NodeRef<Image>) {
        let tmp = NamedTempFile::new().unwrap();
        let file = hdf5::File::create(tmp.path()).unwrap();
        let (group, nref) = node::create_child_group::<Image>(&file).unwrap();
        fields.write_to(&group).unwrap();
        (tmp, nref)
    }

    #[test]
    fn fields_round_trip() {
        let fields = ImageFields {
            data_space: Some("diffraction".to_string()),
            data_type: Some("intensity".to_string()),
            dimensionality: Some(2),
            is_fft_shifted: Some(0),
            image_center: Some([512.0, 512.0, 0.0]),
            image_size: Some([1024.0, 1024.0, 0.0]),
        };
        let (_tmp, nref) = scratch_image(&fields);
        let image = nref.open().unwrap();
        assert_eq!(image.fields(), &fields);
    }

    #[test]
    fn reciprocal_coordinates_slot_is_tracked() {
        let (_tmp, nref) = scratch_image(&ImageFields::default());
        let mut image = nref.open().unwrap();
        image
            .create_dataset::<f64>(DatasetKind::ReciprocalCoordinates, &[16, 3])
            .unwrap();
        let image = nref.open().unwrap();
        assert_eq!(
            image.reciprocal_coordinates().unwrap().name(),
            "reciprocal_coordinates"
        );
        assert!(image.data().is_none());
    }

    #[test]
    fn processes_and_detectors_enumerate_independently() {
        let (_tmp, nref) = scratch_image(&ImageFields::default());
        let mut image = nref.open().unwrap();
        image.create_process().unwrap();
        image.create_process().unwrap();
        image.create_detector(&DetectorFields::default()).unwrap();
        let image = nref.open().unwrap();
        assert_eq!(image.processes().len(), 2);
        assert_eq!(image.detectors().len(), 1);
        image.processes()[1].open().unwrap();
    }
}
