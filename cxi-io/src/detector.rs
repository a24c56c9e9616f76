//! Detector nodes: frame datasets, geometry children, and the pixel-frame
//! fields with their historical defaults.

use hdf5::types::H5Type;
use hdf5::Group;

use cxi_core::DatasetKind;

use crate::dataset::{self, Dataset, DatasetRef};
use crate::error::Result;
use crate::field;
use crate::node::{self, NodeKind, NodeRef};

/// Optional scalar and array fields of a detector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorFields {
    pub basis_vectors: Option<[[f64; 3]; 2]>,
    pub corner_position: Option<[f64; 3]>,
    pub counts_per_joule: Option<f64>,
    pub data_sum: Option<f64>,
    pub description: Option<String>,
    pub distance: Option<f64>,
    pub x_pixel_size: Option<f64>,
    pub y_pixel_size: Option<f64>,
}

impl DetectorFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.basis_vectors {
            field::write_f64_mat2x3(group, "basis_vectors", v)?;
        }
        if let Some(v) = &self.corner_position {
            field::write_f64_vec3(group, "corner_position", v)?;
        }
        if let Some(v) = self.counts_per_joule {
            field::write_f64(group, "counts_per_joule", v)?;
        }
        if let Some(v) = self.data_sum {
            field::write_f64(group, "data_sum", v)?;
        }
        if let Some(v) = &self.description {
            field::write_string(group, "description", v)?;
        }
        if let Some(v) = self.distance {
            field::write_f64(group, "distance", v)?;
        }
        if let Some(v) = self.x_pixel_size {
            field::write_f64(group, "x_pixel_size", v)?;
        }
        if let Some(v) = self.y_pixel_size {
            field::write_f64(group, "y_pixel_size", v)?;
        }
        Ok(())
    }
}

/// An opened detector node.
#[derive(Debug)]
pub struct Detector {
    group: Group,
    geometries: Vec<NodeRef<Geometry>>,
    data: Option<DatasetRef>,
    data_dark: Option<DatasetRef>,
    data_white: Option<DatasetRef>,
    data_error: Option<DatasetRef>,
    mask: Option<DatasetRef>,
    fields: DetectorFields,
}

impl NodeKind for Detector {
    const BASE: &'static str = "detector";

    fn from_group(group: Group) -> Result<Self> {
        let fields = DetectorFields {
            basis_vectors: field::read_f64_mat2x3(&group, "basis_vectors")?,
            corner_position: field::read_f64_vec3(&group, "corner_position")?,
            counts_per_joule: field::read_f64(&group, "counts_per_joule")?,
            data_sum: field::read_f64(&group, "data_sum")?,
            description: field::read_string(&group, "description")?,
            distance: field::read_f64(&group, "distance")?,
            x_pixel_size: field::read_f64(&group, "x_pixel_size")?,
            y_pixel_size: field::read_f64(&group, "y_pixel_size")?,
        };
        Ok(Self {
            geometries: node::child_refs(&group),
            data: dataset::optional_dataset_ref(&group, "data"),
            data_dark: dataset::optional_dataset_ref(&group, "data_dark"),
            data_white: dataset::optional_dataset_ref(&group, "data_white"),
            data_error: dataset::optional_dataset_ref(&group, "data_error"),
            mask: dataset::optional_dataset_ref(&group, "mask"),
            group,
            fields,
        })
    }
}

impl Detector {
    #[must_use]
    pub fn fields(&self) -> &DetectorFields {
        &self.fields
    }

    #[must_use]
    pub fn geometries(&self) -> &[NodeRef<Geometry>] {
        &self.geometries
    }

    #[must_use]
    pub fn data(&self) -> Option<&DatasetRef> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn data_dark(&self) -> Option<&DatasetRef> {
        self.data_dark.as_ref()
    }

    #[must_use]
    pub fn data_white(&self) -> Option<&DatasetRef> {
        self.data_white.as_ref()
    }

    #[must_use]
    pub fn data_error(&self) -> Option<&DatasetRef> {
        self.data_error.as_ref()
    }

    #[must_use]
    pub fn mask(&self) -> Option<&DatasetRef> {
        self.mask.as_ref()
    }

    /// Horizontal pixel size, defaulting to 1.0 when unset.
    #[must_use]
    pub fn x_pixel_size_or_default(&self) -> f64 {
        self.fields.x_pixel_size.unwrap_or(1.0)
    }

    /// Vertical pixel size, defaulting to 1.0 when unset.
    #[must_use]
    pub fn y_pixel_size_or_default(&self) -> f64 {
        self.fields.y_pixel_size.unwrap_or(1.0)
    }

    /// Detector basis vectors, defaulting to the pixel-size-derived frame
    /// (rows along -y, columns along -x) when unset.
    #[must_use]
    pub fn basis_vectors_or_default(&self) -> [[f64; 3]; 2] {
        self.fields.basis_vectors.unwrap_or([
            [0.0, -self.y_pixel_size_or_default(), 0.0],
            [-self.x_pixel_size_or_default(), 0.0, 0.0],
        ])
    }

    /// Creates a new geometry under this detector.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_geometry(&mut self, fields: &GeometryFields) -> Result<NodeRef<Geometry>> {
        let (group, nref) = node::create_child_group::<Geometry>(&self.group)?;
        fields.write_to(&group)?;
        self.geometries.push(nref.clone());
        Ok(nref)
    }

    /// Creates a dataset of the given kind under this detector and records
    /// the reference if the kind has a slot here.
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
            DatasetKind::DataDark => self.data_dark = Some(dref.clone()),
            DatasetKind::DataWhite => self.data_white = Some(dref.clone()),
            DatasetKind::DataError => self.data_error = Some(dref.clone()),
            DatasetKind::Mask => self.mask = Some(dref.clone()),
            DatasetKind::Errors | DatasetKind::ReciprocalCoordinates => {}
        }
        Ok(dref)
    }
}

/// Optional array fields of a detector geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryFields {
    pub orientation: Option<[[f64; 3]; 2]>,
    pub translation: Option<[f64; 3]>,
}

impl GeometryFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.orientation {
            field::write_f64_mat2x3(group, "orientation", v)?;
        }
        if let Some(v) = &self.translation {
            field::write_f64_vec3(group, "translation", v)?;
        }
        Ok(())
    }
}

/// An opened geometry node.
#[derive(Debug)]
pub struct Geometry {
    _group: Group,
    fields: GeometryFields,
}

impl NodeKind for Geometry {
    const BASE: &'static str = "geometry";

    fn from_group(group: Group) -> Result<Self> {
        let fields = GeometryFields {
            orientation: field::read_f64_mat2x3(&group, "orientation")?,
            translation: field::read_f64_vec3(&group, "translation")?,
        };
        Ok(Self {
            _group: group,
            fields,
        })
    }
}

impl Geometry {
    #[must_use]
    pub fn fields(&self) -> &GeometryFields {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    fn scratch_detector(fields: &DetectorFields) -> (NamedTempFile, NodeRef<Detector>) {
        let tmp = NamedTempFile::new().unwrap();
        let file = hdf5::File::create(tmp.path()).unwrap();
        let (group, nref) = node::create_child_group::<Detector>(&file).unwrap();
        fields.write_to(&group).unwrap();
        (tmp, nref)
    }

    #[test]
    fn fields_round_trip() {
        let fields = DetectorFields {
            corner_position: Some([0.1, -0.2, 0.55]),
            description: Some("pnCCD front".to_string()),
            distance: Some(0.15),
            x_pixel_size: Some(75.0e-6),
            y_pixel_size: Some(75.0e-6),
            ..DetectorFields::default()
        };
        let (_tmp, nref) = scratch_detector(&fields);
        let detector = nref.open().unwrap();
        assert_eq!(detector.fields(), &fields);
    }

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let (_tmp, nref) = scratch_detector(&DetectorFields::default());
        let detector = nref.open().unwrap();
        assert_relative_eq!(detector.x_pixel_size_or_default(), 1.0);
        assert_relative_eq!(detector.y_pixel_size_or_default(), 1.0);
        assert_eq!(
            detector.basis_vectors_or_default(),
            [[0.0, -1.0, 0.0], [-1.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn default_basis_vectors_follow_pixel_sizes() {
        let fields = DetectorFields {
            x_pixel_size: Some(2.0),
            y_pixel_size: Some(3.0),
            ..DetectorFields::default()
        };
        let (_tmp, nref) = scratch_detector(&fields);
        let detector = nref.open().unwrap();
        assert_eq!(
            detector.basis_vectors_or_default(),
            [[0.0, -3.0, 0.0], [-2.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn explicit_basis_vectors_win_over_defaults() {
        let basis = [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
        let fields = DetectorFields {
            basis_vectors: Some(basis),
            ..DetectorFields::default()
        };
        let (_tmp, nref) = scratch_detector(&fields);
        let detector = nref.open().unwrap();
        assert_eq!(detector.basis_vectors_or_default(), basis);
    }

    #[test]
    fn created_datasets_are_rediscovered_on_reopen() {
        let (_tmp, nref) = scratch_detector(&DetectorFields::default());
        let mut detector = nref.open().unwrap();
        assert!(detector.data().is_none());
        detector
            .create_dataset::<i32>(DatasetKind::Data, &[10])
            .unwrap();
        detector
            .create_dataset::<i32>(DatasetKind::Mask, &[10])
            .unwrap();
        assert!(detector.data().is_some());
        assert!(detector.mask().is_some());

        let detector = nref.open().unwrap();
        assert_eq!(detector.data().unwrap().name(), "data");
        assert_eq!(detector.mask().unwrap().name(), "mask");
        assert!(detector.data_dark().is_none());
    }

    #[test]
    fn geometry_round_trip() {
        let (_tmp, nref) = scratch_detector(&DetectorFields::default());
        let mut detector = nref.open().unwrap();
        let fields = GeometryFields {
            orientation: Some([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            translation: Some([0.0, 0.0, -0.5]),
        };
        detector.create_geometry(&fields).unwrap();
        let detector = nref.open().unwrap();
        assert_eq!(detector.geometries().len(), 1);
        let geometry = detector.geometries()[0].open().unwrap();
        assert_eq!(geometry.fields(), &fields);
    }
}
