//! Semantic dataset roles and their canonical on-disk names.

/// Semantic role of an n-dimensional dataset within the schema.
///
/// The registry is consulted only when *creating* datasets; reads address
/// datasets by their already-known name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Primary measured data.
    Data,
    /// Dark-field calibration frames.
    DataDark,
    /// White-field calibration frames.
    DataWhite,
    /// Per-pixel error estimates for the primary data.
    DataError,
    /// Generic error values attached to a data group.
    Errors,
    /// Per-pixel validity mask.
    Mask,
    /// Reciprocal-space coordinates for image data.
    ReciprocalCoordinates,
}

impl DatasetKind {
    /// All kinds, in registry order.
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::Data,
        DatasetKind::DataDark,
        DatasetKind::DataWhite,
        DatasetKind::DataError,
        DatasetKind::Errors,
        DatasetKind::Mask,
        DatasetKind::ReciprocalCoordinates,
    ];

    /// Canonical on-disk dataset name for this kind.
    #[must_use]
    pub fn dataset_name(self) -> &'static str {
        match self {
            DatasetKind::Data => "data",
            DatasetKind::DataDark => "data_dark",
            DatasetKind::DataWhite => "data_white",
            DatasetKind::DataError => "data_error",
            DatasetKind::Errors => "errors",
            DatasetKind::Mask => "mask",
            DatasetKind::ReciprocalCoordinates => "reciprocal_coordinates",
        }
    }

    /// Looks a kind up by its canonical on-disk name.
    #[must_use]
    pub fn from_dataset_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.dataset_name() == name)
    }
}
