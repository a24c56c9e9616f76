//! Sample nodes.

use hdf5::Group;

use crate::error::Result;
use crate::field;
use crate::node::NodeKind;

/// Optional scalar and array fields of a sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_cell_group: Option<String>,
    pub concentration: Option<f64>,
    pub mass: Option<f64>,
    pub temperature: Option<f64>,
    pub thickness: Option<f64>,
    pub unit_cell_volume: Option<f64>,
    pub unit_cell: Option<[[f64; 3]; 2]>,
}

impl SampleFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.name {
            field::write_string(group, "name", v)?;
        }
        if let Some(v) = &self.description {
            field::write_string(group, "description", v)?;
        }
        if let Some(v) = &self.unit_cell_group {
            field::write_string(group, "unit_cell_group", v)?;
        }
        if let Some(v) = self.concentration {
            field::write_f64(group, "concentration", v)?;
        }
        if let Some(v) = self.mass {
            field::write_f64(group, "mass", v)?;
        }
        if let Some(v) = self.temperature {
            field::write_f64(group, "temperature", v)?;
        }
        if let Some(v) = self.thickness {
            field::write_f64(group, "thickness", v)?;
        }
        if let Some(v) = self.unit_cell_volume {
            field::write_f64(group, "unit_cell_volume", v)?;
        }
        if let Some(v) = &self.unit_cell {
            field::write_f64_mat2x3(group, "unit_cell", v)?;
        }
        Ok(())
    }
}

/// An opened sample node.
#[derive(Debug)]
pub struct Sample {
    _group: Group,
    fields: SampleFields,
}

impl NodeKind for Sample {
    const BASE: &'static str = "sample";

    fn from_group(group: Group) -> Result<Self> {
        let fields = SampleFields {
            name: field::read_string(&group, "name")?,
            description: field::read_string(&group, "description")?,
            unit_cell_group: field::read_string(&group, "unit_cell_group")?,
            concentration: field::read_f64(&group, "concentration")?,
            mass: field::read_f64(&group, "mass")?,
            temperature: field::read_f64(&group, "temperature")?,
            thickness: field::read_f64(&group, "thickness")?,
            unit_cell_volume: field::read_f64(&group, "unit_cell_volume")?,
            unit_cell: field::read_f64_mat2x3(&group, "unit_cell")?,
        };
        Ok(Self {
            _group: group,
            fields,
        })
    }
}

impl Sample {
    #[must_use]
    pub fn fields(&self) -> &SampleFields {
        &self.fields
    }
}
