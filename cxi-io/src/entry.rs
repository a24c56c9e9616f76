//! Entry nodes: the top-level records of a file.

use hdf5::Group;

use cxi_core::validate_timestamp;

use crate::data::Data;
use crate::error::Result;
use crate::field;
use crate::image::{Image, ImageFields};
use crate::instrument::{Instrument, InstrumentFields};
use crate::node::{self, NodeKind, NodeRef};
use crate::sample::{Sample, SampleFields};

/// Optional scalar fields of an entry.
///
/// `start_time` and `end_time` must follow the fixed-width
/// `YYYY-MM-DDThh:mm:ss±hhmm` format; creation validates them before any
/// container mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFields {
    pub end_time: Option<String>,
    pub experiment_identifier: Option<String>,
    pub experiment_description: Option<String>,
    pub program_name: Option<String>,
    pub start_time: Option<String>,
    pub title: Option<String>,
}

impl EntryFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.end_time {
            field::write_string(group, "end_time", v)?;
        }
        if let Some(v) = &self.experiment_identifier {
            field::write_string(group, "experiment_identifier", v)?;
        }
        if let Some(v) = &self.experiment_description {
            field::write_string(group, "experiment_description", v)?;
        }
        if let Some(v) = &self.program_name {
            field::write_string(group, "program_name", v)?;
        }
        if let Some(v) = &self.start_time {
            field::write_string(group, "start_time", v)?;
        }
        if let Some(v) = &self.title {
            field::write_string(group, "title", v)?;
        }
        Ok(())
    }
}

/// An opened entry: fields plus unopened references to its children.
#[derive(Debug)]
pub struct Entry {
    group: Group,
    data: Vec<NodeRef<Data>>,
    images: Vec<NodeRef<Image>>,
    instruments: Vec<NodeRef<Instrument>>,
    samples: Vec<NodeRef<Sample>>,
    fields: EntryFields,
}

impl NodeKind for Entry {
    const BASE: &'static str = "entry";

    fn from_group(group: Group) -> Result<Self> {
        let fields = EntryFields {
            end_time: field::read_string(&group, "end_time")?,
            experiment_identifier: field::read_string(&group, "experiment_identifier")?,
            experiment_description: field::read_string(&group, "experiment_description")?,
            program_name: field::read_string(&group, "program_name")?,
            start_time: field::read_string(&group, "start_time")?,
            title: field::read_string(&group, "title")?,
        };
        Ok(Self {
            data: node::child_refs(&group),
            images: node::child_refs(&group),
            instruments: node::child_refs(&group),
            samples: node::child_refs(&group),
            group,
            fields,
        })
    }
}

impl Entry {
    /// Validates timestamps, then creates the next `entry_n` under `parent`
    /// and writes the present fields.
    pub(crate) fn create(parent: &Group, fields: &EntryFields) -> Result<NodeRef<Self>> {
        if let Some(t) = &fields.start_time {
            validate_timestamp(t)?;
        }
        if let Some(t) = &fields.end_time {
            validate_timestamp(t)?;
        }
        let (group, nref) = node::create_child_group::<Self>(parent)?;
        fields.write_to(&group)?;
        Ok(nref)
    }

    #[must_use]
    pub fn fields(&self) -> &EntryFields {
        &self.fields
    }

    #[must_use]
    pub fn data(&self) -> &[NodeRef<Data>] {
        &self.data
    }

    #[must_use]
    pub fn images(&self) -> &[NodeRef<Image>] {
        &self.images
    }

    #[must_use]
    pub fn instruments(&self) -> &[NodeRef<Instrument>] {
        &self.instruments
    }

    #[must_use]
    pub fn samples(&self) -> &[NodeRef<Sample>] {
        &self.samples
    }

    /// Creates a new data node under this entry.
    ///
    /// # Errors
    /// Returns an error if group creation fails.
    pub fn create_data(&mut self) -> Result<NodeRef<Data>> {
        let (_, nref) = node::create_child_group::<Data>(&self.group)?;
        self.data.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new image node under this entry.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_image(&mut self, fields: &ImageFields) -> Result<NodeRef<Image>> {
        let (group, nref) = node::create_child_group::<Image>(&self.group)?;
        fields.write_to(&group)?;
        self.images.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new instrument node under this entry.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_instrument(&mut self, fields: &InstrumentFields) -> Result<NodeRef<Instrument>> {
        let (group, nref) = node::create_child_group::<Instrument>(&self.group)?;
        fields.write_to(&group)?;
        self.instruments.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new sample node under this entry.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_sample(&mut self, fields: &SampleFields) -> Result<NodeRef<Sample>> {
        let (group, nref) = node::create_child_group::<Sample>(&self.group)?;
        fields.write_to(&group)?;
        self.samples.push(nref.clone());
        Ok(nref)
    }
}
