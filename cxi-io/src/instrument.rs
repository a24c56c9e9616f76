//! Instrument nodes and their beamline components.

use hdf5::Group;

use crate::detector::{Detector, DetectorFields};
use crate::error::Result;
use crate::field;
use crate::node::{self, NodeKind, NodeRef};

/// Optional scalar fields of an instrument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentFields {
    pub name: Option<String>,
}

impl InstrumentFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.name {
            field::write_string(group, "name", v)?;
        }
        Ok(())
    }
}

/// An opened instrument: its name plus unopened component references.
#[derive(Debug)]
pub struct Instrument {
    group: Group,
    attenuators: Vec<NodeRef<Attenuator>>,
    detectors: Vec<NodeRef<Detector>>,
    monochromators: Vec<NodeRef<Monochromator>>,
    sources: Vec<NodeRef<Source>>,
    fields: InstrumentFields,
}

impl NodeKind for Instrument {
    const BASE: &'static str = "instrument";

    fn from_group(group: Group) -> Result<Self> {
        let fields = InstrumentFields {
            name: field::read_string(&group, "name")?,
        };
        Ok(Self {
            attenuators: node::child_refs(&group),
            detectors: node::child_refs(&group),
            monochromators: node::child_refs(&group),
            sources: node::child_refs(&group),
            group,
            fields,
        })
    }
}

impl Instrument {
    #[must_use]
    pub fn fields(&self) -> &InstrumentFields {
        &self.fields
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    #[must_use]
    pub fn attenuators(&self) -> &[NodeRef<Attenuator>] {
        &self.attenuators
    }

    #[must_use]
    pub fn detectors(&self) -> &[NodeRef<Detector>] {
        &self.detectors
    }

    #[must_use]
    pub fn monochromators(&self) -> &[NodeRef<Monochromator>] {
        &self.monochromators
    }

    #[must_use]
    pub fn sources(&self) -> &[NodeRef<Source>] {
        &self.sources
    }

    /// Creates a new attenuator under this instrument.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_attenuator(&mut self, fields: &AttenuatorFields) -> Result<NodeRef<Attenuator>> {
        let (group, nref) = node::create_child_group::<Attenuator>(&self.group)?;
        fields.write_to(&group)?;
        self.attenuators.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new detector under this instrument.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_detector(&mut self, fields: &DetectorFields) -> Result<NodeRef<Detector>> {
        let (group, nref) = node::create_child_group::<Detector>(&self.group)?;
        fields.write_to(&group)?;
        self.detectors.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new monochromator under this instrument.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_monochromator(
        &mut self,
        fields: &MonochromatorFields,
    ) -> Result<NodeRef<Monochromator>> {
        let (group, nref) = node::create_child_group::<Monochromator>(&self.group)?;
        fields.write_to(&group)?;
        self.monochromators.push(nref.clone());
        Ok(nref)
    }

    /// Creates a new source under this instrument.
    ///
    /// # Errors
    /// Returns an error if group creation or field writing fails.
    pub fn create_source(&mut self, fields: &SourceFields) -> Result<NodeRef<Source>> {
        let (group, nref) = node::create_child_group::<Source>(&self.group)?;
        fields.write_to(&group)?;
        self.sources.push(nref.clone());
        Ok(nref)
    }
}

/// Optional scalar fields of a radiation source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFields {
    pub name: Option<String>,
    pub energy: Option<f64>,
    pub pulse_energy: Option<f64>,
    pub pulse_width: Option<f64>,
}

impl SourceFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = &self.name {
            field::write_string(group, "name", v)?;
        }
        if let Some(v) = self.energy {
            field::write_f64(group, "energy", v)?;
        }
        if let Some(v) = self.pulse_energy {
            field::write_f64(group, "pulse_energy", v)?;
        }
        if let Some(v) = self.pulse_width {
            field::write_f64(group, "pulse_width", v)?;
        }
        Ok(())
    }
}

/// An opened source node.
#[derive(Debug)]
pub struct Source {
    _group: Group,
    fields: SourceFields,
}

impl NodeKind for Source {
    const BASE: &'static str = "source";

    fn from_group(group: Group) -> Result<Self> {
        let fields = SourceFields {
            name: field::read_string(&group, "name")?,
            energy: field::read_f64(&group, "energy")?,
            pulse_energy: field::read_f64(&group, "pulse_energy")?,
            pulse_width: field::read_f64(&group, "pulse_width")?,
        };
        Ok(Self {
            _group: group,
            fields,
        })
    }
}

impl Source {
    #[must_use]
    pub fn fields(&self) -> &SourceFields {
        &self.fields
    }
}

/// Optional scalar fields of an attenuator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttenuatorFields {
    pub distance: Option<f64>,
    pub thickness: Option<f64>,
    pub attenuator_transmission: Option<f64>,
    pub kind: Option<String>,
}

impl AttenuatorFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = self.distance {
            field::write_f64(group, "distance", v)?;
        }
        if let Some(v) = self.thickness {
            field::write_f64(group, "thickness", v)?;
        }
        if let Some(v) = self.attenuator_transmission {
            field::write_f64(group, "attenuator_transmission", v)?;
        }
        // Stored as "type"; renamed in memory to avoid the keyword.
        if let Some(v) = &self.kind {
            field::write_string(group, "type", v)?;
        }
        Ok(())
    }
}

/// An opened attenuator node.
#[derive(Debug)]
pub struct Attenuator {
    _group: Group,
    fields: AttenuatorFields,
}

impl NodeKind for Attenuator {
    const BASE: &'static str = "attenuator";

    fn from_group(group: Group) -> Result<Self> {
        let fields = AttenuatorFields {
            distance: field::read_f64(&group, "distance")?,
            thickness: field::read_f64(&group, "thickness")?,
            attenuator_transmission: field::read_f64(&group, "attenuator_transmission")?,
            kind: field::read_string(&group, "type")?,
        };
        Ok(Self {
            _group: group,
            fields,
        })
    }
}

impl Attenuator {
    #[must_use]
    pub fn fields(&self) -> &AttenuatorFields {
        &self.fields
    }
}

/// Optional scalar fields of a monochromator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonochromatorFields {
    pub energy: Option<f64>,
    pub energy_error: Option<f64>,
}

impl MonochromatorFields {
    pub(crate) fn write_to(&self, group: &Group) -> Result<()> {
        if let Some(v) = self.energy {
            field::write_f64(group, "energy", v)?;
        }
        if let Some(v) = self.energy_error {
            field::write_f64(group, "energy_error", v)?;
        }
        Ok(())
    }
}

/// An opened monochromator node.
#[derive(Debug)]
pub struct Monochromator {
    _group: Group,
    fields: MonochromatorFields,
}

impl NodeKind for Monochromator {
    const BASE: &'static str = "monochromator";

    fn from_group(group: Group) -> Result<Self> {
        let fields = MonochromatorFields {
            energy: field::read_f64(&group, "energy")?,
            energy_error: field::read_f64(&group, "energy_error")?,
        };
        Ok(Self {
            _group: group,
            fields,
        })
    }
}

impl Monochromator {
    #[must_use]
    pub fn fields(&self) -> &MonochromatorFields {
        &self.fields
    }
}
