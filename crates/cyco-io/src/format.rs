//! File type detection and whole-document read/write.
//!
//! A file's type comes from its extension alone: the name must carry exactly
//! one extension, and that extension must be one of [`FileType::ALL`].

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use cyco_core::cosim::{Cosimulation, CosimulationFederate};
use cyco_core::{
    Component, CycoError, CycoResult, Curves, DynamicModel, JobDescriptor, ParameterSet,
};
use tracing::debug;

use crate::json::read_json;
use crate::mapper::curves::{parse_curves, serialize_curves};
use crate::mapper::dynamic::{parse_dynamic, serialize_dynamic};
use crate::mapper::federate::{parse_federate, write_federate_json};
use crate::mapper::jobs::{parse_jobs, serialize_jobs};
use crate::mapper::network::{parse_network, serialize_network};
use crate::mapper::parameters::{parse_parameters, serialize_parameters};
use crate::schema::federate::JSON_ROOT;
use crate::tree::AttributedTree;
use crate::xml::{read_xml, write_xml};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Static network
    Iidm,
    /// Static network, extended IIDM
    Xiidm,
    /// Dynamic model wiring
    Dyd,
    /// Parameter sets
    Par,
    /// Simulation job
    Jobs,
    /// Output curves
    Crv,
    /// Federate descriptor, XML encoding
    Xml,
    /// Federate config, JSON encoding
    Json,
}

impl FileType {
    pub const ALL: &'static [FileType] = &[
        FileType::Iidm,
        FileType::Xiidm,
        FileType::Dyd,
        FileType::Par,
        FileType::Jobs,
        FileType::Crv,
        FileType::Xml,
        FileType::Json,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Iidm => "iidm",
            FileType::Xiidm => "xiidm",
            FileType::Dyd => "dyd",
            FileType::Par => "par",
            FileType::Jobs => "jobs",
            FileType::Crv => "crv",
            FileType::Xml => "xml",
            FileType::Json => "json",
        }
    }

    pub fn friendly_name(&self) -> &'static str {
        match self {
            FileType::Iidm | FileType::Xiidm => "IIDM static network",
            FileType::Dyd => "DYD dynamic models",
            FileType::Par => "PAR parameter sets",
            FileType::Jobs => "JOBS job descriptor",
            FileType::Crv => "CRV curve list",
            FileType::Xml => "XML federate descriptor",
            FileType::Json => "JSON federate config",
        }
    }

    pub fn from_extension(extension: &str) -> Option<FileType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.extension().eq_ignore_ascii_case(extension))
    }

    /// Type of `path` from its file name. Does not touch the filesystem.
    pub fn detect(path: &Path) -> CycoResult<FileType> {
        let unknown = |reason: &str| CycoError::UnknownFileFormat {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| unknown("no file name"))?;
        let mut parts = name.split('.');
        let (Some(stem), Some(extension), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(unknown("expected exactly one extension"));
        };
        if stem.is_empty() {
            return Err(unknown("empty file stem"));
        }
        FileType::from_extension(extension).ok_or_else(|| unknown("unsupported extension"))
    }

    /// [`FileType::detect`] for a file that must already exist.
    pub fn resolve(path: &Path) -> CycoResult<FileType> {
        if !path.is_file() {
            return Err(CycoError::FileNotFound(path.to_path_buf()));
        }
        FileType::detect(path)
    }

    /// Whether this is one of the simulator's own input formats.
    pub fn is_dynawo(&self) -> bool {
        !matches!(self, FileType::Xml | FileType::Json)
    }

    /// Read `text` into a normalized tree.
    pub fn read_tree(&self, text: &str) -> CycoResult<AttributedTree> {
        let raw = match self {
            FileType::Json => read_json(text, JSON_ROOT)?,
            _ => read_xml(text)?,
        };
        Ok(raw.normalize())
    }

    pub fn parse(&self, tree: &AttributedTree) -> CycoResult<Document> {
        Ok(match self {
            FileType::Iidm | FileType::Xiidm => Document::Network(parse_network(tree)?),
            FileType::Dyd => Document::Dynamic(parse_dynamic(tree)?),
            FileType::Par => Document::Parameters(parse_parameters(tree)?),
            FileType::Jobs => Document::Job(parse_jobs(tree)?),
            FileType::Crv => Document::Curves(parse_curves(tree)?),
            FileType::Xml | FileType::Json => Document::Federate(parse_federate(tree)?),
        })
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

impl FromStr for FileType {
    type Err = CycoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::from_extension(s.trim_start_matches('.')).ok_or_else(|| {
            CycoError::UnknownFileFormat {
                path: s.into(),
                reason: "supported: iidm, xiidm, dyd, par, jobs, crv, xml, json".to_string(),
            }
        })
    }
}

/// A parsed input file.
#[derive(Debug, Clone)]
pub enum Document {
    Network(Component),
    Dynamic(DynamicModel),
    Parameters(Vec<ParameterSet>),
    Job(JobDescriptor),
    Curves(Curves),
    Federate(Cosimulation),
}

impl Document {
    /// Whether this document can be written to a file of type `file_type`.
    ///
    /// Federates are always written as JSON.
    pub fn writes_as(&self, file_type: FileType) -> bool {
        matches!(
            (self, file_type),
            (Document::Network(_), FileType::Iidm | FileType::Xiidm)
                | (Document::Dynamic(_), FileType::Dyd)
                | (Document::Parameters(_), FileType::Par)
                | (Document::Job(_), FileType::Jobs)
                | (Document::Curves(_), FileType::Crv)
                | (Document::Federate(_), FileType::Json)
        )
    }

    pub fn write(&self, path: &Path) -> CycoResult<()> {
        match self {
            Document::Network(network) => write_xml_file(&serialize_network(network), path),
            Document::Dynamic(model) => write_xml_file(&serialize_dynamic(model), path),
            Document::Parameters(sets) => write_xml_file(&serialize_parameters(sets), path),
            Document::Job(job) => write_xml_file(&serialize_jobs(job), path),
            Document::Curves(curves) => write_xml_file(&serialize_curves(curves), path),
            Document::Federate(cosimulation) => write_federate(&cosimulation.power_system, path),
        }
    }
}

/// Read and parse any supported file.
pub fn read_document(path: &Path) -> CycoResult<Document> {
    let tree = read_tree(path)?;
    FileType::detect(path)?.parse(&tree)
}

fn read_tree(path: &Path) -> CycoResult<AttributedTree> {
    let file_type = FileType::resolve(path)?;
    debug!(path = %path.display(), kind = file_type.friendly_name(), "reading");
    let text = std::fs::read_to_string(path)?;
    file_type.read_tree(&text)
}

pub fn read_network(path: &Path) -> CycoResult<Component> {
    parse_network(&read_tree(path)?)
}

pub fn read_dynamic(path: &Path) -> CycoResult<DynamicModel> {
    parse_dynamic(&read_tree(path)?)
}

pub fn read_parameters(path: &Path) -> CycoResult<Vec<ParameterSet>> {
    parse_parameters(&read_tree(path)?)
}

pub fn read_jobs(path: &Path) -> CycoResult<JobDescriptor> {
    parse_jobs(&read_tree(path)?)
}

pub fn read_curves(path: &Path) -> CycoResult<Curves> {
    parse_curves(&read_tree(path)?)
}

/// Read a federate descriptor in either encoding.
pub fn read_federate(path: &Path) -> CycoResult<Cosimulation> {
    parse_federate(&read_tree(path)?)
}

pub fn write_xml_file(tree: &AttributedTree, path: &Path) -> CycoResult<()> {
    debug!(path = %path.display(), root = %tree.tag, "writing");
    let file = File::create(path)?;
    write_xml(tree, BufWriter::new(file))
}

pub fn write_federate(federate: &CosimulationFederate, path: &Path) -> CycoResult<()> {
    debug!(path = %path.display(), name = %federate.name, "writing federate config");
    let file = File::create(path)?;
    write_federate_json(federate, BufWriter::new(file))
}
