//! # cyco-io: Simulation Config Mapping
//!
//! Reads and writes the documents that configure a power-system dynamic
//! simulation and its co-simulation federate, mapping each onto the
//! [`cyco_core`] models through schema tables.
//!
//! ## Pipeline
//!
//! ```text
//! text ──read_xml / read_json──▶ RawTree ──normalize──▶ AttributedTree ──mapper──▶ model
//! model ──mapper──▶ AttributedTree ──write_xml──▶ text
//! ```
//!
//! The mapper only accepts an [`AttributedTree`], so single-versus-repeated
//! child shapes from the readers are resolved before any schema lookup.
//!
//! ## Supported Formats
//!
//! | Format | Extensions | Schema | Model |
//! |--------|------------|--------|-------|
//! | IIDM | `.iidm`, `.xiidm` | open | [`cyco_core::Component`] |
//! | DYD | `.dyd` | closed | [`cyco_core::DynamicModel`] |
//! | PAR | `.par` | closed | [`cyco_core::ParameterSet`] list |
//! | JOBS | `.jobs` | closed | [`cyco_core::JobDescriptor`] |
//! | CRV | `.crv` | closed | [`cyco_core::Curves`] |
//! | Federate | `.xml`, `.json` | closed | [`cyco_core::cosim::Cosimulation`] |
//!
//! Open schemas keep unknown attributes verbatim in the element's extension
//! bag; closed schemas reject them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! fn main() -> cyco_core::CycoResult<()> {
//!     let job = cyco_io::read_jobs(Path::new("IEEE14/IEEE14.jobs"))?;
//!     println!("dyd file: {:?}", job.dyd_file());
//!     cyco_io::read_document(Path::new("IEEE14/IEEE14.dyd"))?
//!         .write(Path::new("out/IEEE14.dyd"))?;
//!     Ok(())
//! }
//! ```

pub mod format;
pub mod json;
pub mod mapper;
pub mod schema;
pub mod tree;
pub mod xml;

pub use format::{
    read_curves, read_document, read_dynamic, read_federate, read_jobs, read_network,
    read_parameters, write_federate, write_xml_file, Document, FileType,
};
pub use json::read_json;
pub use tree::{AttributedTree, RawNode, RawTree};
pub use xml::{read_xml, write_xml, xml_to_string};
