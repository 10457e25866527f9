//! # cyco-core: Co-simulation Domain Model
//!
//! In-memory model of the artifacts that configure a power-system dynamic
//! simulation and its co-simulation interface.
//!
//! ## Models
//!
//! | Model | Source document | Type |
//! |-------|-----------------|------|
//! | Static network | `.iidm` / `.xiidm` | [`Component`] tree |
//! | Dynamic wiring | `.dyd` | [`DynamicModel`] |
//! | Parameter sets | `.par` | `Vec<`[`ParameterSet`]`>` |
//! | Simulation job | `.jobs` | [`JobDescriptor`] |
//! | Output curves | `.crv` | [`Curves`] |
//! | Federate | `.xml` / `.json` | [`CosimulationFederate`] |
//!
//! Every model is built fresh by one parse, optionally extended by
//! [`cosim::synthesize`], and consumed by one serialization. No model holds
//! shared state: each entity owns its own containers.
//!
//! ## Quick Start
//!
//! ```rust
//! use cyco_core::cosim::{extend_models, CosimulationFederate};
//! use cyco_core::{DynamicModel, ParameterSet};
//!
//! let mut federate = CosimulationFederate::default();
//! federate.period = 0.5;
//! federate.add_publication("P1", Some("generator_PGenPu@GEN1".to_string()));
//!
//! let mut dynamic_model = DynamicModel::new();
//! let mut parameter_sets: Vec<ParameterSet> = Vec::new();
//! let added = extend_models(&federate, &mut dynamic_model, &mut parameter_sets, "IEEE14.par")
//!     .expect("first synthesis succeeds");
//! assert!(added);
//! assert_eq!(dynamic_model.len(), 2);
//! ```
//!
//! ## Integration with cyco-io
//!
//! The cyco-io crate maps documents onto these models and back.

pub mod cosim;
pub mod curves;
pub mod dynamic;
pub mod error;
pub mod job;
pub mod network;
pub mod parameters;

pub use cosim::{CosimulationFederate, Publication, Subscription};
pub use curves::{Curve, Curves};
pub use dynamic::{
    Connection, Connector, DirectConnection, DynamicComponent, DynamicElement, DynamicModel,
    MacroConnection, StaticReference, TemplateConnection,
};
pub use error::{CycoError, CycoResult};
pub use job::{ExportMode, JobDescriptor, LogLevel};
pub use network::{
    AcLine, Bus, Component, ComponentKind, Extension, Generator, Load, ShuntCompensator,
    StaticVarCompensator, Switch, Transformer,
};
pub use parameters::{Parameter, ParameterSet, ParameterType, Reference};
