//! Simulation job descriptor.
//!
//! The job descriptor is a fixed tree of sections, each owning a fixed set of
//! optional scalar settings:
//!
//! ```text
//! jobs
//! └── job
//!     ├── solver
//!     ├── modeler
//!     │   ├── network
//!     │   ├── dynModels
//!     │   ├── precompiledModels
//!     │   └── modelicaModels
//!     ├── simulation
//!     └── outputs
//!         ├── dumpInitValues
//!         ├── curves
//!         └── logs
//!             └── appender
//! ```
//!
//! Every field is optional; a section holding no value (itself or below) is
//! not written back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub job: JobSection,
    pub solver: SolverSection,
    pub modeler: ModelerSection,
    pub simulation: SimulationSection,
    pub outputs: OutputsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSection {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverSection {
    pub library: Option<String>,
    pub parameter_file: Option<String>,
    pub parameter_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelerSection {
    pub compilation_directory: Option<String>,
    pub network: NetworkSection,
    pub dyn_models: DynModelsSection,
    pub precompiled_models: ModelLibrarySection,
    pub modelica_models: ModelLibrarySection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSection {
    pub iidm_file: Option<String>,
    pub parameter_file: Option<String>,
    pub parameter_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynModelsSection {
    pub dyd_file: Option<String>,
}

/// Shared shape of `precompiledModels` and `modelicaModels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLibrarySection {
    pub use_standard_models: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Start time (s)
    pub start_time: Option<f64>,
    /// Stop time (s)
    pub stop_time: Option<f64>,
    pub precision: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputsSection {
    pub directory: Option<String>,
    pub dump_init_values: DumpInitValuesSection,
    pub curves: CurvesSection,
    pub logs: LogsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpInitValuesSection {
    pub local: Option<bool>,
    pub global: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvesSection {
    pub input_file: Option<String>,
    pub export_mode: Option<ExportMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsSection {
    pub appender: AppenderSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppenderSection {
    pub tag: Option<String>,
    pub file: Option<String>,
    pub level_filter: Option<LogLevel>,
}

/// Curve export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportMode {
    Csv,
    Xml,
    Txt,
}

impl ExportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Csv => "CSV",
            ExportMode::Xml => "XML",
            ExportMode::Txt => "TXT",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CSV" => Ok(ExportMode::Csv),
            "XML" => Ok(ExportMode::Xml),
            "TXT" => Ok(ExportMode::Txt),
            _ => Err("one of CSV, XML, TXT"),
        }
    }
}

/// Log appender severity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err("one of DEBUG, INFO, WARN, ERROR"),
        }
    }
}

impl JobDescriptor {
    /// Parameter file of the solver, the one holding the model parameter sets.
    pub fn solver_parameter_file(&self) -> Option<&str> {
        self.solver.parameter_file.as_deref()
    }

    pub fn network_parameter_file(&self) -> Option<&str> {
        self.modeler.network.parameter_file.as_deref()
    }

    pub fn dyd_file(&self) -> Option<&str> {
        self.modeler.dyn_models.dyd_file.as_deref()
    }

    pub fn iidm_file(&self) -> Option<&str> {
        self.modeler.network.iidm_file.as_deref()
    }

    pub fn curves_file(&self) -> Option<&str> {
        self.outputs.curves.input_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_literals_round_trip() {
        for mode in [ExportMode::Csv, ExportMode::Xml, ExportMode::Txt] {
            assert_eq!(mode.as_str().parse::<ExportMode>(), Ok(mode));
        }
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
        assert!("csv".parse::<ExportMode>().is_err());
    }

    #[test]
    fn file_accessors_read_the_right_sections() {
        let mut job = JobDescriptor::default();
        job.solver.parameter_file = Some("solvers.par".into());
        job.modeler.network.parameter_file = Some("IEEE14.par".into());
        job.modeler.dyn_models.dyd_file = Some("IEEE14.dyd".into());

        assert_eq!(job.solver_parameter_file(), Some("solvers.par"));
        assert_eq!(job.network_parameter_file(), Some("IEEE14.par"));
        assert_eq!(job.dyd_file(), Some("IEEE14.dyd"));
        assert_eq!(job.iidm_file(), None);
    }
}
