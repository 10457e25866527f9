//! JOBS job descriptor schema (closed).
//!
//! Unlike the other formats, the JOBS tree has a fixed shape: every section
//! appears at most once, under one known parent. [`Section::children`] is the
//! hierarchy used both to validate input and to drive serialization, and
//! [`JOB_ATTRIBUTES`] lists the fields each section owns.

use super::{on, AttributeTable};

pub const FORMAT: &str = "JOBS";
pub const PREFIX: &str = "dyn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Jobs,
    Job,
    Solver,
    Modeler,
    Network,
    DynModels,
    PrecompiledModels,
    ModelicaModels,
    Simulation,
    Outputs,
    DumpInitValues,
    Curves,
    Logs,
    Appender,
}

impl Section {
    pub fn tag(self) -> &'static str {
        match self {
            Section::Jobs => "jobs",
            Section::Job => "job",
            Section::Solver => "solver",
            Section::Modeler => "modeler",
            Section::Network => "network",
            Section::DynModels => "dynModels",
            Section::PrecompiledModels => "precompiledModels",
            Section::ModelicaModels => "modelicaModels",
            Section::Simulation => "simulation",
            Section::Outputs => "outputs",
            Section::DumpInitValues => "dumpInitValues",
            Section::Curves => "curves",
            Section::Logs => "logs",
            Section::Appender => "appender",
        }
    }

    /// Child sections in emission order.
    pub fn children(self) -> &'static [Section] {
        match self {
            Section::Jobs => &[Section::Job],
            Section::Job => &[
                Section::Solver,
                Section::Modeler,
                Section::Simulation,
                Section::Outputs,
            ],
            Section::Modeler => &[
                Section::Network,
                Section::DynModels,
                Section::PrecompiledModels,
                Section::ModelicaModels,
            ],
            Section::Outputs => &[Section::DumpInitValues, Section::Curves, Section::Logs],
            Section::Logs => &[Section::Appender],
            Section::Solver
            | Section::Network
            | Section::DynModels
            | Section::PrecompiledModels
            | Section::ModelicaModels
            | Section::Simulation
            | Section::DumpInitValues
            | Section::Curves
            | Section::Appender => &[],
        }
    }

    /// Child section of `self` written as `tag`.
    pub fn child(self, tag: &str) -> Option<Section> {
        self.children().iter().copied().find(|s| s.tag() == tag)
    }

    /// Fields owned by this section, in declaration order.
    pub fn fields(self) -> impl Iterator<Item = (&'static str, JobField)> {
        JOB_ATTRIBUTES.fields_for(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    JobName,
    SolverLibrary,
    SolverParameterFile,
    SolverParameterId,
    CompilationDirectory,
    IidmFile,
    NetworkParameterFile,
    NetworkParameterId,
    DydFile,
    PrecompiledStandardModels,
    ModelicaStandardModels,
    StartTime,
    StopTime,
    Precision,
    OutputDirectory,
    DumpLocal,
    DumpGlobal,
    CurvesInputFile,
    CurvesExportMode,
    AppenderTag,
    AppenderFile,
    AppenderLevelFilter,
}

pub static JOB_ATTRIBUTES: AttributeTable<JobField> = AttributeTable::new(&[
    on("job", "name", JobField::JobName),
    on("solver", "lib", JobField::SolverLibrary),
    on("solver", "parFile", JobField::SolverParameterFile),
    on("solver", "parId", JobField::SolverParameterId),
    on("modeler", "compileDir", JobField::CompilationDirectory),
    on("network", "iidmFile", JobField::IidmFile),
    on("network", "parFile", JobField::NetworkParameterFile),
    on("network", "parId", JobField::NetworkParameterId),
    on("dynModels", "dydFile", JobField::DydFile),
    on(
        "precompiledModels",
        "useStandardModels",
        JobField::PrecompiledStandardModels,
    ),
    on(
        "modelicaModels",
        "useStandardModels",
        JobField::ModelicaStandardModels,
    ),
    on("simulation", "startTime", JobField::StartTime),
    on("simulation", "stopTime", JobField::StopTime),
    on("simulation", "precision", JobField::Precision),
    on("outputs", "directory", JobField::OutputDirectory),
    on("dumpInitValues", "local", JobField::DumpLocal),
    on("dumpInitValues", "global", JobField::DumpGlobal),
    on("curves", "inputFile", JobField::CurvesInputFile),
    on("curves", "exportMode", JobField::CurvesExportMode),
    on("appender", "tag", JobField::AppenderTag),
    on("appender", "file", JobField::AppenderFile),
    on("appender", "lvlFilter", JobField::AppenderLevelFilter),
]);
