//! JOBS ⇄ [`JobDescriptor`].
//!
//! Sections are parsed against [`Section::children`]: a section may only
//! appear under its declared parent, and only once. On output a section is
//! written only when [`has_content`] holds for it, so a descriptor with no
//! values comes back as a bare self-closed root.

use cyco_core::job::JobDescriptor;
use cyco_core::{CycoError, CycoResult};
use tracing::debug;

use super::{
    assign_attributes, collect_attributes, expect_root, format_number, prefixed, SchemaPolicy,
    Slot,
};
use crate::schema::jobs::{JobField, Section, FORMAT, JOB_ATTRIBUTES, PREFIX};
use crate::schema::DYNAWO_NAMESPACE;
use crate::tree::AttributedTree;

pub fn parse_jobs(tree: &AttributedTree) -> CycoResult<JobDescriptor> {
    expect_root(tree, Section::Jobs.tag(), FORMAT)?;
    let mut job = JobDescriptor::default();
    parse_section(&mut job, Section::Jobs, tree)?;
    debug!(
        name = job.job.name.as_deref().unwrap_or_default(),
        "parsed job descriptor"
    );
    Ok(job)
}

fn parse_section(job: &mut JobDescriptor, section: Section, node: &AttributedTree) -> CycoResult<()> {
    assign_attributes(
        node,
        section.tag(),
        &JOB_ATTRIBUTES,
        SchemaPolicy::Closed,
        |field, raw| slot(job, field).assign(raw),
    )?;

    let mut seen = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let Some(child_section) = section.child(child.local_name()) else {
            return Err(CycoError::UnknownSchemaTag {
                format: FORMAT,
                tag: child.tag.clone(),
            });
        };
        if seen.contains(&child_section) {
            return Err(CycoError::RepeatedSection(child_section.tag().to_string()));
        }
        seen.push(child_section);
        parse_section(job, child_section, child)?;
    }
    Ok(())
}

/// Whether `section` or any section below it holds a value.
pub fn has_content(job: &JobDescriptor, section: Section) -> bool {
    section
        .fields()
        .any(|(_, field)| value(job, field).is_some())
        || section
            .children()
            .iter()
            .any(|child| has_content(job, *child))
}

pub fn serialize_jobs(job: &JobDescriptor) -> AttributedTree {
    let mut root = serialize_section(job, Section::Jobs);
    root.attributes
        .insert(0, (format!("xmlns:{PREFIX}"), DYNAWO_NAMESPACE.to_string()));
    root
}

fn serialize_section(job: &JobDescriptor, section: Section) -> AttributedTree {
    AttributedTree {
        tag: prefixed(PREFIX, section.tag()),
        attributes: collect_attributes(section.tag(), &JOB_ATTRIBUTES, |field| value(job, field)),
        children: section
            .children()
            .iter()
            .filter(|child| has_content(job, **child))
            .map(|child| serialize_section(job, *child))
            .collect(),
    }
}

fn slot(job: &mut JobDescriptor, field: JobField) -> Slot<'_> {
    use JobField as F;

    let modeler = &mut job.modeler;
    let outputs = &mut job.outputs;
    match field {
        F::JobName => Slot::Text(&mut job.job.name),
        F::SolverLibrary => Slot::Text(&mut job.solver.library),
        F::SolverParameterFile => Slot::Text(&mut job.solver.parameter_file),
        F::SolverParameterId => Slot::Text(&mut job.solver.parameter_id),
        F::CompilationDirectory => Slot::Text(&mut modeler.compilation_directory),
        F::IidmFile => Slot::Text(&mut modeler.network.iidm_file),
        F::NetworkParameterFile => Slot::Text(&mut modeler.network.parameter_file),
        F::NetworkParameterId => Slot::Text(&mut modeler.network.parameter_id),
        F::DydFile => Slot::Text(&mut modeler.dyn_models.dyd_file),
        F::PrecompiledStandardModels => {
            Slot::Flag(&mut modeler.precompiled_models.use_standard_models)
        }
        F::ModelicaStandardModels => Slot::Flag(&mut modeler.modelica_models.use_standard_models),
        F::StartTime => Slot::Number(&mut job.simulation.start_time),
        F::StopTime => Slot::Number(&mut job.simulation.stop_time),
        F::Precision => Slot::Number(&mut job.simulation.precision),
        F::OutputDirectory => Slot::Text(&mut outputs.directory),
        F::DumpLocal => Slot::Flag(&mut outputs.dump_init_values.local),
        F::DumpGlobal => Slot::Flag(&mut outputs.dump_init_values.global),
        F::CurvesInputFile => Slot::Text(&mut outputs.curves.input_file),
        F::CurvesExportMode => Slot::ExportMode(&mut outputs.curves.export_mode),
        F::AppenderTag => Slot::Text(&mut outputs.logs.appender.tag),
        F::AppenderFile => Slot::Text(&mut outputs.logs.appender.file),
        F::AppenderLevelFilter => Slot::LogLevel(&mut outputs.logs.appender.level_filter),
    }
}

fn value(job: &JobDescriptor, field: JobField) -> Option<String> {
    use JobField as F;

    let modeler = &job.modeler;
    let outputs = &job.outputs;
    match field {
        F::JobName => job.job.name.clone(),
        F::SolverLibrary => job.solver.library.clone(),
        F::SolverParameterFile => job.solver.parameter_file.clone(),
        F::SolverParameterId => job.solver.parameter_id.clone(),
        F::CompilationDirectory => modeler.compilation_directory.clone(),
        F::IidmFile => modeler.network.iidm_file.clone(),
        F::NetworkParameterFile => modeler.network.parameter_file.clone(),
        F::NetworkParameterId => modeler.network.parameter_id.clone(),
        F::DydFile => modeler.dyn_models.dyd_file.clone(),
        F::PrecompiledStandardModels => modeler
            .precompiled_models
            .use_standard_models
            .map(|flag| flag.to_string()),
        F::ModelicaStandardModels => modeler
            .modelica_models
            .use_standard_models
            .map(|flag| flag.to_string()),
        F::StartTime => job.simulation.start_time.map(format_number),
        F::StopTime => job.simulation.stop_time.map(format_number),
        F::Precision => job.simulation.precision.map(format_number),
        F::OutputDirectory => outputs.directory.clone(),
        F::DumpLocal => outputs.dump_init_values.local.map(|flag| flag.to_string()),
        F::DumpGlobal => outputs.dump_init_values.global.map(|flag| flag.to_string()),
        F::CurvesInputFile => outputs.curves.input_file.clone(),
        F::CurvesExportMode => outputs.curves.export_mode.map(|mode| mode.to_string()),
        F::AppenderTag => outputs.logs.appender.tag.clone(),
        F::AppenderFile => outputs.logs.appender.file.clone(),
        F::AppenderLevelFilter => outputs.logs.appender.level_filter.map(|l| l.to_string()),
    }
}
