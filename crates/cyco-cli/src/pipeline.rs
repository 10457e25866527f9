//! The `cyco run` pipeline.
//!
//! 1. Resolve and parse the JOBS file.
//! 2. Parse the PAR and DYD files it requires, then the optional network PAR,
//!    IIDM and CRV.
//! 3. Parse the federate descriptor.
//! 4. Synthesize the co-simulation proxy into the DYD model and the network
//!    PAR file.
//! 5. Write every Dynawo file under its original name, plus the federate
//!    config as `<federate name>.json`. Names must stay inside the output
//!    directory.

use std::fs;
use std::path::{Component as PathComponent, Path, PathBuf};

use cyco_core::cosim::{extend_models, Cosimulation};
use cyco_core::{
    Component, CycoError, CycoResult, Curves, DynamicModel, JobDescriptor, ParameterSet,
};
use cyco_io::{
    read_curves, read_dynamic, read_federate, read_jobs, read_network, read_parameters,
    write_federate, Document, FileType,
};
use tracing::{debug, info};

use crate::config::CycoConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub dynawo_dir: PathBuf,
    pub jobs: Option<String>,
    pub helics_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub federate_name: String,
    pub dry_run: bool,
}

impl RunOptions {
    pub fn from_config(config: &CycoConfig) -> Self {
        Self {
            dynawo_dir: config.dynawo.data_dir.clone(),
            jobs: config.dynawo.jobs.clone(),
            helics_dir: config.helics.data_dir.clone(),
            output_dir: config.output.dir.clone(),
            federate_name: config.output.federate_name.clone(),
            dry_run: false,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.dynawo_dir.join("serialized"))
    }
}

/// A parsed file and the name it is written back under.
#[derive(Debug, Clone)]
pub struct Input<T> {
    pub name: String,
    pub model: T,
}

/// Every Dynawo file of one simulation case.
#[derive(Debug, Clone)]
pub struct DynawoCase {
    pub jobs: Input<JobDescriptor>,
    /// Solver parameter file
    pub parameters: Input<Vec<ParameterSet>>,
    /// Network parameter file, when the job names one other than the solver's
    pub network_parameters: Option<Input<Vec<ParameterSet>>>,
    pub dynamic: Input<DynamicModel>,
    pub network: Option<Input<Component>>,
    pub curves: Option<Input<Curves>>,
}

impl DynawoCase {
    /// Parameter file that receives the proxy's parameter set.
    pub fn proxy_parameters(&self) -> &Input<Vec<ParameterSet>> {
        self.network_parameters.as_ref().unwrap_or(&self.parameters)
    }

    fn documents(&self) -> Vec<(&str, Document)> {
        let mut documents = vec![
            (
                self.jobs.name.as_str(),
                Document::Job(self.jobs.model.clone()),
            ),
            (
                self.parameters.name.as_str(),
                Document::Parameters(self.parameters.model.clone()),
            ),
            (
                self.dynamic.name.as_str(),
                Document::Dynamic(self.dynamic.model.clone()),
            ),
        ];
        if let Some(parameters) = &self.network_parameters {
            documents.push((
                parameters.name.as_str(),
                Document::Parameters(parameters.model.clone()),
            ));
        }
        if let Some(network) = &self.network {
            documents.push((network.name.as_str(), Document::Network(network.model.clone())));
        }
        if let Some(curves) = &self.curves {
            documents.push((curves.name.as_str(), Document::Curves(curves.model.clone())));
        }
        documents
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub proxy_added: bool,
    /// Files written, or that would be written on a dry run
    pub outputs: Vec<PathBuf>,
}

/// First file in `dir`, in name order, whose type is one of `types`.
fn first_of_type(dir: &Path, types: &[FileType]) -> CycoResult<Option<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths.into_iter().find(|path| {
        FileType::detect(path)
            .map(|file_type| types.contains(&file_type))
            .unwrap_or(false)
    }))
}

pub fn resolve_jobs_file(dir: &Path, explicit: Option<&str>) -> CycoResult<PathBuf> {
    if !dir.is_dir() {
        return Err(CycoError::FileNotFound(dir.to_path_buf()));
    }
    match explicit {
        Some(name) => {
            let path = dir.join(name);
            if path.is_file() {
                Ok(path)
            } else {
                Err(CycoError::FileNotFound(path))
            }
        }
        None => first_of_type(dir, &[FileType::Jobs])?
            .ok_or_else(|| CycoError::FileNotFound(dir.join("*.jobs"))),
    }
}

pub fn find_federate_file(dir: &Path) -> CycoResult<PathBuf> {
    if !dir.is_dir() {
        return Err(CycoError::FileNotFound(dir.to_path_buf()));
    }
    first_of_type(dir, &[FileType::Xml, FileType::Json])?
        .ok_or_else(|| CycoError::FileNotFound(dir.join("*.xml")))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse the JOBS file and every file it references.
pub fn load_case(dir: &Path, jobs: Option<&str>) -> CycoResult<DynawoCase> {
    let jobs_path = resolve_jobs_file(dir, jobs)?;
    let job = read_jobs(&jobs_path)?;
    info!(path = %jobs_path.display(), name = ?job.job.name, "parsed job");

    let parameter_file = job
        .solver_parameter_file()
        .ok_or(CycoError::MissingMandatoryFile { kind: "PAR" })?
        .to_string();
    let dyd_file = job
        .dyd_file()
        .ok_or(CycoError::MissingMandatoryFile { kind: "DYD" })?
        .to_string();

    let parameter_sets = read_parameters(&dir.join(&parameter_file))?;
    info!(file = %parameter_file, sets = parameter_sets.len(), "parsed parameters");
    let dynamic_model = read_dynamic(&dir.join(&dyd_file))?;
    info!(file = %dyd_file, elements = dynamic_model.len(), "parsed dynamic models");

    let network_parameters = match job.network_parameter_file() {
        Some(name) if name != parameter_file => {
            let model = read_parameters(&dir.join(name))?;
            info!(file = %name, sets = model.len(), "parsed network parameters");
            Some(Input {
                name: name.to_string(),
                model,
            })
        }
        _ => None,
    };

    let network = match job.iidm_file() {
        Some(name) => {
            let model = read_network(&dir.join(name))?;
            info!(file = %name, components = model.count(), "parsed network");
            Some(Input {
                name: name.to_string(),
                model,
            })
        }
        None => None,
    };
    let curves = match job.curves_file() {
        Some(name) => {
            let model = read_curves(&dir.join(name))?;
            info!(file = %name, curves = model.curves.len(), "parsed curves");
            Some(Input {
                name: name.to_string(),
                model,
            })
        }
        None => None,
    };

    Ok(DynawoCase {
        jobs: Input {
            name: file_name(&jobs_path),
            model: job,
        },
        parameters: Input {
            name: parameter_file,
            model: parameter_sets,
        },
        network_parameters,
        dynamic: Input {
            name: dyd_file,
            model: dynamic_model,
        },
        network,
        curves,
    })
}

pub fn load_cosimulation(dir: &Path, federate_name: &str) -> CycoResult<Cosimulation> {
    let path = find_federate_file(dir)?;
    let mut cosimulation = read_federate(&path)?;
    cosimulation.power_system.name = federate_name.to_string();
    info!(
        path = %path.display(),
        publications = cosimulation.power_system.publications.len(),
        "parsed federate descriptor"
    );
    Ok(cosimulation)
}

/// Add the co-simulation proxy to the case. Returns whether one was added.
///
/// The proxy's parameter set goes to the network parameter file, falling back
/// to the solver's, and the proxy model references that same file.
pub fn synthesize_case(case: &mut DynawoCase, cosimulation: &Cosimulation) -> CycoResult<bool> {
    let target = match &mut case.network_parameters {
        Some(parameters) => parameters,
        None => &mut case.parameters,
    };
    let added = extend_models(
        &cosimulation.power_system,
        &mut case.dynamic.model,
        &mut target.model,
        &target.name,
    )?;
    if added {
        info!(file = %case.proxy_parameters().name, "proxy parameter set added");
    } else {
        info!("federate publishes nothing, models left unchanged");
    }
    Ok(added)
}

/// `out/name`, unless `name` is absolute or climbs out of `out`.
fn output_path(out: &Path, name: &str) -> CycoResult<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative.components().any(|component| {
        matches!(
            component,
            PathComponent::ParentDir | PathComponent::RootDir | PathComponent::Prefix(_)
        )
    });
    if escapes || name.is_empty() {
        return Err(CycoError::OutsideOutputDir(name.to_string()));
    }
    Ok(out.join(relative))
}

fn write_case(
    case: &DynawoCase,
    cosimulation: &Cosimulation,
    out: &Path,
    dry_run: bool,
) -> CycoResult<Vec<PathBuf>> {
    let documents = case
        .documents()
        .into_iter()
        .map(|(name, document)| Ok((output_path(out, name)?, document)))
        .collect::<CycoResult<Vec<_>>>()?;
    let federate = &cosimulation.power_system;
    let federate_target = output_path(out, &format!("{}.json", federate.name))?;

    if !dry_run {
        fs::create_dir_all(out)?;
    }
    let mut outputs = Vec::new();
    for (target, document) in documents {
        if dry_run {
            info!(path = %target.display(), "would write");
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            document.write(&target)?;
            debug!(path = %target.display(), "wrote");
        }
        outputs.push(target);
    }

    if dry_run {
        info!(path = %federate_target.display(), "would write");
    } else {
        write_federate(federate, &federate_target)?;
    }
    outputs.push(federate_target);
    Ok(outputs)
}

pub fn run(options: &RunOptions) -> CycoResult<RunReport> {
    let mut case = load_case(&options.dynawo_dir, options.jobs.as_deref())?;
    let cosimulation = load_cosimulation(&options.helics_dir, &options.federate_name)?;
    let proxy_added = synthesize_case(&mut case, &cosimulation)?;

    let out = options.output_dir();
    let outputs = write_case(&case, &cosimulation, &out, options.dry_run)?;
    info!(
        dir = %out.display(),
        files = outputs.len(),
        dry_run = options.dry_run,
        "done"
    );
    Ok(RunReport {
        proxy_added,
        outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyco_core::cosim::PROXY_ID;
    use tempfile::tempdir;

    const JOBS: &str = r#"<dyn:jobs xmlns:dyn="http://www.rte-france.com/dynawo">
  <dyn:job name="case">
    <dyn:solver lib="dynawo_SolverIDA" parFile="case.par" parId="1"/>
    <dyn:modeler compileDir="outputs">
      <dyn:dynModels dydFile="case.dyd"/>
    </dyn:modeler>
  </dyn:job>
</dyn:jobs>"#;
    const PAR: &str = r#"<parametersSet xmlns="http://www.rte-france.com/dynawo">
  <set id="1"><par type="INT" name="order" value="2"/></set>
</parametersSet>"#;
    const DYD: &str = r#"<dyn:dynamicModelsArchitecture xmlns:dyn="http://www.rte-france.com/dynawo">
  <dyn:blackBoxModel id="GEN1" lib="Gen" parFile="case.par" parId="1"/>
</dyn:dynamicModelsArchitecture>"#;
    const FEDERATE: &str = r#"{"period": 0.5, "publications": [{"key": "P1", "info": "P@GEN1"}]}"#;

    fn case_dir(jobs: &str) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("case.jobs"), jobs).unwrap();
        fs::write(dir.path().join("case.par"), PAR).unwrap();
        fs::write(dir.path().join("case.dyd"), DYD).unwrap();
        fs::write(dir.path().join("fed.json"), FEDERATE).unwrap();
        dir
    }

    fn options(dir: &Path) -> RunOptions {
        RunOptions {
            dynawo_dir: dir.to_path_buf(),
            jobs: None,
            helics_dir: dir.to_path_buf(),
            output_dir: None,
            federate_name: "Dynawo".to_string(),
            dry_run: false,
        }
    }

    #[test]
    fn first_jobs_file_in_name_order_is_used() {
        let dir = case_dir(JOBS);
        fs::write(dir.path().join("b.jobs"), JOBS).unwrap();
        let found = resolve_jobs_file(dir.path(), None).unwrap();
        assert_eq!(file_name(&found), "b.jobs");

        let explicit = resolve_jobs_file(dir.path(), Some("case.jobs")).unwrap();
        assert_eq!(file_name(&explicit), "case.jobs");
        assert!(matches!(
            resolve_jobs_file(dir.path(), Some("other.jobs")),
            Err(CycoError::FileNotFound(_))
        ));
    }

    #[test]
    fn missing_jobs_file_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            resolve_jobs_file(dir.path(), None),
            Err(CycoError::FileNotFound(_))
        ));
    }

    #[test]
    fn solver_par_file_is_mandatory() {
        let jobs = JOBS.replace(r#" parFile="case.par""#, "");
        let dir = case_dir(&jobs);
        let err = load_case(dir.path(), None).unwrap_err();
        assert!(matches!(err, CycoError::MissingMandatoryFile { kind: "PAR" }));
    }

    #[test]
    fn dyd_file_is_mandatory() {
        let jobs = JOBS.replace(r#"<dyn:dynModels dydFile="case.dyd"/>"#, "");
        let dir = case_dir(&jobs);
        let err = load_case(dir.path(), None).unwrap_err();
        assert!(matches!(err, CycoError::MissingMandatoryFile { kind: "DYD" }));
    }

    #[test]
    fn referenced_files_must_exist() {
        let dir = case_dir(JOBS);
        fs::remove_file(dir.path().join("case.dyd")).unwrap();
        let err = load_case(dir.path(), None).unwrap_err();
        assert!(matches!(err, CycoError::FileNotFound(_)));
    }

    #[test]
    fn proxy_falls_back_to_solver_par_file() {
        let dir = case_dir(JOBS);
        let mut case = load_case(dir.path(), None).unwrap();
        assert!(case.network.is_none());
        assert!(case.curves.is_none());
        assert!(case.network_parameters.is_none());

        let cosimulation = load_cosimulation(dir.path(), "Dynawo").unwrap();
        assert!(synthesize_case(&mut case, &cosimulation).unwrap());
        let proxy = case.dynamic.model.component(PROXY_ID).unwrap();
        assert_eq!(proxy.parameter_file.as_deref(), Some("case.par"));
        assert!(case.parameters.model.iter().any(|set| set.id == PROXY_ID));
    }

    #[test]
    fn proxy_set_goes_to_the_network_parameter_file() {
        let jobs = JOBS.replace(
            r#"<dyn:dynModels dydFile="case.dyd"/>"#,
            r#"<dyn:network parFile="net.par" parId="1"/>
      <dyn:dynModels dydFile="case.dyd"/>"#,
        );
        let dir = case_dir(&jobs);
        fs::write(dir.path().join("net.par"), PAR).unwrap();

        let report = run(&options(dir.path())).unwrap();
        let out = dir.path().join("serialized");
        let names: Vec<String> = report.outputs.iter().map(|p| file_name(p)).collect();
        assert_eq!(
            names,
            vec!["case.jobs", "case.par", "case.dyd", "net.par", "Dynawo.json"]
        );

        let dyd = read_dynamic(&out.join("case.dyd")).unwrap();
        let proxy = dyd.component(PROXY_ID).unwrap();
        assert_eq!(proxy.parameter_file.as_deref(), Some("net.par"));
        let network_sets = read_parameters(&out.join("net.par")).unwrap();
        assert!(network_sets.iter().any(|set| set.id == PROXY_ID));
        let solver_sets = read_parameters(&out.join("case.par")).unwrap();
        assert!(solver_sets.iter().all(|set| set.id != PROXY_ID));
    }

    #[test]
    fn file_names_outside_the_output_dir_are_refused() {
        let root = tempdir().unwrap();
        let shared = root.path().join("shared.par");
        fs::write(&shared, PAR).unwrap();
        let data = root.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("case.dyd"), DYD).unwrap();
        fs::write(data.join("fed.json"), FEDERATE).unwrap();

        for reference in [shared.to_string_lossy().into_owned(), "../shared.par".to_string()] {
            let jobs = JOBS.replace(
                r#"parFile="case.par" parId="1"/>"#,
                &format!(r#"parFile="{reference}" parId="1"/>"#),
            );
            fs::write(data.join("case.jobs"), jobs).unwrap();
            let err = run(&options(&data)).unwrap_err();
            assert!(
                matches!(err, CycoError::OutsideOutputDir(ref name) if *name == reference),
                "{reference}: {err}"
            );
        }
        assert_eq!(fs::read_to_string(&shared).unwrap(), PAR);
        assert!(!data.join("serialized").exists());
    }

    #[test]
    fn nested_output_names_stay_inside() {
        let out = Path::new("out");
        assert_eq!(output_path(out, "par/case.par").unwrap(), out.join("par/case.par"));
        assert!(output_path(out, "par/../../x.par").is_err());
        assert!(output_path(out, "").is_err());
    }

    #[test]
    fn run_writes_case_and_federate() {
        let dir = case_dir(JOBS);
        let report = run(&options(dir.path())).unwrap();
        assert!(report.proxy_added);

        let out = dir.path().join("serialized");
        let names: Vec<String> = report.outputs.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["case.jobs", "case.par", "case.dyd", "Dynawo.json"]);
        for path in &report.outputs {
            assert!(path.starts_with(&out));
            assert!(path.is_file(), "{} missing", path.display());
        }
        let dyd = fs::read_to_string(out.join("case.dyd")).unwrap();
        assert!(dyd.contains(r#"id="CosimInterface""#));
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = case_dir(JOBS);
        let mut opts = options(dir.path());
        opts.dry_run = true;
        let report = run(&opts).unwrap();
        assert_eq!(report.outputs.len(), 4);
        assert!(!dir.path().join("serialized").exists());
    }

    #[test]
    fn second_run_over_written_case_is_a_duplicate_proxy() {
        let dir = case_dir(JOBS);
        run(&options(dir.path())).unwrap();

        let out = dir.path().join("serialized");
        let mut again = options(&out);
        again.helics_dir = dir.path().to_path_buf();
        again.output_dir = Some(out.join("again"));
        let err = run(&again).unwrap_err();
        assert!(matches!(err, CycoError::DuplicateProxy(_)));
    }
}
