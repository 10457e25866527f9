use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use cyco_cli::config::CycoConfig;
use cyco_cli::pipeline::{self, RunOptions};

pub struct RunArgs {
    pub dynawo_dir: Option<PathBuf>,
    pub helics_dir: Option<PathBuf>,
    pub jobs: Option<String>,
    pub output: Option<PathBuf>,
    pub federate_name: Option<String>,
    pub dry_run: bool,
}

/// Flags override the configuration file.
fn resolve_options(config: &CycoConfig, args: RunArgs) -> RunOptions {
    let mut options = RunOptions::from_config(config);
    if let Some(dir) = args.dynawo_dir {
        options.dynawo_dir = dir;
    }
    if let Some(dir) = args.helics_dir {
        options.helics_dir = dir;
    }
    if args.jobs.is_some() {
        options.jobs = args.jobs;
    }
    if args.output.is_some() {
        options.output_dir = args.output;
    }
    if let Some(name) = args.federate_name {
        options.federate_name = name;
    }
    options.dry_run = args.dry_run;
    options
}

pub fn handle(config: &CycoConfig, args: RunArgs) -> Result<()> {
    let options = resolve_options(config, args);
    info!(
        dynawo = %options.dynawo_dir.display(),
        helics = %options.helics_dir.display(),
        "preparing co-simulation case"
    );
    let report = pipeline::run(&options).with_context(|| {
        format!(
            "preparing case from {} and {}",
            options.dynawo_dir.display(),
            options.helics_dir.display()
        )
    })?;

    let verb = if options.dry_run { "Would write" } else { "Wrote" };
    for path in &report.outputs {
        println!("{verb} {}", path.display());
    }
    if !report.proxy_added {
        println!("Federate publishes nothing; models copied unchanged");
    }
    Ok(())
}
