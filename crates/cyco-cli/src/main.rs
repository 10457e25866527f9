use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use cyco_cli::cli::{Cli, Commands};
use cyco_cli::config::CycoConfig;

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }

    if let Err(err) = dispatch(cli) {
        error!("{err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config = CycoConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Run {
            dynawo_dir,
            helics_dir,
            jobs,
            output,
            federate_name,
            dry_run,
        } => commands::run::handle(
            &config,
            commands::run::RunArgs {
                dynawo_dir,
                helics_dir,
                jobs,
                output,
                federate_name,
                dry_run,
            },
        ),
        Commands::Convert { input, output } => commands::convert::handle(&input, &output),
    }
}
