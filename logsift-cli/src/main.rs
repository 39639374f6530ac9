use clap::Parser;

use logsift_cli::cli::{Cli, Commands};
use logsift_cli::commands;
use logsift_cli::error::CliError;
use logsift_cli::logging;
use logsift_cli::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    // Logging needs [general] before any command runs. A broken config still
    // gets default logging so the command can report the error itself.
    let loaded = commands::load_config(cli.config.as_deref());
    let general = loaded
        .as_ref()
        .map(|config| config.general.clone())
        .unwrap_or_default();
    if let Err(e) = logging::init_tracing(&general, cli.log_level.as_deref()) {
        eprintln!("warning: {e:#}");
    }
    logsift_core::metrics::describe_all();

    let writer = OutputWriter::new(cli.output);
    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::dispatch(args, loaded, &writer),
        Commands::Config(args) => {
            commands::config::execute(args, cli.config.as_deref(), &writer)
        }
    };

    match result {
        Ok(()) => {}
        Err(CliError::NoInputSelected) => {
            tracing::info!("no log file selected, nothing to analyze");
            eprintln!("No log file selected. Usage: logsift analyze <PATH>");
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
