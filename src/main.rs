use std::path::Path;

use clap::Parser;
use sprint_os::cli::commands::Cli;
use sprint_os::cli::handlers;
use sprint_os::io::paths::DataPaths;
use sprint_os::logging;

fn main() {
    let cli = Cli::parse();
    let paths = DataPaths::resolve(cli.data_dir.as_deref().map(Path::new));
    logging::init(&paths);

    let result = match cli.command {
        // No subcommand launches the TUI
        None => sprint_os::tui::run(&paths),
        Some(command) => handlers::dispatch(command, cli.json, &paths),
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
