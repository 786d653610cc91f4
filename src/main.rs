use clap::Parser;
use cleanmate::cli::{Cli, run_cli};
use cleanmate::logging::init_logger;
use cleanmate::output::OutputFormatter;
use cleanmate::paths::AppPaths;
use tracing::info;

fn main() {
    let cli = Cli::parse();
    let paths = AppPaths::from_env();
    let guard = init_logger(&paths.log_dir(), cli.verbose);

    info!("CleanMate starting...");

    if let Err(e) = run_cli(cli, &paths) {
        OutputFormatter::error(&format!("Error: {}", e));
        // Flush the log file before exiting; `exit` skips destructors.
        drop(guard);
        std::process::exit(1);
    }
}
