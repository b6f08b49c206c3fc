//! Main entry point for datasure CLI

use clap::Parser;
use datasure::cli::Cli;
use datasure::commands::{execute_command, CommandStatus};

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match execute_command(cli.command, cli.config.as_deref(), cli.quiet) {
        Ok(CommandStatus::Success) => {}
        Ok(CommandStatus::ValidationFailed) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
