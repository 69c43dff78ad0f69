//! civicrm-ext - CiviCRM extension installer
//!
//! Downloads, links and patches the CiviCRM extensions a Composer project
//! declares in `extra.civicrm`, and syncs the web assets of the core package
//! into the web root.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod acquisition;
mod assets;
mod cli;
mod commands;
mod common;
mod config;
mod core_package;
mod error;
mod operations;
mod progress;
mod temp;
mod ui;

use cli::{Cli, Commands};

/// Diagnostics go to stderr at `warn`, or `debug` with --verbose.
/// `RUST_LOG` takes precedence over both.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::DownloadExtensions(args) => {
            commands::download_extensions::run(cli.workspace, &cli.tools, cli.verbose, args)
        }
        Commands::Sync(args) => commands::sync::run(cli.workspace, &cli.tools, cli.verbose, args),
        Commands::Hook(args) => commands::hook::run(cli.workspace, &cli.tools, cli.verbose, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}
