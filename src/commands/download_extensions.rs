//! download-extensions command
//!
//! Acquires every configured extension. Individual failures are reported
//! but do not change the exit status.

use std::path::PathBuf;

use crate::cli::{DownloadArgs, ToolArgs};
use crate::error::Result;
use crate::operations::{DownloadOperation, summary};
use crate::ui::ConsoleReporter;

use super::helpers::{load_settings, run_options};

/// Run download-extensions command
pub fn run(
    workspace: Option<PathBuf>,
    tools: &ToolArgs,
    verbose: bool,
    args: DownloadArgs,
) -> Result<()> {
    let settings = load_settings(workspace)?;
    let options = run_options(tools, args.clean);
    let reporter = ConsoleReporter::new(verbose);

    let report = DownloadOperation::new(&settings, &options, &reporter).execute()?;
    summary::print_acquisition_summary(&report, verbose);

    Ok(())
}
