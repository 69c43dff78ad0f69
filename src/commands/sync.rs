//! sync command
//!
//! Acquires extensions, then copies web assets into the web root.

use std::path::PathBuf;

use crate::cli::{SyncArgs, ToolArgs};
use crate::error::Result;
use crate::operations::{SyncOperation, summary};
use crate::ui::ConsoleReporter;

use super::helpers::{load_settings, run_options};

/// Run sync command
pub fn run(workspace: Option<PathBuf>, tools: &ToolArgs, verbose: bool, args: SyncArgs) -> Result<()> {
    let settings = load_settings(workspace)?;
    let options = run_options(tools, args.clean);
    let reporter = ConsoleReporter::new(verbose);

    let outcome = SyncOperation::new(&settings, &options, &reporter).execute()?;
    if let Some(core) = &outcome.core {
        tracing::debug!(release = %core.release, path = %core.path.display(), "core package");
    }
    summary::print_acquisition_summary(&outcome.acquisition, verbose);
    summary::print_sync_summary(&outcome.assets, verbose);

    Ok(())
}
