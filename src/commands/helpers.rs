//! Command helper utilities

use std::path::PathBuf;

use crate::cli::ToolArgs;
use crate::config::ProjectSettings;
use crate::error::{Result, fs as fs_error};
use crate::operations::RunOptions;

/// Resolve workspace path from optional argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    let path = match workspace {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| fs_error::io_error(format!("Failed to get current directory: {e}")))?,
    };
    Ok(dunce::canonicalize(&path).unwrap_or(path))
}

/// Load project settings for the resolved workspace
pub fn load_settings(workspace: Option<PathBuf>) -> Result<ProjectSettings> {
    let root = resolve_workspace_path(workspace)?;
    tracing::debug!(project_root = %root.display(), "loading configuration");
    ProjectSettings::load(&root)
}

pub fn run_options(tools: &ToolArgs, clean: bool) -> RunOptions {
    RunOptions {
        clean,
        download_timeout: tools.download_timeout(),
        patch_timeout: tools.patch_timeout(),
        patch_bin: tools.patch_bin.clone(),
    }
}
