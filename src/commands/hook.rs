//! hook command
//!
//! Entry point for Composer's post-package-install and post-package-update
//! scripts. Only an install or update of the core package triggers work.

use std::path::PathBuf;

use crate::cli::{HookArgs, SyncArgs, ToolArgs};
use crate::config::CORE_PACKAGE;
use crate::error::Result;

/// Whether a package event should run the full workflow
pub fn triggers_sync(package: &str) -> bool {
    package.trim() == CORE_PACKAGE
}

/// Run hook command
pub fn run(workspace: Option<PathBuf>, tools: &ToolArgs, verbose: bool, args: HookArgs) -> Result<()> {
    if !triggers_sync(&args.package) {
        tracing::debug!(package = %args.package, "not the core package, nothing to do");
        return Ok(());
    }

    super::sync::run(workspace, tools, verbose, SyncArgs { clean: false })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_sync() {
        assert!(triggers_sync("civicrm/civicrm-core"));
        assert!(!triggers_sync("civicrm/civicrm-packages"));
        assert!(!triggers_sync("drupal/core"));
        assert!(!triggers_sync(""));
    }
}
