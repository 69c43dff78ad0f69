//! Symbolic link warnings
//!
//! Neither of these stops an extension: the engine reports them and falls
//! back to downloading.

use super::PluginError;

pub fn target_missing(name: impl Into<String>, target: impl Into<String>) -> PluginError {
    PluginError::LinkTargetMissing {
        name: name.into(),
        target: target.into(),
    }
}

pub fn create_failed(
    target: impl Into<String>,
    destination: impl Into<String>,
    reason: impl Into<String>,
) -> PluginError {
    PluginError::SymlinkCreateFailed {
        target: target.into(),
        destination: destination.into(),
        reason: reason.into(),
    }
}
