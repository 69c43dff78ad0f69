//! Patch application errors

use super::PluginError;

/// Creates an error for a patch that failed at every level
pub fn exhausted(patch: impl Into<String>) -> PluginError {
    PluginError::PatchExhausted {
        patch: patch.into(),
    }
}
