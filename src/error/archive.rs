//! Zip archive errors

use super::PluginError;

pub fn open_failed(name: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::ArchiveOpenFailed {
        name: name.into(),
        reason: reason.into(),
    }
}

pub fn extract_failed(name: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::ArchiveExtractFailed {
        name: name.into(),
        reason: reason.into(),
    }
}

pub fn layout_unexpected(name: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::ArchiveLayoutUnexpected {
        name: name.into(),
        reason: reason.into(),
    }
}
