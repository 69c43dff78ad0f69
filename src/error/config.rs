//! Configuration errors

use super::PluginError;

/// Creates a configuration missing error
pub fn missing(what: impl Into<String>, hint: impl Into<String>) -> PluginError {
    PluginError::ConfigurationMissing {
        what: what.into(),
        hint: hint.into(),
    }
}

/// Creates a version unparseable error
pub fn version_unparseable(version: impl Into<String>) -> PluginError {
    PluginError::VersionUnparseable {
        version: version.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an install directory error
pub fn install_dir_failed(path: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::InstallDirFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
