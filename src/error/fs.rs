//! File system errors

use std::path::Path;

use super::PluginError;

/// Creates a file read error
pub fn read_failed(path: &Path, err: &std::io::Error) -> PluginError {
    PluginError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: &Path, err: &std::io::Error) -> PluginError {
    PluginError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> PluginError {
    PluginError::IoError {
        message: message.into(),
    }
}
