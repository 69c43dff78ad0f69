//! Download errors

use super::PluginError;

/// Creates a download failed error
pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> PluginError {
    PluginError::DownloadFailed {
        url: url.into(),
        reason: reason.into(),
    }
}
