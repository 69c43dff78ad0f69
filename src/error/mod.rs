//! Error types and handling for civicrm-ext
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and core package errors
//! - [`download`]: Archive and patch download errors
//! - [`archive`]: Zip archive errors
//! - [`patch`]: Patch application errors
//! - [`fs`]: File system errors
//! - [`link`]: Symbolic link warnings
//!
//! Only the configuration errors and [`PluginError::InstallDirFailed`] abort a
//! run. Everything else is caught at the per-extension boundary.

pub mod archive;
pub mod config;
pub mod download;
pub mod fs;
pub mod link;
pub mod patch;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for civicrm-ext operations
#[derive(Error, Diagnostic, Debug)]
pub enum PluginError {
    // Configuration errors
    #[error("Required configuration missing: {what}")]
    #[diagnostic(code(civicrm_ext::config::missing))]
    ConfigurationMissing { what: String, hint: String },

    #[error("Unable to determine CiviCRM release version from {version}")]
    #[diagnostic(
        code(civicrm_ext::config::version_unparseable),
        help("The installed civicrm/civicrm-core version must contain a MAJOR.MINOR.PATCH number")
    )]
    VersionUnparseable { version: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(civicrm_ext::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(civicrm_ext::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Unable to create extensions install directory {path}: {reason}")]
    #[diagnostic(
        code(civicrm_ext::config::install_dir_failed),
        help("Check extensions_install_path in composer.json or local_extension.yaml")
    )]
    InstallDirFailed { path: String, reason: String },

    // Download errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(code(civicrm_ext::download::failed))]
    DownloadFailed { url: String, reason: String },

    // Archive errors
    #[error("Unable to open downloaded archive for {name}: {reason}")]
    #[diagnostic(code(civicrm_ext::archive::open_failed))]
    ArchiveOpenFailed { name: String, reason: String },

    #[error("Failed to extract archive for {name}: {reason}")]
    #[diagnostic(code(civicrm_ext::archive::extract_failed))]
    ArchiveExtractFailed { name: String, reason: String },

    #[error("Unexpected archive layout for {name}: {reason}")]
    #[diagnostic(
        code(civicrm_ext::archive::layout_unexpected),
        help("Extension archives must contain a single top-level directory")
    )]
    ArchiveLayoutUnexpected { name: String, reason: String },

    // Patch errors
    #[error("Cannot apply patch {patch}")]
    #[diagnostic(
        code(civicrm_ext::patch::exhausted),
        help("The patch did not apply at any of the levels -p1, -p0, -p2, -p4")
    )]
    PatchExhausted { patch: String },

    // Link warnings
    #[error("Target directory {target} for {name} does not exist")]
    #[diagnostic(code(civicrm_ext::link::target_missing))]
    LinkTargetMissing { name: String, target: String },

    #[error("Failed to create soft link for {target} to {destination}: {reason}")]
    #[diagnostic(code(civicrm_ext::link::create_failed))]
    SymlinkCreateFailed {
        target: String,
        destination: String,
        reason: String,
    },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(civicrm_ext::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(civicrm_ext::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(civicrm_ext::fs::io_error))]
    IoError { message: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(civicrm_ext::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },
}

impl PluginError {
    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PluginError::ConfigurationMissing { .. }
                | PluginError::VersionUnparseable { .. }
                | PluginError::ConfigReadFailed { .. }
                | PluginError::ConfigParseFailed { .. }
                | PluginError::InstallDirFailed { .. }
        )
    }

    /// Extra guidance printed after fatal configuration errors
    pub fn hint(&self) -> Option<&str> {
        match self {
            PluginError::ConfigurationMissing { hint, .. } if !hint.is_empty() => Some(hint),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PluginError {
    fn from(err: std::io::Error) -> Self {
        PluginError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PluginError {
    fn from(err: serde_yaml::Error) -> Self {
        PluginError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for PluginError {
    fn from(err: zip::result::ZipError) -> Self {
        PluginError::ArchiveExtractFailed {
            name: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for PluginError {
    fn from(err: reqwest::Error) -> Self {
        PluginError::DownloadFailed {
            url: err
                .url()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PluginError>;
