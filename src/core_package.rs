//! Locating the installed CiviCRM core package
//!
//! Composer records every installed package in
//! `{vendor}/composer/installed.json`. Composer 2 wraps the list in a
//! `{"packages": [...]}` object; Composer 1 writes a bare array.

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::CORE_PACKAGE;
use crate::error::{Result, config as config_error};

#[derive(Debug, Clone, Deserialize)]
struct InstalledPackage {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    version_normalized: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InstalledManifest {
    V2 { packages: Vec<InstalledPackage> },
    V1(Vec<InstalledPackage>),
}

/// The installed `civicrm/civicrm-core` package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorePackage {
    /// Version string as Composer reports it, e.g. `5.69.2` or `5.70.x-dev`
    pub pretty_version: String,
    /// The `MAJOR.MINOR.PATCH` release extracted from it
    pub release: String,
    pub path: PathBuf,
}

static RELEASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("release regex is valid"));

/// Extract the `MAJOR.MINOR.PATCH` part of a version string
pub fn parse_release(version: &str) -> Result<String> {
    RELEASE_PATTERN
        .captures(version)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| config_error::version_unparseable(version))
}

fn missing_core() -> crate::error::PluginError {
    config_error::missing(
        format!("{CORE_PACKAGE} package"),
        format!(
            "The {CORE_PACKAGE} package doesn't appear to be installed. \
             Did you forget to run 'composer require {CORE_PACKAGE}'?"
        ),
    )
}

impl CorePackage {
    /// Find the core package among the packages Composer has installed
    pub fn locate(vendor_dir: &Path) -> Result<Self> {
        let installed = vendor_dir.join("composer").join("installed.json");
        if !installed.is_file() {
            return Err(missing_core());
        }

        let content = fs::read_to_string(&installed).map_err(|e| {
            config_error::read_failed(installed.display().to_string(), e.to_string())
        })?;
        let manifest: InstalledManifest = serde_json::from_str(&content).map_err(|e| {
            config_error::parse_failed(installed.display().to_string(), e.to_string())
        })?;
        let packages = match manifest {
            InstalledManifest::V2 { packages } | InstalledManifest::V1(packages) => packages,
        };

        let package = packages
            .into_iter()
            .find(|p| p.name == CORE_PACKAGE)
            .ok_or_else(missing_core)?;

        let pretty_version = package
            .version
            .or(package.version_normalized)
            .unwrap_or_default();
        let release = parse_release(&pretty_version)?;

        Ok(Self {
            pretty_version,
            release,
            path: vendor_dir.join(CORE_PACKAGE),
        })
    }
}
