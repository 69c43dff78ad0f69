//! The parts of `composer.json` this tool reads
//!
//! Only `config.vendor-dir` and `extra.civicrm` are modelled; every other
//! key is ignored.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::extension::ExtensionList;
use crate::error::{Result, config as config_error};

/// Composer manifest filename
pub const COMPOSER_FILE: &str = "composer.json";

/// Composer's default vendor directory
pub const DEFAULT_VENDOR_DIR: &str = "vendor";

#[derive(Debug, Default, Deserialize)]
pub struct ComposerManifest {
    #[serde(default)]
    pub config: ComposerConfig,
    #[serde(default)]
    pub extra: ComposerExtra,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposerConfig {
    #[serde(rename = "vendor-dir", default)]
    pub vendor_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposerExtra {
    #[serde(default)]
    pub civicrm: Option<CivicrmExtra>,
}

/// The `extra.civicrm` section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CivicrmExtra {
    #[serde(default)]
    pub extensions: ExtensionList,
    /// Base directory for `link` lookups
    #[serde(default)]
    pub extensions_dir: Option<String>,
    /// Where extensions are installed
    #[serde(default)]
    pub extensions_install_path: Option<String>,
    /// Deployment target, e.g. `drupal` or `wordpress`
    #[serde(default)]
    pub cms_type: Option<String>,
}

impl ComposerManifest {
    /// Load `composer.json` from the project root.
    ///
    /// A missing file is fatal: without it there is nothing to install.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(COMPOSER_FILE);
        if !path.exists() {
            return Err(config_error::missing(
                path.display().to_string(),
                "Run civicrm-ext from the directory that holds composer.json, or pass --workspace",
            ));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_json(&content)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// The `extra.civicrm` section, or an empty one
    pub fn civicrm(&self) -> CivicrmExtra {
        self.extra.civicrm.clone().unwrap_or_default()
    }

    pub fn vendor_dir(&self) -> &str {
        self.config
            .vendor_dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_VENDOR_DIR)
    }
}

impl CivicrmExtra {
    /// Whether web asset sync is disabled for this deployment target
    pub fn is_wordpress(&self) -> bool {
        self.cms_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("wordpress"))
    }
}
