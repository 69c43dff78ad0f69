//! Developer-local path overrides
//!
//! `local_extension.yaml` lives next to `composer.json` and is meant to be
//! git-ignored. It may override the two path settings and nothing else:
//!
//! ```yaml
//! extensions_dir: /home/me/src/civicrm-extensions
//! extensions_install_path: web/sites/default/civicrm/extensions/contrib
//! ```
//!
//! Values replace whatever `composer.json` says; they are not validated.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::composer::CivicrmExtra;
use crate::error::{Result, config as config_error};

/// Override filename, looked up in the project root
pub const LOCAL_OVERRIDE_FILE: &str = "local_extension.yaml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct LocalOverride {
    #[serde(default)]
    pub extensions_dir: Option<String>,
    #[serde(default)]
    pub extensions_install_path: Option<String>,
}

impl LocalOverride {
    /// Load the override file if present
    pub fn load(project_root: &Path) -> Result<Option<Self>> {
        let path = project_root.join(LOCAL_OVERRIDE_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;

        // An empty file is a valid "no overrides" document
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Apply the overrides over the composer settings (last writer wins)
    pub fn apply(&self, civicrm: &mut CivicrmExtra) {
        if let Some(dir) = &self.extensions_dir {
            civicrm.extensions_dir = Some(dir.clone());
        }
        if let Some(path) = &self.extensions_install_path {
            civicrm.extensions_install_path = Some(path.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions_dir.is_none() && self.extensions_install_path.is_none()
    }
}
