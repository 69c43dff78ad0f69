//! Resolved project settings
//!
//! Turns `composer.json` (plus the local override) into absolute paths. All
//! relative paths are resolved against the project root.

use std::path::{Path, PathBuf};

use super::composer::{CivicrmExtra, ComposerManifest};
use super::extension::ExtensionList;
use super::local_override::LocalOverride;
use crate::error::Result;

/// Install path used when `extensions_install_path` is unset
pub const DEFAULT_INSTALL_PATH: &str = "web/sites/default/civicrm/extensions/contrib";

/// Composer name of the core package
pub const CORE_PACKAGE: &str = "civicrm/civicrm-core";

/// Composer name of the separately packaged third-party libraries
pub const PACKAGES_PACKAGE: &str = "civicrm/civicrm-packages";

/// Directories an extension can be placed into or linked from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionLayout {
    /// Parent of every extension destination
    pub install_dir: PathBuf,
    /// Base for `link` of contrib extensions
    pub extensions_dir: PathBuf,
    /// Base for `link` of `type: core` extensions
    pub core_extensions_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ProjectSettings {
    pub project_root: PathBuf,
    pub vendor_dir: PathBuf,
    pub civicrm: CivicrmExtra,
    pub layout: ExtensionLayout,
    /// Whether `local_extension.yaml` was found and applied
    pub local_override: bool,
}

impl ProjectSettings {
    /// Load and resolve settings for the project at `project_root`
    pub fn load(project_root: &Path) -> Result<Self> {
        let manifest = ComposerManifest::load(project_root)?;
        let local = LocalOverride::load(project_root)?;
        Ok(Self::resolve(project_root, &manifest, local.as_ref()))
    }

    pub fn resolve(
        project_root: &Path,
        manifest: &ComposerManifest,
        local: Option<&LocalOverride>,
    ) -> Self {
        let mut civicrm = manifest.civicrm();
        if let Some(local) = local {
            local.apply(&mut civicrm);
        }

        let vendor_dir = resolve_path(project_root, manifest.vendor_dir());
        let install_dir = resolve_path(
            project_root,
            non_empty(civicrm.extensions_install_path.as_deref()).unwrap_or(DEFAULT_INSTALL_PATH),
        );
        let extensions_dir = non_empty(civicrm.extensions_dir.as_deref())
            .map_or_else(|| project_root.to_path_buf(), |dir| resolve_path(project_root, dir));
        let core_extensions_dir = vendor_dir.join(CORE_PACKAGE).join("ext");

        Self {
            project_root: project_root.to_path_buf(),
            vendor_dir,
            civicrm,
            layout: ExtensionLayout {
                install_dir,
                extensions_dir,
                core_extensions_dir,
            },
            local_override: local.is_some_and(|l| !l.is_empty()),
        }
    }

    pub fn extensions(&self) -> &ExtensionList {
        &self.civicrm.extensions
    }

    /// Installed core package directory
    pub fn core_dir(&self) -> PathBuf {
        self.vendor_dir.join(CORE_PACKAGE)
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.vendor_dir.join(PACKAGES_PACKAGE)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> ComposerManifest {
        ComposerManifest::from_json(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let root = Path::new("/srv/site");
        let settings = ProjectSettings::resolve(root, &manifest("{}"), None);

        assert_eq!(settings.vendor_dir, root.join("vendor"));
        assert_eq!(settings.layout.install_dir, root.join(DEFAULT_INSTALL_PATH));
        assert_eq!(settings.layout.extensions_dir, root);
        assert_eq!(
            settings.layout.core_extensions_dir,
            root.join("vendor/civicrm/civicrm-core/ext")
        );
        assert!(!settings.local_override);
    }

    #[test]
    fn test_configured_paths() {
        let root = Path::new("/srv/site");
        let settings = ProjectSettings::resolve(
            root,
            &manifest(
                r#"{"config": {"vendor-dir": "lib"},
                    "extra": {"civicrm": {
                        "extensions_dir": "/opt/exts",
                        "extensions_install_path": "public/ext"
                    }}}"#,
            ),
            None,
        );

        assert_eq!(settings.vendor_dir, root.join("lib"));
        assert_eq!(settings.layout.install_dir, root.join("public/ext"));
        assert_eq!(settings.layout.extensions_dir, PathBuf::from("/opt/exts"));
        assert_eq!(settings.core_dir(), root.join("lib/civicrm/civicrm-core"));
        assert_eq!(
            settings.packages_dir(),
            root.join("lib/civicrm/civicrm-packages")
        );
    }

    #[test]
    fn test_empty_install_path_uses_default() {
        let root = Path::new("/srv/site");
        let settings = ProjectSettings::resolve(
            root,
            &manifest(r#"{"extra": {"civicrm": {"extensions_install_path": ""}}}"#),
            None,
        );
        assert_eq!(settings.layout.install_dir, root.join(DEFAULT_INSTALL_PATH));
    }

    #[test]
    fn test_local_override_wins() {
        let root = Path::new("/srv/site");
        let local = LocalOverride {
            extensions_dir: Some("../mine".to_string()),
            extensions_install_path: Some("tmp/contrib".to_string()),
        };
        let settings = ProjectSettings::resolve(
            root,
            &manifest(r#"{"extra": {"civicrm": {"extensions_dir": "/opt/exts"}}}"#),
            Some(&local),
        );

        assert_eq!(settings.layout.extensions_dir, root.join("../mine"));
        assert_eq!(settings.layout.install_dir, root.join("tmp/contrib"));
        assert!(settings.local_override);
    }
}
