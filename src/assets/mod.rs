//! Web asset synchronization
//!
//! Copies the parts of the core package that must be served directly
//! (kcfinder, the REST entry point, editor options) into
//! `web/libraries/civicrm`, together with the bundled bootstrap files.
//! Every step runs on its own: a failing step is reported and recorded, and
//! the remaining steps still run.

use std::path::{Path, PathBuf};

use crate::common::fs::{copy_dir_recursive, copy_file, remove_path, write_file};
use crate::config::ProjectSettings;
use crate::error::{PluginError, Result, fs as fs_error};
use crate::ui::Reporter;

/// Web-served copy of the core package, relative to the project root
pub const WEB_LIBRARIES_DIR: &str = "web/libraries/civicrm";

/// Site-specific stylesheet kept next to the project's patches
pub const CUSTOM_CSS_SOURCE: &str = "patches/civicrm-custom.css";
pub const CUSTOM_CSS_TARGET: &str = "web/sites/default/files/civicrm-custom.css";

const CONFIG_PHP: &str = include_str!("civicrm.config.php");
const SETTINGS_LOCATION_PHP: &str = include_str!("settings_location.php");

/// Directories the synchronizer reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub project_root: PathBuf,
    /// Installed core package
    pub source: PathBuf,
    /// Installed third-party packages bundle, when present
    pub packages: PathBuf,
    pub destination: PathBuf,
}

impl AssetPaths {
    pub fn from_settings(settings: &ProjectSettings) -> Self {
        Self {
            project_root: settings.project_root.clone(),
            source: settings.core_dir(),
            packages: settings.packages_dir(),
            destination: settings.project_root.join(WEB_LIBRARIES_DIR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    /// Optional source absent; nothing to do
    NotPresent,
}

#[derive(Debug)]
pub struct StepFailure {
    pub step: &'static str,
    pub error: PluginError,
}

/// Result of one synchronization run
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Set when the deployment target needs no web assets
    pub skipped: bool,
    pub completed: Vec<&'static str>,
    pub not_present: Vec<&'static str>,
    pub failures: Vec<StepFailure>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct WebAssetSynchronizer<'a> {
    paths: AssetPaths,
    wordpress: bool,
    reporter: &'a dyn Reporter,
}

impl<'a> WebAssetSynchronizer<'a> {
    pub fn new(paths: AssetPaths, wordpress: bool, reporter: &'a dyn Reporter) -> Self {
        Self {
            paths,
            wordpress,
            reporter,
        }
    }

    pub fn sync(&self) -> SyncReport {
        let mut report = SyncReport::default();
        if self.wordpress {
            tracing::debug!("cms_type is wordpress, skipping web asset sync");
            report.skipped = true;
            return report;
        }

        let dest = &self.paths.destination;
        let source = &self.paths.source;
        self.reporter.info(&format!(
            "Syncing CiviCRM web assets to {}...",
            dest.display()
        ));

        self.step(&mut report, "remove kcfinder", || {
            remove_path(&dest.join("packages/kcfinder")).map(|()| StepStatus::Done)
        });

        // Bootstrap files live next to whichever kcfinder copy is served.
        let settings_dir = if self.paths.packages.exists() {
            self.step(&mut report, "mirror kcfinder", || {
                mirror(
                    &self.paths.packages.join("kcfinder"),
                    &dest.join("packages/kcfinder"),
                )
            });
            dest.clone()
        } else {
            self.step(&mut report, "mirror kcfinder", || {
                mirror(
                    &source.join("packages/kcfinder"),
                    &dest.join("core/packages/kcfinder"),
                )
            });
            dest.join("core")
        };

        self.step(&mut report, "civicrm.config.php", || {
            write_file(&settings_dir.join("civicrm.config.php"), CONFIG_PHP).map(|()| StepStatus::Done)
        });
        self.step(&mut report, "extension-compatibility.json", || {
            copy_required(
                &source.join("extension-compatibility.json"),
                &dest.join("core/extension-compatibility.json"),
            )
        });
        self.step(&mut report, "settings_location.php", || {
            write_file(
                &settings_dir.join("settings_location.php"),
                SETTINGS_LOCATION_PHP,
            )
            .map(|()| StepStatus::Done)
        });
        self.step(&mut report, "wysiwyg ck-options.json", || {
            copy_optional(
                &source.join("js/wysiwyg/ck-options.json"),
                &dest.join("core/js/wysiwyg/ck-options.json"),
            )
        });
        self.step(&mut report, "extern/rest.php", || {
            copy_optional(
                &source.join("extern/rest.php"),
                &settings_dir.join("extern/rest.php"),
            )
        });
        self.step(&mut report, "ckeditor4 ck-options.json", || {
            copy_optional(
                &source.join("ext/ckeditor4/js/ck-options.json"),
                &settings_dir.join("ext/ckeditor4/js/ck-options.json"),
            )
        });

        let css_source = self.paths.project_root.join(CUSTOM_CSS_SOURCE);
        if css_source.is_file() {
            self.reporter.info(&format!(
                "Syncing CiviCRM '{CUSTOM_CSS_SOURCE}' to '{CUSTOM_CSS_TARGET}'"
            ));
        }
        self.step(&mut report, "civicrm-custom.css", || {
            copy_optional(&css_source, &self.paths.project_root.join(CUSTOM_CSS_TARGET))
        });

        report
    }

    fn step(
        &self,
        report: &mut SyncReport,
        name: &'static str,
        action: impl FnOnce() -> Result<StepStatus>,
    ) {
        match action() {
            Ok(StepStatus::Done) => {
                tracing::debug!(step = name, "asset step done");
                report.completed.push(name);
            }
            Ok(StepStatus::NotPresent) => {
                tracing::debug!(step = name, "asset source not present");
                report.not_present.push(name);
            }
            Err(error) => {
                self.reporter
                    .error(&format!("Web asset step '{name}' failed: {error}"));
                report.failures.push(StepFailure { step: name, error });
            }
        }
    }
}

fn not_found(path: &Path) -> PluginError {
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory");
    fs_error::read_failed(path, &err)
}

fn mirror(source: &Path, target: &Path) -> Result<StepStatus> {
    if !source.is_dir() {
        return Err(not_found(source));
    }
    copy_dir_recursive(source, target).map_err(|e| fs_error::write_failed(target, &e))?;
    Ok(StepStatus::Done)
}

fn copy_required(source: &Path, target: &Path) -> Result<StepStatus> {
    if !source.is_file() {
        return Err(not_found(source));
    }
    copy_file(source, target)?;
    Ok(StepStatus::Done)
}

fn copy_optional(source: &Path, target: &Path) -> Result<StepStatus> {
    if !source.is_file() {
        return Ok(StepStatus::NotPresent);
    }
    copy_file(source, target)?;
    Ok(StepStatus::Done)
}
