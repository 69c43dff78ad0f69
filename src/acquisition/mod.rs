//! Extension acquisition
//!
//! Processes every configured extension once, in configuration order. For
//! each one the engine either links a local checkout or downloads and
//! extracts its archive and then applies its patches. A failing extension is
//! reported and recorded; the batch always carries on with the next one.

pub mod archive;
pub mod download;
pub mod link;
pub mod patch;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::common::fs::{ensure_dir, is_symlink, remove_dir_recursively, remove_path, unlink};
use crate::config::{ExtensionLayout, ExtensionList, ExtensionSpec};
use crate::error::{PluginError, Result, config as config_error, fs as fs_error, patch as patch_error};
use crate::temp::{self, ARCHIVE_PREFIX, PATCH_PREFIX};
use crate::ui::Reporter;

pub use download::{Downloader, HttpDownloader};
pub use patch::{PatchCommand, PatchRunner};

/// What happened to one extension
#[derive(Debug)]
pub enum AcquisitionOutcome {
    /// Satisfied by a symbolic link to a local directory
    Linked { target: PathBuf },
    Downloaded { patches_applied: usize },
    /// Nothing to download
    Skipped { reason: String },
    Failed { error: PluginError },
}

#[derive(Debug)]
pub struct ExtensionResult {
    pub name: String,
    pub outcome: AcquisitionOutcome,
}

/// Outcomes of one batch, in processing order
#[derive(Debug, Default)]
pub struct AcquisitionReport {
    pub results: Vec<ExtensionResult>,
}

impl AcquisitionReport {
    fn record(&mut self, name: &str, outcome: AcquisitionOutcome) {
        self.results.push(ExtensionResult {
            name: name.to_string(),
            outcome,
        });
    }

    pub fn outcome(&self, name: &str) -> Option<&AcquisitionOutcome> {
        self.results
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.outcome)
    }

    pub fn linked(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Linked { .. }))
    }

    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Failed { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn count(&self, predicate: impl Fn(&AcquisitionOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Runs the per-extension procedure over an extension list
pub struct AcquisitionEngine<'a> {
    layout: &'a ExtensionLayout,
    project_root: &'a Path,
    downloader: &'a dyn Downloader,
    patcher: &'a dyn PatchRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> AcquisitionEngine<'a> {
    pub fn new(
        layout: &'a ExtensionLayout,
        project_root: &'a Path,
        downloader: &'a dyn Downloader,
        patcher: &'a dyn PatchRunner,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            layout,
            project_root,
            downloader,
            patcher,
            reporter,
        }
    }

    /// Acquire every extension in `extensions`.
    ///
    /// Only a failure to prepare the install directory is returned as an
    /// error; everything else ends up in the report.
    pub fn run(&self, extensions: &ExtensionList, clean: bool) -> Result<AcquisitionReport> {
        let install_dir = &self.layout.install_dir;
        if clean {
            self.clean_install_dir()?;
        }
        ensure_dir(install_dir).map_err(|e| install_dir_error(install_dir, &e))?;

        let mut report = AcquisitionReport::default();
        for spec in extensions {
            let outcome = match self.acquire(spec) {
                Ok(outcome) => outcome,
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    self.reporter.error(&error.to_string());
                    AcquisitionOutcome::Failed { error }
                }
            };
            tracing::debug!(extension = %spec.name, outcome = ?outcome, "extension processed");
            report.record(&spec.name, outcome);
        }

        Ok(report)
    }

    /// Empty the install directory, keeping the directory and its `.gitkeep`.
    ///
    /// Top-level links are unlinked first so linked checkouts are never
    /// walked into.
    fn clean_install_dir(&self) -> Result<()> {
        let install_dir = &self.layout.install_dir;
        self.reporter
            .info(&format!("Cleaning {} directory...", install_dir.display()));

        if let Ok(entries) = fs::read_dir(install_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if is_symlink(&path) {
                    tracing::debug!(path = %path.display(), "unlinking");
                    unlink(&path).map_err(|e| {
                        config_error::install_dir_failed(
                            path.display().to_string(),
                            e.to_string(),
                        )
                    })?;
                }
            }
        }

        remove_dir_recursively(install_dir, true).map_err(|e| install_dir_error(install_dir, &e))
    }

    fn acquire(&self, spec: &ExtensionSpec) -> Result<AcquisitionOutcome> {
        let destination = self.layout.install_dir.join(&spec.name);

        if let Some(target) = link::link_extension(spec, self.layout, &destination, self.reporter)
        {
            return Ok(AcquisitionOutcome::Linked { target });
        }

        remove_path(&destination)?;

        let Some(url) = spec.url.as_deref() else {
            let reason = format!(
                "Download Url missing for {} in {}",
                spec.name,
                destination.display()
            );
            self.reporter.error(&reason);
            return Ok(AcquisitionOutcome::Skipped { reason });
        };

        self.reporter.info(&format!(
            "Downloading CiviCRM extension {} from {url}...",
            spec.name
        ));
        let extracted = self.download_and_extract(spec, url)?;
        self.reporter
            .detail(&format!("Extracted {} archive entries", extracted.entries));
        archive::settle_root(&self.layout.install_dir, &destination, &spec.name, &extracted)?;

        let patches_applied = self.apply_patches(spec, &destination)?;
        Ok(AcquisitionOutcome::Downloaded { patches_applied })
    }

    fn download_and_extract(&self, spec: &ExtensionSpec, url: &str) -> Result<archive::Extracted> {
        let mut archive_file = temp_file(ARCHIVE_PREFIX, ".zip")?;
        self.downloader.fetch(url, archive_file.as_file_mut())?;

        let extracted = archive::extract(archive_file.path(), &spec.name, &self.layout.install_dir);
        if let Err(e) = archive_file.close() {
            tracing::warn!(error = %e, "failed to remove temporary archive");
        }
        extracted
    }

    /// Apply the extension's patches in order, stopping at the first one
    /// that fits at no level.
    fn apply_patches(&self, spec: &ExtensionSpec, destination: &Path) -> Result<usize> {
        for patch in &spec.patches {
            self.reporter.step("Applying patch", patch);

            let (patch_file, _guard) = self.materialize_patch(patch)?;
            match patch::apply_patch(self.patcher, destination, &patch_file) {
                Some(level) => {
                    self.reporter
                        .detail(&format!("Applied {patch} with {level}"));
                }
                None => return Err(patch_error::exhausted(patch)),
            }
        }
        Ok(spec.patches.len())
    }

    /// Local path of a patch, downloading remote patches to a temp file.
    ///
    /// The returned guard keeps a downloaded patch alive until it is applied.
    fn materialize_patch(&self, patch: &str) -> Result<(PathBuf, Option<NamedTempFile>)> {
        if !download::is_remote(patch) {
            let path = download::local_path(self.project_root, patch);
            if !path.is_file() {
                let err = std::io::Error::new(std::io::ErrorKind::NotFound, "patch file not found");
                return Err(fs_error::read_failed(&path, &err));
            }
            return Ok((path, None));
        }

        let mut file = temp_file(PATCH_PREFIX, ".patch")?;
        self.downloader.fetch(patch, file.as_file_mut())?;
        Ok((file.path().to_path_buf(), Some(file)))
    }
}

fn temp_file(prefix: &str, suffix: &str) -> Result<NamedTempFile> {
    temp::named_temp_file(prefix, suffix)
        .map_err(|e| fs_error::io_error(format!("cannot create temporary file: {e}")))
}

fn install_dir_error(install_dir: &Path, err: &PluginError) -> PluginError {
    config_error::install_dir_failed(install_dir.display().to_string(), err.to_string())
}
