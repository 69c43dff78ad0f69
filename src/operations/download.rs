//! Extension acquisition workflow

use crate::acquisition::{AcquisitionEngine, AcquisitionReport, HttpDownloader, PatchCommand};
use crate::config::ProjectSettings;
use crate::error::Result;
use crate::ui::Reporter;

use super::RunOptions;

pub struct DownloadOperation<'a> {
    settings: &'a ProjectSettings,
    options: &'a RunOptions,
    reporter: &'a dyn Reporter,
}

impl<'a> DownloadOperation<'a> {
    pub fn new(
        settings: &'a ProjectSettings,
        options: &'a RunOptions,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            settings,
            options,
            reporter,
        }
    }

    pub fn execute(&self) -> Result<AcquisitionReport> {
        let extensions = self.settings.extensions();
        if extensions.is_empty() {
            self.reporter.detail("No extensions configured in extra.civicrm.extensions");
        }
        if self.settings.local_override {
            self.reporter
                .detail("Using directory overrides from local_extension.yaml");
        }
        tracing::debug!(
            extensions = extensions.len(),
            install_dir = %self.settings.layout.install_dir.display(),
            "starting acquisition"
        );

        let downloader =
            HttpDownloader::new(self.options.download_timeout, &self.settings.project_root)?;
        let patcher = PatchCommand::new(&self.options.patch_bin, self.options.patch_timeout);
        let engine = AcquisitionEngine::new(
            &self.settings.layout,
            &self.settings.project_root,
            &downloader,
            &patcher,
            self.reporter,
        );

        engine.run(extensions, self.options.clean)
    }
}
