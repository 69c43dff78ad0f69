//! Full post-install workflow: extensions first, then web assets

use crate::acquisition::AcquisitionReport;
use crate::assets::{AssetPaths, SyncReport, WebAssetSynchronizer};
use crate::config::ProjectSettings;
use crate::core_package::CorePackage;
use crate::error::Result;
use crate::ui::Reporter;

use super::{DownloadOperation, RunOptions};

/// Everything a full run produced
#[derive(Debug)]
pub struct SyncOutcome {
    /// Absent for WordPress deployments, which never need the core package
    pub core: Option<CorePackage>,
    pub acquisition: AcquisitionReport,
    pub assets: SyncReport,
}

pub struct SyncOperation<'a> {
    settings: &'a ProjectSettings,
    options: &'a RunOptions,
    reporter: &'a dyn Reporter,
}

impl<'a> SyncOperation<'a> {
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

    /// Run acquisition and asset sync.
    ///
    /// A missing core package or an unusable version aborts before any
    /// extension is touched.
    pub fn execute(&self) -> Result<SyncOutcome> {
        let wordpress = self.settings.civicrm.is_wordpress();
        let core = if wordpress {
            None
        } else {
            let core = CorePackage::locate(&self.settings.vendor_dir)?;
            self.reporter.detail(&format!(
                "Found civicrm/civicrm-core {} (release {})",
                core.pretty_version, core.release
            ));
            Some(core)
        };

        let acquisition = DownloadOperation::new(self.settings, self.options, self.reporter).execute()?;

        let synchronizer = WebAssetSynchronizer::new(
            AssetPaths::from_settings(self.settings),
            wordpress,
            self.reporter,
        );
        let assets = synchronizer.sync();

        Ok(SyncOutcome {
            core,
            acquisition,
            assets,
        })
    }
}
