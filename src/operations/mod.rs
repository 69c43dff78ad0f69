//! High-level workflows behind the commands
//!
//! - [`DownloadOperation`]: acquire every configured extension
//! - [`SyncOperation`]: acquisition followed by web asset synchronization
//! - [`summary`]: end-of-run console summaries

pub mod download;
pub mod summary;
pub mod sync;

use std::path::PathBuf;
use std::time::Duration;

pub use download::DownloadOperation;
pub use sync::{SyncOperation, SyncOutcome};

/// Settings shared by every workflow
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Empty the install directory before acquiring
    pub clean: bool,
    pub download_timeout: Duration,
    pub patch_timeout: Duration,
    pub patch_bin: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            clean: false,
            download_timeout: Duration::from_secs(300),
            patch_timeout: Duration::from_secs(120),
            patch_bin: PathBuf::from("patch"),
        }
    }
}
