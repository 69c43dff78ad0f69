//! Fetching extension archives and remote patches
//!
//! `http://` and `https://` locations are downloaded with a blocking
//! `reqwest` client. `file://` URLs and plain paths are read from disk, with
//! relative paths resolved against the project root.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::settings::resolve_path;
use crate::error::{Result, download as download_error};
use crate::progress::DownloadProgress;

/// Source of archive and patch bytes
pub trait Downloader {
    /// Copy the resource at `location` into `dest`, returning the byte count
    fn fetch(&self, location: &str, dest: &mut dyn Write) -> Result<u64>;
}

/// Whether `location` must be fetched over the network
pub fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a non-remote location to a filesystem path
pub fn local_path(base_dir: &Path, location: &str) -> PathBuf {
    match location.strip_prefix("file://") {
        Some(path) => PathBuf::from(path),
        None => resolve_path(base_dir, location),
    }
}

/// Last path segment of a location, for progress messages
fn display_name(location: &str) -> &str {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(location)
}

/// Downloader backed by `reqwest` for remote locations and the local
/// filesystem for everything else
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
    base_dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(timeout: Duration, base_dir: &Path) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("civicrm-ext/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| download_error::failed("(client)", e.to_string()))?;

        Ok(Self {
            client,
            base_dir: base_dir.to_path_buf(),
        })
    }

    fn fetch_remote(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| download_error::failed(url, e.to_string()))?;

        let status = response.status();
        tracing::debug!(url, %status, "download response");
        if !status.is_success() {
            return Err(download_error::failed(url, format!("HTTP status {status}")));
        }

        let progress = DownloadProgress::new(display_name(url), response.content_length());
        let mut writer = progress.wrap_write(dest);
        match response.copy_to(&mut writer) {
            Ok(bytes) => {
                progress.finish();
                Ok(bytes)
            }
            Err(e) => {
                progress.abandon();
                Err(download_error::failed(url, e.to_string()))
            }
        }
    }

    fn fetch_local(&self, location: &str, dest: &mut dyn Write) -> Result<u64> {
        let path = local_path(&self.base_dir, location);
        let mut source = File::open(&path)
            .map_err(|e| download_error::failed(location, format!("{}: {e}", path.display())))?;
        io::copy(&mut source, dest).map_err(|e| download_error::failed(location, e.to_string()))
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, location: &str, dest: &mut dyn Write) -> Result<u64> {
        let bytes = if is_remote(location) {
            self.fetch_remote(location, dest)?
        } else {
            self.fetch_local(location, dest)?
        };
        dest.flush()
            .map_err(|e| download_error::failed(location, e.to_string()))?;
        tracing::debug!(location, bytes, "download complete");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use tempfile::TempDir;

    fn downloader(base: &Path) -> HttpDownloader {
        HttpDownloader::new(Duration::from_secs(5), base).unwrap()
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/a.zip"));
        assert!(is_remote("HTTP://example.org/a.zip"));
        assert!(!is_remote("file:///tmp/a.zip"));
        assert!(!is_remote("patches/fix.patch"));
    }

    #[test]
    fn test_local_path() {
        let base = Path::new("/srv/site");
        assert_eq!(local_path(base, "file:///tmp/a.zip"), PathBuf::from("/tmp/a.zip"));
        assert_eq!(local_path(base, "patches/x.patch"), base.join("patches/x.patch"));
        assert_eq!(local_path(base, "/abs/x.patch"), PathBuf::from("/abs/x.patch"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("https://example.org/dl/ext-1.2.zip"), "ext-1.2.zip");
        assert_eq!(display_name("ext.zip"), "ext.zip");
    }

    #[test]
    fn test_fetch_relative_local_file() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        std::fs::create_dir_all(temp.path().join("archives")).unwrap();
        std::fs::write(temp.path().join("archives/ext.zip"), b"PK-bytes").unwrap();

        let mut buffer = Vec::new();
        let bytes = downloader(temp.path())
            .fetch("archives/ext.zip", &mut buffer)
            .unwrap();

        assert_eq!(bytes, 8);
        assert_eq!(buffer, b"PK-bytes");
    }

    #[test]
    fn test_fetch_file_url() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let archive = temp.path().join("ext.zip");
        std::fs::write(&archive, b"zip").unwrap();

        let mut buffer = Vec::new();
        let url = format!("file://{}", archive.display());
        downloader(Path::new("/nonexistent"))
            .fetch(&url, &mut buffer)
            .unwrap();
        assert_eq!(buffer, b"zip");
    }

    #[test]
    fn test_fetch_missing_local_file() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let mut buffer = Vec::new();
        let err = downloader(temp.path())
            .fetch("missing.zip", &mut buffer)
            .unwrap_err();
        assert!(matches!(err, PluginError::DownloadFailed { .. }));
    }

    #[test]
    fn test_fetch_unreachable_host() {
        let mut buffer = Vec::new();
        // Port 9 on localhost is reserved (discard) and normally closed.
        let err = downloader(Path::new("/"))
            .fetch("http://127.0.0.1:9/ext.zip", &mut buffer)
            .unwrap_err();
        assert!(matches!(err, PluginError::DownloadFailed { .. }));
    }
}
