//! Temporary files for downloaded archives and patches.
//!
//! Temp files are always created under an absolute base so a relative TMPDIR
//! (e.g. TMPDIR=tmp) never drops archives into the project being managed.

use std::env;
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Prefix of every temporary archive file
pub const ARCHIVE_PREFIX: &str = "civicrm-extension-";

/// Prefix of downloaded patch files
pub const PATCH_PREFIX: &str = "civicrm-extension-patch-";

/// Returns an absolute directory suitable for temporary files.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        return t;
    }
    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}

/// Create a uniquely named temp file that is removed when dropped.
pub fn named_temp_file(prefix: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(temp_dir_base())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    fn test_named_temp_file_removed_on_drop() {
        let file = named_temp_file(ARCHIVE_PREFIX, ".zip").unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(ARCHIVE_PREFIX));
        assert!(name.ends_with(".zip"));
        drop(file);
        assert!(!path.exists());
    }
}
