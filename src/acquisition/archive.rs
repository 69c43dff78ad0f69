//! Zip extraction into the install directory

use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{Result, archive as archive_error, fs as fs_error};

/// What an extraction left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Name of the archive's first entry, used to find its root directory
    pub first_entry: Option<String>,
    pub entries: usize,
}

/// Extract every entry of the zip at `archive_path` into `install_dir`.
///
/// Entries that would land outside `install_dir` fail the whole extraction.
pub fn extract(archive_path: &Path, name: &str, install_dir: &Path) -> Result<Extracted> {
    let file = File::open(archive_path)
        .map_err(|e| archive_error::open_failed(name, e.to_string()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| archive_error::open_failed(name, e.to_string()))?;

    let first_entry = if archive.is_empty() {
        None
    } else {
        archive.by_index_raw(0).ok().map(|e| e.name().to_string())
    };

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| archive_error::extract_failed(name, e.to_string()))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(archive_error::extract_failed(
                name,
                format!("entry '{}' points outside the install directory", entry.name()),
            ));
        };
        let out_path = install_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| fs_error::write_failed(&out_path, &e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, &e))?;
        }
        let mut out = File::create(&out_path).map_err(|e| fs_error::write_failed(&out_path, &e))?;
        io::copy(&mut entry, &mut out)
            .map_err(|e| archive_error::extract_failed(name, e.to_string()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .map_err(|e| fs_error::write_failed(&out_path, &e))?;
        }
    }

    tracing::debug!(name, entries = archive.len(), "archive extracted");

    Ok(Extracted {
        first_entry,
        entries: archive.len(),
    })
}

/// Top-level directory of an archive entry name, if the entry is nested
fn top_level_segment(entry: &str) -> Option<&str> {
    let normalized = entry.trim_start_matches("./");
    let (segment, _) = normalized.split_once(['/', '\\'])?;
    (!segment.is_empty() && segment != "..").then_some(segment)
}

/// Make sure the extension ended up at `destination`.
///
/// Archives are usually rooted in a directory named after a release
/// (`myext-1.2.0/`). When nothing exists at `destination` after extraction,
/// the first entry's top-level directory is renamed to it.
pub fn settle_root(
    install_dir: &Path,
    destination: &Path,
    name: &str,
    extracted: &Extracted,
) -> Result<()> {
    if destination.is_dir() {
        return Ok(());
    }

    let first = extracted
        .first_entry
        .as_deref()
        .ok_or_else(|| archive_error::layout_unexpected(name, "archive is empty"))?;
    let segment = top_level_segment(first).ok_or_else(|| {
        archive_error::layout_unexpected(
            name,
            format!("first entry '{first}' is not inside a directory"),
        )
    })?;

    let extracted_root = install_dir.join(segment);
    if !extracted_root.is_dir() {
        return Err(archive_error::layout_unexpected(
            name,
            format!("'{segment}' was not extracted as a directory"),
        ));
    }

    tracing::debug!(from = %extracted_root.display(), to = %destination.display(), "renaming extracted root");
    fs::rename(&extracted_root, destination).map_err(|e| fs_error::write_failed(destination, &e))
}
