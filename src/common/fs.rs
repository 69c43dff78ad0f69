//! Common file system operations with unified error handling
//!
//! Everything here treats symbolic links as leaves: a link is unlinked or
//! copied as a link target's content, never walked into when deleting.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// Marker file kept at the root of a cleaned directory
pub const GITKEEP: &str = ".gitkeep";

/// Whether `path` is a symbolic link (without following it)
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Whether anything (file, directory or dangling link) exists at `path`
pub fn path_present(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Unlink a symbolic link without touching its target.
pub fn unlink(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        // Directory symlinks on Windows are removed like directories.
        Err(err) if cfg!(windows) => fs::remove_dir(path).map_err(|_| err),
        Err(err) => Err(err),
    }
}

/// Remove whatever is at `path`: a link, a file, or a directory tree.
///
/// Missing paths are not an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    let outcome = if meta.file_type().is_symlink() {
        unlink(path)
    } else if meta.is_dir() {
        return remove_dir_recursively(path, false);
    } else {
        fs::remove_file(path)
    };

    outcome.map_err(|e| fs_error::write_failed(path, &e))
}

/// Remove a directory recursively, depth first.
///
/// Symlinks inside the tree are unlinked, never followed. With `keep_root`
/// the directory itself and a `.gitkeep` directly inside it survive.
pub fn remove_dir_recursively(dir: &Path, keep_root: bool) -> Result<()> {
    if !path_present(dir) {
        return Ok(());
    }

    for entry in WalkDir::new(dir).min_depth(1).contents_first(true) {
        let entry = entry.map_err(|e| fs_error::io_error(e.to_string()))?;

        if keep_root && entry.depth() == 1 && entry.file_name() == GITKEEP {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type();
        let outcome = if file_type.is_symlink() {
            unlink(path)
        } else if file_type.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        outcome.map_err(|e| fs_error::write_failed(path, &e))?;
    }

    if !keep_root {
        fs::remove_dir(dir).map_err(|e| fs_error::write_failed(dir, &e))?;
    }

    Ok(())
}

/// Create a directory and its parents if absent
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| fs_error::write_failed(path, &e))
}

/// Copy one file, creating the destination's parent directories.
///
/// An existing destination is overwritten.
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(source, target)
        .map(|_| ())
        .map_err(|e| fs_error::write_failed(target, &e))
}

/// Write `content` to `target`, creating parent directories.
pub fn write_file(target: &Path, content: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }
    fs::write(target, content).map_err(|e| fs_error::write_failed(target, &e))
}

/// Copy a directory recursively (mirror without deleting extra files)
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Create a directory symbolic link at `link` pointing to `target`.
pub fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(target, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp() -> TempDir {
        TempDir::new_in(crate::temp::temp_dir_base()).unwrap()
    }

    #[test]
    fn test_remove_dir_recursively_missing_is_noop() {
        let temp = temp();
        let result = remove_dir_recursively(&temp.path().join("absent"), false);
        assert!(result.is_ok());
    }

    #[test]
    fn test_remove_dir_recursively_removes_tree() {
        let temp = temp();
        let dir = temp.path().join("tree");
        fs::create_dir_all(dir.join("a/b/c")).unwrap();
        fs::write(dir.join("a/b/c/file.txt"), "x").unwrap();
        fs::write(dir.join("top.txt"), "y").unwrap();

        remove_dir_recursively(&dir, false).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_remove_dir_recursively_keeps_root_and_gitkeep() {
        let temp = temp();
        let dir = temp.path().join("contrib");
        fs::create_dir_all(dir.join("ext/sub")).unwrap();
        fs::write(dir.join(GITKEEP), "").unwrap();
        fs::write(dir.join("ext/sub").join(GITKEEP), "").unwrap();

        remove_dir_recursively(&dir, true).unwrap();

        assert!(dir.is_dir());
        assert!(dir.join(GITKEEP).exists());
        assert!(!dir.join("ext").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_dir_recursively_does_not_follow_links() {
        let temp = temp();
        let outside = temp.path().join("outside");
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "precious").unwrap();

        let dir = temp.path().join("contrib");
        fs::create_dir_all(&dir).unwrap();
        symlink_dir(&outside, &dir.join("linked")).unwrap();

        remove_dir_recursively(&dir, false).unwrap();

        assert!(!dir.exists());
        assert_eq!(
            fs::read_to_string(outside.join("keep.txt")).unwrap(),
            "precious"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_path_unlinks_symlink_only() {
        let temp = temp();
        let target = temp.path().join("target");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("file.txt"), "x").unwrap();
        let link = temp.path().join("link");
        symlink_dir(&target, &link).unwrap();

        remove_path(&link).unwrap();

        assert!(!path_present(&link));
        assert!(target.join("file.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_path_dangling_symlink() {
        let temp = temp();
        let link = temp.path().join("dangling");
        symlink_dir(&temp.path().join("gone"), &link).unwrap();
        assert!(is_symlink(&link));
        assert!(!link.exists());

        remove_path(&link).unwrap();
        assert!(!path_present(&link));
    }

    #[test]
    fn test_copy_file_creates_parents_and_overwrites() {
        let temp = temp();
        let source = temp.path().join("source.txt");
        fs::write(&source, "new").unwrap();
        let target = temp.path().join("deep/nested/target.txt");

        copy_file(&source, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");

        fs::write(&source, "newer").unwrap();
        copy_file(&source, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "newer");
    }

    #[test]
    fn test_copy_dir_recursive() {
        let temp = temp();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("nested/b.txt"), "b").unwrap();
        let dst = temp.path().join("dst");

        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("nested/b.txt")).unwrap(), "b");
    }
}
