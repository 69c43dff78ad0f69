//! Linking extensions from a local checkout instead of downloading them

use std::path::{Path, PathBuf};

use crate::common::fs::{remove_path, symlink_dir};
use crate::config::{ExtensionKind, ExtensionLayout, ExtensionSpec};
use crate::error::link as link_error;
use crate::ui::Reporter;

/// Directory a `link` value is resolved against
fn link_base<'a>(layout: &'a ExtensionLayout, kind: ExtensionKind) -> &'a Path {
    match kind {
        ExtensionKind::Core => &layout.core_extensions_dir,
        ExtensionKind::Contrib => &layout.extensions_dir,
    }
}

/// Try to satisfy `spec` with a symbolic link at `destination`.
///
/// Returns the link target on success. Every failure is reported as a
/// warning and yields `None` so the caller can fall back to downloading.
pub fn link_extension(
    spec: &ExtensionSpec,
    layout: &ExtensionLayout,
    destination: &Path,
    reporter: &dyn Reporter,
) -> Option<PathBuf> {
    let link = spec.link.as_deref()?;
    let candidate = link_base(layout, spec.kind).join(link);

    if !candidate.exists() {
        let warning = link_error::target_missing(&spec.name, candidate.display().to_string());
        reporter.warn(&warning.to_string());
        return None;
    }

    let target = dunce::canonicalize(&candidate).unwrap_or(candidate);
    reporter.info(&format!(
        "Creating soft link for {} to {}...",
        target.display(),
        destination.display()
    ));

    let created = remove_path(destination)
        .map_err(|e| e.to_string())
        .and_then(|()| symlink_dir(&target, destination).map_err(|e| e.to_string()));

    match created {
        Ok(()) => Some(target),
        Err(reason) => {
            let warning = link_error::create_failed(
                target.display().to_string(),
                destination.display().to_string(),
                reason,
            );
            reporter.warn(&warning.to_string());
            None
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::common::fs::is_symlink;
    use crate::ui::{RecordingReporter, Severity};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        layout: ExtensionLayout,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let layout = ExtensionLayout {
            install_dir: temp.path().join("install"),
            extensions_dir: temp.path().join("local"),
            core_extensions_dir: temp.path().join("core-ext"),
        };
        for dir in [&layout.install_dir, &layout.extensions_dir, &layout.core_extensions_dir] {
            fs::create_dir_all(dir).unwrap();
        }
        Fixture { _temp: temp, layout }
    }

    #[test]
    fn test_links_contrib_extension() {
        let fx = fixture();
        fs::create_dir_all(fx.layout.extensions_dir.join("mine")).unwrap();
        let spec = ExtensionSpec::from_url("org.example.mine", "https://example.org/mine.zip")
            .with_link("mine", ExtensionKind::Contrib);
        let destination = fx.layout.install_dir.join("org.example.mine");
        let reporter = RecordingReporter::default();

        let target = link_extension(&spec, &fx.layout, &destination, &reporter).unwrap();

        assert!(is_symlink(&destination));
        assert_eq!(fs::read_link(&destination).unwrap(), target);
        assert!(reporter.contains(Severity::Info, "Creating soft link"));
    }

    #[test]
    fn test_core_kind_uses_core_directory() {
        let fx = fixture();
        fs::create_dir_all(fx.layout.core_extensions_dir.join("search_kit")).unwrap();
        let spec = ExtensionSpec::from_url("search_kit", "")
            .with_link("search_kit", ExtensionKind::Core);
        let destination = fx.layout.install_dir.join("search_kit");

        let target =
            link_extension(&spec, &fx.layout, &destination, &RecordingReporter::default())
                .unwrap();
        assert!(target.ends_with("core-ext/search_kit"));
    }

    #[test]
    fn test_replaces_existing_destination() {
        let fx = fixture();
        fs::create_dir_all(fx.layout.extensions_dir.join("mine")).unwrap();
        let destination = fx.layout.install_dir.join("mine");
        fs::create_dir_all(destination.join("old")).unwrap();
        let spec = ExtensionSpec::from_url("mine", "").with_link("mine", ExtensionKind::Contrib);

        assert!(
            link_extension(&spec, &fx.layout, &destination, &RecordingReporter::default())
                .is_some()
        );
        assert!(is_symlink(&destination));
        assert!(!destination.join("old").exists());
    }

    #[test]
    fn test_missing_target_warns() {
        let fx = fixture();
        let spec = ExtensionSpec::from_url("gone", "").with_link("gone", ExtensionKind::Contrib);
        let destination = fx.layout.install_dir.join("gone");
        let reporter = RecordingReporter::default();

        assert!(link_extension(&spec, &fx.layout, &destination, &reporter).is_none());
        assert!(!destination.exists());
        assert_eq!(reporter.messages(Severity::Warning).len(), 1);
    }

    #[test]
    fn test_no_link_configured() {
        let fx = fixture();
        let spec = ExtensionSpec::from_url("plain", "https://example.org/plain.zip");
        let reporter = RecordingReporter::default();
        assert!(
            link_extension(&spec, &fx.layout, &fx.layout.install_dir.join("plain"), &reporter)
                .is_none()
        );
        assert!(reporter.messages(Severity::Warning).is_empty());
    }
}
