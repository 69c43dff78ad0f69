//! Common test utilities for civicrm-ext integration tests

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Default extensions install path, relative to the project root
#[allow(dead_code)]
pub const INSTALL_PATH: &str = "web/sites/default/civicrm/extensions/contrib";

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn civicrm_ext_cmd() -> Command {
    Command::cargo_bin("civicrm-ext").unwrap()
}

/// A Composer project in a temporary directory
#[allow(dead_code)]
pub struct TestProject {
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp dir");
        Self { temp, path }
    }

    /// Command running against this project
    pub fn cmd(&self) -> Command {
        let mut cmd = civicrm_ext_cmd();
        cmd.arg("--workspace").arg(&self.path);
        cmd.env_remove("CIVICRM_EXT_PROJECT_DIR");
        cmd
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write composer.json with the given `extra.civicrm` section
    pub fn write_composer(&self, civicrm: serde_json::Value) {
        let manifest = serde_json::json!({
            "name": "acme/site",
            "extra": { "civicrm": civicrm },
        });
        self.write_file(
            "composer.json",
            &serde_json::to_string_pretty(&manifest).expect("Failed to serialize composer.json"),
        );
    }

    /// Pretend civicrm/civicrm-core is installed in vendor/
    pub fn install_core(&self, version: &str) {
        let installed = serde_json::json!({
            "packages": [
                { "name": "civicrm/civicrm-core", "version": version },
            ],
            "dev": true,
        });
        self.write_file("vendor/composer/installed.json", &installed.to_string());
        self.write_file(
            "vendor/civicrm/civicrm-core/packages/kcfinder/browse.php",
            "<?php // kcfinder",
        );
        self.write_file(
            "vendor/civicrm/civicrm-core/extension-compatibility.json",
            "{}",
        );
    }

    /// Write a zip archive with the given `(name, content)` entries.
    ///
    /// Names ending in `/` become directory entries.
    pub fn write_zip(&self, path: &str, entries: &[(&str, &str)]) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        let mut writer = zip::ZipWriter::new(File::create(&file_path).expect("Failed to create zip"));
        for (name, content) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .expect("Failed to add directory");
            } else {
                writer
                    .start_file(*name, SimpleFileOptions::default())
                    .expect("Failed to start file");
                writer
                    .write_all(content.as_bytes())
                    .expect("Failed to write entry");
            }
        }
        writer.finish().expect("Failed to finish zip");
    }

    pub fn install_path(&self, name: &str) -> PathBuf {
        self.path.join(INSTALL_PATH).join(name)
    }

    /// Write an executable stand-in for `patch` that only accepts `level`.
    ///
    /// Every invocation appends its arguments to `patch-calls.log`.
    #[cfg(unix)]
    pub fn fake_patch_bin(&self, level: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path.join("bin/fake-patch");
        let log = self.path.join("patch-calls.log");
        self.write_file(
            "bin/fake-patch",
            &format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\n[ \"$1\" = \"{level}\" ]\n",
                log.display()
            ),
        );
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        script
    }

    /// Lines logged by the fake patch binary
    pub fn patch_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path.join("patch-calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Whether a usable `patch` binary is on PATH
#[allow(dead_code)]
pub fn system_patch_available() -> bool {
    std::process::Command::new("patch")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}
