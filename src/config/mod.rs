//! Configuration read from the Composer project
//!
//! - [`composer`]: `composer.json` (`config.vendor-dir`, `extra.civicrm`)
//! - [`extension`]: extension declarations, normalized at load time
//! - [`local_override`]: optional `local_extension.yaml`
//! - [`settings`]: everything resolved to absolute paths

pub mod composer;
pub mod extension;
pub mod local_override;
pub mod settings;

pub use composer::{CivicrmExtra, ComposerManifest};
pub use extension::{ExtensionKind, ExtensionList, ExtensionSpec};
pub use local_override::LocalOverride;
pub use settings::{CORE_PACKAGE, ExtensionLayout, ProjectSettings};
