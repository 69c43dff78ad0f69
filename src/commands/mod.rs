//! Command implementations for the civicrm-ext CLI

pub mod completions;
pub mod download_extensions;
pub mod helpers;
pub mod hook;
pub mod sync;
pub mod version;
