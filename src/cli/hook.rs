use clap::Parser;

/// Arguments for the hook command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  From composer.json scripts (post-package-install / post-package-update):\n    \
                  civicrm-ext hook civicrm/civicrm-core\n\n\
                  Any other package name is ignored:\n    civicrm-ext hook drupal/core")]
pub struct HookArgs {
    /// Name of the package Composer just installed or updated
    pub package: String,
}
