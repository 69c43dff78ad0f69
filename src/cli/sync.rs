use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Acquire extensions and sync web assets:\n    civicrm-ext sync\n\n\
                  Start from an empty extensions directory:\n    civicrm-ext sync --clean")]
pub struct SyncArgs {
    /// Remove everything in the extensions install directory first (keeps .gitkeep)
    #[arg(long)]
    pub clean: bool,
}
