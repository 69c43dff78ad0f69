use clap::Parser;

/// Arguments for the download-extensions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Download every configured extension:\n    civicrm-ext download-extensions\n\n\
                  Empty the extensions directory first:\n    civicrm-ext download-extensions --clean\n\n\
                  Run against another project:\n    civicrm-ext -w ../site download-extensions")]
pub struct DownloadArgs {
    /// Remove everything in the extensions install directory first (keeps .gitkeep)
    #[arg(long)]
    pub clean: bool,
}
