//! CLI definitions using clap derive API
//!
//! One submodule per command's argument types:
//! - download: download-extensions arguments
//! - sync: sync arguments
//! - hook: hook arguments
//! - completions: completions arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

pub mod completions;
pub mod download;
pub mod hook;
pub mod sync;

pub use completions::CompletionsArgs;
pub use download::DownloadArgs;
pub use hook::HookArgs;
pub use sync::SyncArgs;

/// civicrm-ext - CiviCRM extension installer for Composer projects
#[derive(Parser, Debug)]
#[command(
    name = "civicrm-ext",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install CiviCRM extensions and web assets into a Composer project",
    long_about = "civicrm-ext reads the extensions declared under extra.civicrm in composer.json, \
                  downloads or links each of them into the CiviCRM extensions directory, applies \
                  their patches, and syncs the web assets of civicrm/civicrm-core into the web root.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  civicrm-ext download-extensions          \x1b[90m# Fetch every configured extension\x1b[0m\n   \
                  civicrm-ext download-extensions --clean  \x1b[90m# Start from an empty extensions dir\x1b[0m\n   \
                  civicrm-ext sync                         \x1b[90m# Extensions, then web assets\x1b[0m\n   \
                  civicrm-ext hook civicrm/civicrm-core    \x1b[90m# Run from a Composer script\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory containing composer.json (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "CIVICRM_EXT_PROJECT_DIR")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub tools: ToolArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Timeouts and external tools
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Seconds before a download is abandoned
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        default_value_t = 300,
        env = "CIVICRM_EXT_DOWNLOAD_TIMEOUT"
    )]
    pub download_timeout: u64,

    /// Seconds before a patch process is killed
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        default_value_t = 120,
        env = "CIVICRM_EXT_PATCH_TIMEOUT"
    )]
    pub patch_timeout: u64,

    /// patch executable to run
    #[arg(long, global = true, value_name = "PATH", default_value = "patch")]
    pub patch_bin: PathBuf,
}

impl ToolArgs {
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout)
    }

    pub fn patch_timeout(&self) -> Duration {
        Duration::from_secs(self.patch_timeout)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download, link and patch every configured extension
    DownloadExtensions(DownloadArgs),

    /// Acquire extensions, then sync web assets into the web root
    Sync(SyncArgs),

    /// Post install/update hook for Composer scripts
    Hook(HookArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_cli_parsing_download_extensions() {
        let cli = Cli::try_parse_from(["civicrm-ext", "download-extensions"]).unwrap();
        match cli.command {
            Commands::DownloadExtensions(args) => assert!(!args.clean),
            _ => panic!("Expected DownloadExtensions command"),
        }
    }

    #[test]
    fn test_cli_parsing_download_extensions_clean() {
        let cli = Cli::try_parse_from(["civicrm-ext", "download-extensions", "--clean"]).unwrap();
        match cli.command {
            Commands::DownloadExtensions(args) => assert!(args.clean),
            _ => panic!("Expected DownloadExtensions command"),
        }
    }

    #[test]
    fn test_cli_parsing_sync() {
        let cli = Cli::try_parse_from(["civicrm-ext", "sync", "--clean", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Sync(args) => assert!(args.clean),
            _ => panic!("Expected Sync command"),
        }
    }

    #[test]
    fn test_cli_parsing_hook() {
        let cli = Cli::try_parse_from(["civicrm-ext", "hook", "civicrm/civicrm-core"]).unwrap();
        match cli.command {
            Commands::Hook(args) => assert_eq!(args.package, "civicrm/civicrm-core"),
            _ => panic!("Expected Hook command"),
        }
    }

    #[test]
    fn test_cli_parsing_hook_requires_package() {
        assert!(Cli::try_parse_from(["civicrm-ext", "hook"]).is_err());
    }

    #[test]
    #[serial]
    fn test_cli_tool_defaults() {
        let cli = Cli::try_parse_from(["civicrm-ext", "sync"]).unwrap();
        assert_eq!(cli.tools.download_timeout(), Duration::from_secs(300));
        assert_eq!(cli.tools.patch_timeout(), Duration::from_secs(120));
        assert_eq!(cli.tools.patch_bin, PathBuf::from("patch"));
    }

    #[test]
    #[serial]
    fn test_cli_tool_env_overrides() {
        let original = std::env::var("CIVICRM_EXT_PATCH_TIMEOUT").ok();
        unsafe {
            std::env::set_var("CIVICRM_EXT_PATCH_TIMEOUT", "7");
        }

        let cli = Cli::try_parse_from(["civicrm-ext", "sync"]);

        unsafe {
            match original {
                Some(value) => std::env::set_var("CIVICRM_EXT_PATCH_TIMEOUT", value),
                None => std::env::remove_var("CIVICRM_EXT_PATCH_TIMEOUT"),
            }
        }
        assert_eq!(cli.unwrap().tools.patch_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "civicrm-ext",
            "download-extensions",
            "--workspace",
            "/srv/site",
            "--patch-timeout",
            "5",
            "--patch-bin",
            "/usr/local/bin/gpatch",
        ])
        .unwrap();
        assert_eq!(cli.workspace, Some(PathBuf::from("/srv/site")));
        assert_eq!(cli.tools.patch_timeout(), Duration::from_secs(5));
        assert_eq!(cli.tools.patch_bin, PathBuf::from("/usr/local/bin/gpatch"));
    }

    #[test]
    fn test_cli_rejects_non_numeric_timeout() {
        assert!(
            Cli::try_parse_from(["civicrm-ext", "--download-timeout", "soon", "sync"]).is_err()
        );
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["civicrm-ext", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["civicrm-ext", "completions", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "zsh"),
            _ => panic!("Expected Completions command"),
        }
    }
}
