use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    civicrm-ext completions bash > ~/.bash_completion.d/civicrm-ext\n\n\
                  Generate zsh completions:\n    civicrm-ext completions zsh > ~/.zfunc/_civicrm-ext\n\n\
                  Generate fish completions:\n    civicrm-ext completions fish > ~/.config/fish/completions/civicrm-ext.fish\n\n\
                  Generate PowerShell completions:\n    civicrm-ext completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
