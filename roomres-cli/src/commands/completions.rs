//! Shell completion generation command.
//!
//! Generates completion scripts for bash, zsh, fish, and PowerShell.

use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Binary name installed by this package.
const BIN_NAME: &str = "roomres";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            match self.shell {
                Shell::Bash => {
                    eprintln!("#   roomres completions bash > ~/.local/share/bash-completion/completions/roomres");
                }
                Shell::Zsh => {
                    eprintln!("#   roomres completions zsh > ~/.zsh/completions/_roomres");
                }
                Shell::Fish => {
                    eprintln!("#   roomres completions fish > ~/.config/fish/completions/roomres.fish");
                }
                Shell::PowerShell => {
                    eprintln!("#   roomres completions powershell | Out-String | Invoke-Expression");
                }
                _ => {}
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
