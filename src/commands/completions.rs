//! # Completions Command Implementation
//!
//! This module implements the `completions` subcommand, which prints a shell
//! completion script for `tiapp` generated by `clap_complete`.
//!
//! ## Example
//!
//! ```bash
//! tiapp completions bash > ~/.local/share/bash-completion/completions/tiapp
//! tiapp completions zsh > ~/.zfunc/_tiapp
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "tiapp", &mut io::stdout());
    Ok(())
}
