//! CLI argument parsing and command dispatch

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tiapp_xml::logging::init_logging;
use tiapp_xml::{find_config_file, ConfigDocument};

use crate::commands;

/// tiapp - Inspect and edit tiapp.xml application descriptors
#[derive(Parser, Debug)]
#[command(name = "tiapp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

/// Where to find the descriptor.
#[derive(Args, Debug, Clone, Default)]
pub struct DescriptorArgs {
    /// Path to tiapp.xml (skips the directory search)
    #[arg(short, long, global = true, value_name = "FILE", env = "TIAPP_FILE")]
    pub file: Option<PathBuf>,

    /// Directory to start searching upward from (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl DescriptorArgs {
    /// Resolve the descriptor path from `--file`, or by searching upward from
    /// `--dir` / the current directory.
    pub fn resolve(&self) -> Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }
        let start = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        find_config_file(&start).with_context(|| {
            format!(
                "Could not find tiapp.xml in directory tree: {}",
                start.display()
            )
        })
    }

    /// Resolve and load the descriptor.
    pub fn load(&self) -> Result<ConfigDocument> {
        let path = self.resolve()?;
        log::debug!("Using descriptor {}", path.display());
        Ok(ConfigDocument::load(&path)?)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a module entry (from arguments or npm lifecycle environment)
    InstallModule(commands::install_module::InstallModuleArgs),

    /// Remove a module entry
    UninstallModule(commands::uninstall_module::UninstallModuleArgs),

    /// List module entries
    Modules(commands::ls::LsArgs),

    /// List plugin entries
    Plugins(commands::ls::LsArgs),

    /// Print a top-level field
    Get(commands::field::GetArgs),

    /// Set a top-level field
    Set(commands::field::SetArgs),

    /// Show or change deployment targets
    Target(commands::target::TargetArgs),

    /// Show, set, or remove a property
    Property(commands::property::PropertyArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let descriptor = self.descriptor;
        match self.command {
            Commands::InstallModule(args) => commands::install_module::execute(args, &descriptor),
            Commands::UninstallModule(args) => commands::uninstall_module::execute(args, &descriptor),
            Commands::Modules(args) => {
                commands::ls::execute(args, &descriptor, tiapp_xml::ItemKind::Module)
            }
            Commands::Plugins(args) => {
                commands::ls::execute(args, &descriptor, tiapp_xml::ItemKind::Plugin)
            }
            Commands::Get(args) => commands::field::execute_get(args, &descriptor),
            Commands::Set(args) => commands::field::execute_set(args, &descriptor),
            Commands::Target(args) => commands::target::execute(args, &descriptor),
            Commands::Property(args) => commands::property::execute(args, &descriptor),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
